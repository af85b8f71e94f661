//! [`MappingService`]: input validation and partial-update semantics on top
//! of any [`MappingStore`].
//!
//! The service checks input shape only. Existence and uniqueness are the
//! store's business; its `NotFound` and `ConstraintViolation` errors are
//! returned as-is.

use tracing::{debug, info};

use crate::{
  Error, Result,
  mapping::{
    API_ID_MAX_LEN, API_NAME_MAX_LEN, API_VERSION_MAX_LEN, Mapping, MappingId,
    MappingPatch, NewMapping, SYS_ID_MAX_LEN,
  },
  store::MappingStore,
};

#[derive(Debug, Clone)]
pub struct MappingService<S> {
  store: S,
}

impl<S: MappingStore> MappingService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  #[cfg(test)]
  fn store(&self) -> &S { &self.store }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Validate `input` and persist it as a new active mapping.
  pub async fn create_mapping(&self, input: NewMapping) -> Result<Mapping> {
    require("sys_id", &input.sys_id, SYS_ID_MAX_LEN)?;
    require("api_id", &input.api_id, API_ID_MAX_LEN)?;
    require("api_name", &input.api_name, API_NAME_MAX_LEN)?;
    require("api_version", &input.api_version, API_VERSION_MAX_LEN)?;

    let mapping = self.store.create(input).await.map_err(Into::into)?;
    info!(id = mapping.id, sys_id = %mapping.sys_id, "created mapping");
    Ok(mapping)
  }

  /// Apply the non-empty fields of `patch` to the active mapping `id`.
  pub async fn update_mapping(
    &self,
    id: MappingId,
    patch: MappingPatch,
  ) -> Result<Mapping> {
    limit("api_id", patch.api_id.as_deref(), API_ID_MAX_LEN)?;
    limit("api_name", patch.api_name.as_deref(), API_NAME_MAX_LEN)?;
    limit("api_version", patch.api_version.as_deref(), API_VERSION_MAX_LEN)?;

    let mut mapping = self.store.get_by_id(id).await.map_err(Into::into)?;
    patch.apply_to(&mut mapping);

    let mapping = self.store.update(mapping).await.map_err(Into::into)?;
    info!(id, "updated mapping");
    Ok(mapping)
  }

  /// Soft-delete mapping `id`. Deleting twice is not an error.
  pub async fn delete_mapping(&self, id: MappingId) -> Result<()> {
    self.store.delete(id).await.map_err(Into::into)?;
    info!(id, "deleted mapping");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub async fn get_mapping_by_sys_id(&self, sys_id: &str) -> Result<Mapping> {
    if sys_id.is_empty() {
      return Err(Error::Validation("sys_id cannot be empty".into()));
    }
    debug!(sys_id, "lookup by sys_id");
    self.store.get_by_sys_id(sys_id).await.map_err(Into::into)
  }

  pub async fn get_mapping_by_api_id(&self, api_id: &str) -> Result<Mapping> {
    if api_id.is_empty() {
      return Err(Error::Validation("api_id cannot be empty".into()));
    }
    debug!(api_id, "lookup by api_id");
    self.store.get_by_api_id(api_id).await.map_err(Into::into)
  }

  pub async fn get_mapping_by_name_and_version(
    &self,
    api_name: &str,
    api_version: &str,
  ) -> Result<Mapping> {
    if api_name.is_empty() || api_version.is_empty() {
      return Err(Error::Validation(
        "both api_name and api_version are required".into(),
      ));
    }
    debug!(api_name, api_version, "lookup by name and version");
    self
      .store
      .get_by_name_and_version(api_name, api_version)
      .await
      .map_err(Into::into)
  }

  pub async fn get_all_mappings(&self) -> Result<Vec<Mapping>> {
    self.store.get_all().await.map_err(Into::into)
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn require(field: &str, value: &str, max: usize) -> Result<()> {
  if value.is_empty() {
    return Err(Error::Validation(format!("{field} is required")));
  }
  limit(field, Some(value), max)
}

fn limit(field: &str, value: Option<&str>, max: usize) -> Result<()> {
  match value {
    Some(v) if v.chars().count() > max => Err(Error::Validation(format!(
      "{field} must be at most {max} characters"
    ))),
    _ => Ok(()),
  }
}
