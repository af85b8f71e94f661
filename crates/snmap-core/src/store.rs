//! The `MappingStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `snmap-store-sqlite`).
//! [`MappingService`](crate::service::MappingService) and the HTTP layer
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::mapping::{Mapping, MappingId, NewMapping};

/// Abstraction over a mapping store backend.
///
/// Every read sees active records only; a soft-deleted mapping is
/// indistinguishable from one that never existed. Each method is a single
/// statement against the backing store, with no in-process state.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait MappingStore: Send + Sync {
  /// Backend error. Must classify into the core error kinds so that
  /// `NotFound` and `ConstraintViolation` reach callers unchanged.
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new mapping. The store assigns `id`, `created_at` and
  /// `updated_at`.
  ///
  /// Fails with a constraint violation if an active mapping already holds the
  /// same `sys_id` or the same `(api_name, api_version)` pair.
  fn create(
    &self,
    input: NewMapping,
  ) -> impl Future<Output = Result<Mapping, Self::Error>> + Send + '_;

  /// Persist the full state of `mapping` over the active row with the same
  /// `id`, refreshing `updated_at`. Fails with not-found if that row is absent
  /// or soft-deleted.
  fn update(
    &self,
    mapping: Mapping,
  ) -> impl Future<Output = Result<Mapping, Self::Error>> + Send + '_;

  /// Soft-delete a mapping. Succeeds without effect if the mapping is already
  /// deleted or never existed.
  fn delete(
    &self,
    id: MappingId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn get_by_id(
    &self,
    id: MappingId,
  ) -> impl Future<Output = Result<Mapping, Self::Error>> + Send + '_;

  fn get_by_sys_id<'a>(
    &'a self,
    sys_id: &'a str,
  ) -> impl Future<Output = Result<Mapping, Self::Error>> + Send + 'a;

  /// `api_id` is not unique; the first active match in store order wins.
  fn get_by_api_id<'a>(
    &'a self,
    api_id: &'a str,
  ) -> impl Future<Output = Result<Mapping, Self::Error>> + Send + 'a;

  fn get_by_name_and_version<'a>(
    &'a self,
    api_name: &'a str,
    api_version: &'a str,
  ) -> impl Future<Output = Result<Mapping, Self::Error>> + Send + 'a;

  /// All active mappings in the store's natural order.
  fn get_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Mapping>, Self::Error>> + Send + '_;
}
