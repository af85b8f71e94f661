//! Handlers for `/mappings` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/mappings` | All active mappings |
//! | `POST`   | `/mappings` | Body: [`NewMapping`]; returns 201 + stored mapping |
//! | `GET`    | `/mappings/sys-id/:sys_id` | 404 if not found |
//! | `GET`    | `/mappings/api-id/:api_id` | First active match |
//! | `GET`    | `/mappings/search` | `?api_name=..&api_version=..`, both required |
//! | `PUT`    | `/mappings/:id` | Body: [`MappingPatch`]; empty fields are ignored |
//! | `DELETE` | `/mappings/:id` | 204, also when already deleted |
//!
//! Malformed ids, bodies, and query strings are answered with 400 and the
//! usual `{"error": ...}` body.

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use snmap_core::{
  mapping::{Mapping, MappingId, MappingPatch, NewMapping},
  service::MappingService,
  store::MappingStore,
};

use crate::error::ApiError;

type Service<S> = State<Arc<MappingService<S>>>;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /mappings`
pub async fn list<S: MappingStore>(
  State(service): Service<S>,
) -> Result<Json<Vec<Mapping>>, ApiError> {
  Ok(Json(service.get_all_mappings().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /mappings`: returns 201 + the stored [`Mapping`].
pub async fn create<S: MappingStore>(
  State(service): Service<S>,
  body: Result<Json<NewMapping>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  let mapping = service.create_mapping(body).await?;
  Ok((StatusCode::CREATED, Json(mapping)))
}

// ─── Lookups ──────────────────────────────────────────────────────────────────

/// `GET /mappings/sys-id/:sys_id`
pub async fn by_sys_id<S: MappingStore>(
  State(service): Service<S>,
  sys_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Mapping>, ApiError> {
  let Path(sys_id) = sys_id?;
  Ok(Json(service.get_mapping_by_sys_id(&sys_id).await?))
}

/// `GET /mappings/api-id/:api_id`
pub async fn by_api_id<S: MappingStore>(
  State(service): Service<S>,
  api_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Mapping>, ApiError> {
  let Path(api_id) = api_id?;
  Ok(Json(service.get_mapping_by_api_id(&api_id).await?))
}

/// Absent params decode as empty and are rejected by the service.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
  pub api_name:    String,
  pub api_version: String,
}

/// `GET /mappings/search?api_name=<name>&api_version=<version>`
pub async fn search<S: MappingStore>(
  State(service): Service<S>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Mapping>, ApiError> {
  let Query(params) = params?;
  let mapping = service
    .get_mapping_by_name_and_version(&params.api_name, &params.api_version)
    .await?;
  Ok(Json(mapping))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /mappings/:id`: partial update; `sys_id` cannot be changed.
pub async fn update<S: MappingStore>(
  State(service): Service<S>,
  id: Result<Path<MappingId>, PathRejection>,
  patch: Result<Json<MappingPatch>, JsonRejection>,
) -> Result<Json<Mapping>, ApiError> {
  let Path(id) = id?;
  let Json(patch) = patch?;
  Ok(Json(service.update_mapping(id, patch).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /mappings/:id`
pub async fn delete<S: MappingStore>(
  State(service): Service<S>,
  id: Result<Path<MappingId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
  let Path(id) = id?;
  service.delete_mapping(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
