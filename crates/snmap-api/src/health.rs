//! Handler for `GET /health`.

use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "servicenow-mapping-service";

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:  &'static str,
  pub service: &'static str,
}

/// `GET /health`: liveness only; does not touch the store.
pub async fn handler() -> Json<Health> {
  Json(Health { status: "healthy", service: SERVICE_NAME })
}
