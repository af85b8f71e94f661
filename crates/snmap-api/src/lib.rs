//! JSON REST API for the mapping service.
//!
//! Exposes an axum [`Router`] backed by a [`MappingService`] over any
//! [`MappingStore`]. This layer only decodes requests and translates error
//! kinds into status codes; TLS and tracing middleware are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = snmap_api::api_router(Arc::new(MappingService::new(store)));
//! ```

pub mod error;
pub mod health;
pub mod mappings;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use snmap_core::{service::MappingService, store::MappingStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<MappingService<S>>) -> Router<()>
where
  S: MappingStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler))
    .route("/mappings", get(mappings::list::<S>).post(mappings::create::<S>))
    .route("/mappings/sys-id/{sys_id}", get(mappings::by_sys_id::<S>))
    .route("/mappings/api-id/{api_id}", get(mappings::by_api_id::<S>))
    .route("/mappings/search", get(mappings::search::<S>))
    .route(
      "/mappings/{id}",
      put(mappings::update::<S>).delete(mappings::delete::<S>),
    )
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────
