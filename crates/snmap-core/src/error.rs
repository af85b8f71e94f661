//! Error types for `snmap-core`.

use thiserror::Error;

/// Every failure a caller of [`MappingService`](crate::service::MappingService)
/// can observe.
///
/// `Validation` is raised by the service before the store is touched. The
/// remaining kinds originate in the store and are passed through unchanged.
#[derive(Debug, Error)]
pub enum Error {
  #[error("validation error: {0}")]
  Validation(String),

  #[error("mapping not found: {0}")]
  NotFound(String),

  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
