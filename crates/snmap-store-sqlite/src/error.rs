//! Error type for `snmap-store-sqlite`.

use rusqlite::{ErrorCode, ffi::SQLITE_CONSTRAINT_UNIQUE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// No active mapping matched the lookup.
  #[error("{0}")]
  NotFound(String),

  /// A write would break a uniqueness constraint among active mappings.
  #[error("{0}")]
  ConstraintViolation(String),
}

impl Error {
  /// Classify a driver error raised by an `INSERT` or `UPDATE`.
  ///
  /// Only unique-index failures count as constraint violations; every other
  /// constraint code is a backend error.
  pub(crate) fn from_write(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
        failure,
        message,
      )) if failure.code == ErrorCode::ConstraintViolation
        && failure.extended_code == SQLITE_CONSTRAINT_UNIQUE =>
      {
        Error::ConstraintViolation(
          message.unwrap_or_else(|| failure.to_string()),
        )
      }
      other => Error::Database(other),
    }
  }
}

impl From<Error> for snmap_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::NotFound(m) => snmap_core::Error::NotFound(m),
      Error::ConstraintViolation(m) => {
        snmap_core::Error::ConstraintViolation(m)
      }
      other => snmap_core::Error::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
