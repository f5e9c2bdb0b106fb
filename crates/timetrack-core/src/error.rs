//! Error taxonomy shared by every layer.
//!
//! Each variant corresponds to one client-facing category; the HTTP layer maps
//! them onto status codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed input supplied by the caller.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// A uniqueness constraint was violated.
  #[error("conflict: {0}")]
  Conflict(String),

  /// The external identity registry was unreachable or returned bad data.
  #[error("upstream error: {0}")]
  Upstream(String),

  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap an arbitrary storage failure.
  pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Persistence(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
