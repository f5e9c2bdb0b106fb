//! Error type for `timetrack-store-sqlite`.

use thiserror::Error;
use timetrack_core::passport::PassportNumber;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] timetrack_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("passport number {0:?} is already registered")]
  DuplicatePassport(String),

  #[error("person with passport {0} already exists")]
  DuplicatePerson(PassportNumber),

  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("task not found: {0}")]
  TaskNotFound(i64),
}

impl From<Error> for timetrack_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(e) => e,
      Error::DuplicatePassport(_) | Error::DuplicatePerson(_) => Self::Conflict(err.to_string()),
      Error::UserNotFound(_) | Error::TaskNotFound(_) => Self::NotFound(err.to_string()),
      Error::Database(_) | Error::DateParse(_) => Self::persistence(err),
    }
  }
}

/// Whether `err` is a SQLite `UNIQUE` constraint failure.
pub(crate) fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
