//! The `TrackerStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `timetrack-store-sqlite`
//! and the in-memory [`crate::memory::MemoryStore`]). Services receive a store
//! explicitly; nothing in this crate reaches for a global handle.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  passport::PassportNumber,
  people::{People, PersonDetails},
  task::{NewTask, Task},
  user::{User, UserFields, UserFilter},
};

// ─── Pagination ──────────────────────────────────────────────────────────────

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A `LIMIT`/`OFFSET` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  i64,
  pub offset: i64,
}

impl Page {
  /// Normalise a 1-based page request: `page < 1` becomes `1`,
  /// `page_size < 1` becomes [`DEFAULT_PAGE_SIZE`].
  pub fn new(page: i64, page_size: i64) -> Self {
    let page      = if page < 1 { 1 } else { page };
    let page_size = if page_size < 1 { DEFAULT_PAGE_SIZE } else { page_size };
    Self {
      limit:  page_size,
      offset: (page - 1).saturating_mul(page_size),
    }
  }
}

impl Default for Page {
  fn default() -> Self { Self::new(1, DEFAULT_PAGE_SIZE) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the persistence gateway for users, tasks and people.
///
/// Read-by-key methods return `None` for a missing row; deciding whether that
/// is an error belongs to the caller. Backend errors must convert into the
/// shared [`crate::Error`] taxonomy, with uniqueness violations surfacing as
/// [`crate::Error::Conflict`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TrackerStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user. The id and timestamps are assigned by the store.
  fn add_user(
    &self,
    fields: UserFields,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Users matching every predicate in `filter`, ordered by id.
  fn list_users<'a>(
    &'a self,
    filter: &'a UserFilter,
    page: Page,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + 'a;

  /// Write back every mutable field of `user`; refreshes `updated_at`.
  fn update_user(
    &self,
    user: User,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Remove the user row. Returns `false` if no row had that id.
  /// Task rows referring to the user are left untouched.
  fn delete_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Tasks ─────────────────────────────────────────────────────────────

  fn add_task(
    &self,
    task: NewTask,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  /// Look up a task by its `(user_id, task_id)` composite key.
  fn get_task(
    &self,
    user_id: i64,
    task_id: i64,
  ) -> impl Future<Output = Result<Option<Task>, Self::Error>> + Send + '_;

  /// Write back the lifecycle fields of `task`; refreshes `updated_at`.
  fn update_task(
    &self,
    task: Task,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  /// Tasks of `user_id` with `start_time >= start` and `end_time <= end`,
  /// ordered by duration, longest first. Tasks missing either timestamp never
  /// match.
  fn list_tasks_in_period(
    &self,
    user_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Task>, Self::Error>> + Send + '_;

  // ── People ────────────────────────────────────────────────────────────

  fn add_person(
    &self,
    person: PersonDetails,
  ) -> impl Future<Output = Result<People, Self::Error>> + Send + '_;

  fn get_person(
    &self,
    passport: PassportNumber,
  ) -> impl Future<Output = Result<Option<People>, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_applies_offset() {
    assert_eq!(Page::new(2, 5), Page { limit: 5, offset: 5 });
    assert_eq!(Page::new(3, 20), Page { limit: 20, offset: 40 });
  }

  #[test]
  fn page_defaults_out_of_range_values() {
    assert_eq!(Page::new(0, 0), Page { limit: 10, offset: 0 });
    assert_eq!(Page::new(-4, 3), Page { limit: 3, offset: 0 });
    assert_eq!(Page::new(2, -1), Page { limit: 10, offset: 10 });
    assert_eq!(Page::default(), Page::new(1, 10));
  }
}
