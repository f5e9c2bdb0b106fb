//! Read-only queries over users and the registry mirror.

use std::sync::Arc;

use tracing::debug;

use super::store_error;
use crate::{
  Error, Result,
  passport::PassportNumber,
  people::People,
  store::{Page, TrackerStore},
  user::{User, UserFilter},
};

pub struct QueryService<S> {
  store: Arc<S>,
}

impl<S> Clone for QueryService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: TrackerStore> QueryService<S> {
  pub const fn new(store: Arc<S>) -> Self { Self { store } }

  /// One page of users matching `filter`. `page` is 1-based; out-of-range
  /// values fall back to page 1 and a page size of 10.
  pub async fn get_users(
    &self,
    filter: &UserFilter,
    page: i64,
    page_size: i64,
  ) -> Result<Vec<User>> {
    let window = Page::new(page, page_size);
    let users = self
      .store
      .list_users(filter, window)
      .await
      .map_err(store_error)?;

    debug!(count = users.len(), limit = window.limit, offset = window.offset, "fetched users");
    Ok(users)
  }

  /// Look up a registry record by its passport series and number.
  pub async fn get_person_by_passport(&self, series: &str, number: &str) -> Result<People> {
    let passport = PassportNumber::from_parts(series, number)?;

    self
      .store
      .get_person(passport)
      .await
      .map_err(store_error)?
      .ok_or_else(|| Error::NotFound(format!("person with passport {passport} not found")))
  }
}
