//! User enrolment and maintenance.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::store_error;
use crate::{
  Error, Result,
  passport::PassportNumber,
  resolver::IdentityResolver,
  store::TrackerStore,
  user::{User, UserFields},
};

pub struct UserService<S, R> {
  store:    Arc<S>,
  resolver: Arc<R>,
}

impl<S, R> Clone for UserService<S, R> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      resolver: Arc::clone(&self.resolver),
    }
  }
}

impl<S, R> UserService<S, R>
where
  S: TrackerStore,
  R: IdentityResolver,
{
  pub const fn new(store: Arc<S>, resolver: Arc<R>) -> Self { Self { store, resolver } }

  /// Enrol a user from a raw `"SERIES NUMBER"` passport string.
  ///
  /// The passport is parsed before any network call; the registry supplies
  /// the name and address. The stored passport number is `passport_raw`
  /// verbatim.
  pub async fn add_user(&self, passport_raw: &str) -> Result<User> {
    let passport = passport_raw.parse::<PassportNumber>().inspect_err(|e| {
      warn!(passport = passport_raw, error = %e, "rejecting malformed passport number");
    })?;

    debug!(%passport, "resolving identity");
    let details = self.resolver.resolve(passport).await.map_err(|e| {
      error!(%passport, error = %e, "identity lookup failed");
      Error::Upstream(e.to_string())
    })?;

    let fields = UserFields {
      passport_number: passport_raw.to_owned(),
      surname:         details.surname,
      name:            details.name,
      patronymic:      details.patronymic,
      address:         details.address,
    };

    let user = self.store.add_user(fields).await.map_err(store_error)?;
    info!(user_id = user.id, passport = %user.passport_number, "user created");
    Ok(user)
  }

  /// Overwrite every mutable field of user `id` with `fields`.
  pub async fn update_user(&self, id: i64, fields: UserFields) -> Result<User> {
    let mut user = self.find(id).await?;
    user.apply(fields);

    let user = self.store.update_user(user).await.map_err(store_error)?;
    info!(user_id = id, "user updated");
    Ok(user)
  }

  /// Delete user `id`. The user's tasks are not removed.
  pub async fn delete_user(&self, id: i64) -> Result<()> {
    self.find(id).await?;

    if !self.store.delete_user(id).await.map_err(store_error)? {
      return Err(not_found(id));
    }
    info!(user_id = id, "user deleted");
    Ok(())
  }

  async fn find(&self, id: i64) -> Result<User> {
    self
      .store
      .get_user(id)
      .await
      .map_err(store_error)?
      .ok_or_else(|| not_found(id))
  }
}

fn not_found(id: i64) -> Error { Error::NotFound(format!("user {id} not found")) }
