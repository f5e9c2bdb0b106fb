//! Users: the people whose time is being tracked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted user.
///
/// `passport_number` is the raw `"SERIES NUMBER"` string and is unique across
/// users. Tasks refer back to a user by `id`; a user does not own its tasks'
/// storage, so deleting a user leaves its task rows in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:              i64,
  pub passport_number: String,
  pub surname:         String,
  pub name:            String,
  pub patronymic:      String,
  pub address:         String,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl User {
  /// Replace every mutable field with `fields` (full overwrite, no merge).
  pub fn apply(&mut self, fields: UserFields) {
    self.passport_number = fields.passport_number;
    self.surname         = fields.surname;
    self.name            = fields.name;
    self.patronymic      = fields.patronymic;
    self.address         = fields.address;
  }
}

/// The caller-controlled attributes of a user, used both to create a user and
/// as the replacement body of an update. Missing JSON fields become empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFields {
  pub passport_number: String,
  pub surname:         String,
  pub name:            String,
  pub patronymic:      String,
  pub address:         String,
}

/// Exact-match predicates for [`crate::store::TrackerStore::list_users`].
/// Every supplied predicate must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
  pub passport_number: Option<String>,
  pub surname:         Option<String>,
  pub name:            Option<String>,
  pub patronymic:      Option<String>,
  pub address:         Option<String>,
}

impl UserFilter {
  /// `(column, value)` pairs for each supplied predicate.
  pub fn predicates(&self) -> Vec<(&'static str, &str)> {
    [
      ("passport_number", &self.passport_number),
      ("surname", &self.surname),
      ("name", &self.name),
      ("patronymic", &self.patronymic),
      ("address", &self.address),
    ]
    .into_iter()
    .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
    .collect()
  }

  /// In-process evaluation of the same predicates, for non-SQL backends.
  pub fn matches(&self, user: &User) -> bool {
    fn eq(wanted: Option<&String>, actual: &str) -> bool {
      wanted.is_none_or(|w| w == actual)
    }
    eq(self.passport_number.as_ref(), &user.passport_number)
      && eq(self.surname.as_ref(), &user.surname)
      && eq(self.name.as_ref(), &user.name)
      && eq(self.patronymic.as_ref(), &user.patronymic)
      && eq(self.address.as_ref(), &user.address)
  }
}
