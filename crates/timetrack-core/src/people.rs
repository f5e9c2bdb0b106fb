//! People: the local mirror of the external passport registry.
//!
//! These records are reference data: they are read to enrich a new user and
//! are never mutated by the services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::passport::PassportNumber;

/// A persisted registry record. `(passport_series, passport_number)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct People {
  pub id:              i64,
  pub passport_series: i64,
  pub passport_number: i64,
  pub surname:         String,
  pub name:            String,
  pub patronymic:      String,
  pub address:         String,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl People {
  pub const fn passport(&self) -> PassportNumber {
    PassportNumber::new(self.passport_series, self.passport_number)
  }
}

/// The registry-facing shape of a person: what the external registry returns
/// and what is needed to insert a [`People`] row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonDetails {
  pub passport_series: i64,
  pub passport_number: i64,
  pub surname:         String,
  pub name:            String,
  pub patronymic:      String,
  pub address:         String,
}

impl From<People> for PersonDetails {
  fn from(p: People) -> Self {
    Self {
      passport_series: p.passport_series,
      passport_number: p.passport_number,
      surname:         p.surname,
      name:            p.name,
      patronymic:      p.patronymic,
      address:         p.address,
    }
  }
}
