//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings
//! (`2024-05-01T09:00:00.000000Z`) so that lexical order matches
//! chronological order and range predicates can run in SQL.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use timetrack_core::{people::People, task::Task, user::User};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// `dt` at the precision it will have after a round trip through a column.
pub fn stored_dt(dt: DateTime<Utc>) -> DateTime<Utc> { dt.trunc_subsecs(6) }

/// The current time at column precision.
pub fn now() -> DateTime<Utc> { stored_dt(Utc::now()) }

fn decode_opt_dt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

// ─── Column lists ────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str =
  "id, passport_number, surname, name, patronymic, address, created_at, updated_at";

pub const TASK_COLUMNS: &str =
  "id, user_id, description, start_time, end_time, duration, created_at, updated_at";

pub const PEOPLE_COLUMNS: &str = "id, passport_series, passport_number, surname, name, \
                                  patronymic, address, created_at, updated_at";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:              i64,
  pub passport_number: String,
  pub surname:         String,
  pub name:            String,
  pub patronymic:      String,
  pub address:         String,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawUser {
  /// Row mapper for queries selecting [`USER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      passport_number: row.get(1)?,
      surname:         row.get(2)?,
      name:            row.get(3)?,
      patronymic:      row.get(4)?,
      address:         row.get(5)?,
      created_at:      row.get(6)?,
      updated_at:      row.get(7)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:              self.id,
      passport_number: self.passport_number,
      surname:         self.surname,
      name:            self.name,
      patronymic:      self.patronymic,
      address:         self.address,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `tasks` row.
pub struct RawTask {
  pub id:          i64,
  pub user_id:     i64,
  pub description: String,
  pub start_time:  Option<String>,
  pub end_time:    Option<String>,
  pub duration:    i64,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawTask {
  /// Row mapper for queries selecting [`TASK_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      user_id:     row.get(1)?,
      description: row.get(2)?,
      start_time:  row.get(3)?,
      end_time:    row.get(4)?,
      duration:    row.get(5)?,
      created_at:  row.get(6)?,
      updated_at:  row.get(7)?,
    })
  }

  pub fn into_task(self) -> Result<Task> {
    Ok(Task {
      id:          self.id,
      user_id:     self.user_id,
      description: self.description,
      start_time:  decode_opt_dt(self.start_time.as_deref())?,
      end_time:    decode_opt_dt(self.end_time.as_deref())?,
      duration:    self.duration,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `people` row.
pub struct RawPeople {
  pub id:              i64,
  pub passport_series: i64,
  pub passport_number: i64,
  pub surname:         String,
  pub name:            String,
  pub patronymic:      String,
  pub address:         String,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawPeople {
  /// Row mapper for queries selecting [`PEOPLE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      passport_series: row.get(1)?,
      passport_number: row.get(2)?,
      surname:         row.get(3)?,
      name:            row.get(4)?,
      patronymic:      row.get(5)?,
      address:         row.get(6)?,
      created_at:      row.get(7)?,
      updated_at:      row.get(8)?,
    })
  }

  pub fn into_people(self) -> Result<People> {
    Ok(People {
      id:              self.id,
      passport_series: self.passport_series,
      passport_number: self.passport_number,
      surname:         self.surname,
      name:            self.name,
      patronymic:      self.patronymic,
      address:         self.address,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn encoded_timestamps_sort_chronologically() {
    let a = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let b = a + chrono::Duration::milliseconds(250);
    let c = a + chrono::Duration::hours(1);
    let (ea, eb, ec) = (encode_dt(a), encode_dt(b), encode_dt(c));
    assert_eq!(ea.len(), eb.len());
    assert!(ea < eb && eb < ec);
    assert_eq!(decode_dt(&eb).unwrap(), b);
  }

  #[test]
  fn decode_rejects_garbage() {
    assert!(matches!(decode_dt("not a date"), Err(Error::DateParse(_))));
  }
}
