//! Tasks: time-tracked units of work belonging to a user.
//!
//! A task moves through `Created → Started → Ended`. No transition is blocked
//! by the current state: starting again restarts the clock, ending again
//! re-measures against the current start time.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Wire format for period bounds, e.g. `2024-05-01T09:30:00` (interpreted as UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:          i64,
  /// Back-reference to the owning user. Not enforced by the store.
  #[serde(rename = "userID")]
  pub user_id:     i64,
  pub description: String,
  pub start_time:  Option<DateTime<Utc>>,
  pub end_time:    Option<DateTime<Utc>>,
  /// Whole minutes between `start_time` and `end_time`; `0` until ended.
  pub duration:    i64,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Where a task sits in its lifecycle, derived from its timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
  Created,
  Started,
  Ended,
}

impl Task {
  pub fn state(&self) -> TaskState {
    match (self.start_time, self.end_time) {
      (_, Some(_)) => TaskState::Ended,
      (Some(_), None) => TaskState::Started,
      (None, None) => TaskState::Created,
    }
  }

  /// Set the start time to `at`.
  ///
  /// Any previous start is overwritten. A previous end time and duration are
  /// cleared so the task is `Started` again and `end >= start` keeps holding.
  pub fn start(&mut self, at: DateTime<Utc>) {
    self.start_time = Some(at);
    self.end_time   = None;
    self.duration   = 0;
  }

  /// Set the end time to `at` and recompute the duration.
  ///
  /// Fails if the task was never started or if `at` precedes the start.
  pub fn end(&mut self, at: DateTime<Utc>) -> Result<()> {
    let start = self.start_time.ok_or_else(|| {
      Error::Validation(format!("task {} has not been started", self.id))
    })?;
    self.duration = elapsed_minutes(start, at)?;
    self.end_time = Some(at);
    Ok(())
  }
}

/// Whole minutes from `start` to `end`, rounded down.
pub fn elapsed_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64> {
  if end < start {
    return Err(Error::Validation(format!(
      "end time {end} precedes start time {start}"
    )));
  }
  Ok((end - start).num_minutes())
}

/// Parse a period bound in [`TIMESTAMP_FORMAT`].
///
/// Every field must be zero-padded to its full width; no surrounding
/// whitespace or fractional seconds are accepted.
pub fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>> {
  let invalid = |reason: String| {
    Error::Validation(format!(
      "invalid {field} {raw:?}: {reason} (expected YYYY-MM-DDTHH:MM:SS)"
    ))
  };

  let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
    .map_err(|e| invalid(e.to_string()))?;
  // chrono accepts unpadded fields and leading blanks; re-rendering catches them.
  if naive.format(TIMESTAMP_FORMAT).to_string() != raw {
    return Err(invalid("fields must be zero-padded".to_string()));
  }
  Ok(naive.and_utc())
}

/// Input for [`crate::store::TrackerStore::add_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
  pub user_id:     i64,
  pub description: String,
  pub start_time:  Option<DateTime<Utc>>,
  pub end_time:    Option<DateTime<Utc>>,
  pub duration:    i64,
}

impl NewTask {
  /// A task that has not been started yet.
  pub fn new(user_id: i64, description: impl Into<String>) -> Self {
    Self {
      user_id,
      description: description.into(),
      start_time: None,
      end_time: None,
      duration: 0,
    }
  }

  /// A task with a known interval, e.g. for imported or seeded history.
  pub fn finished(
    user_id: i64,
    description: impl Into<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> Result<Self> {
    Ok(Self {
      user_id,
      description: description.into(),
      start_time: Some(start),
      end_time: Some(end),
      duration: elapsed_minutes(start, end)?,
    })
  }
}
