//! Handlers for task endpoints under `/users/{id}`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users/{id}/tasks` | Body: `{"description":"..."}`; returns 201 |
//! | `PUT`  | `/users/{id}/tasks/{task_id}/start` | Stamps the start time |
//! | `PUT`  | `/users/{id}/tasks/{task_id}/end` | Stamps the end time, computes `duration` |
//! | `GET`  | `/users/{id}/time-entries` | `?start_date&end_date`, longest first |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use mockable::Clock;
use serde::Deserialize;
use timetrack_core::{Error, resolver::IdentityResolver, store::TrackerStore, task::Task};

use crate::{AppState, error::ApiError};

// ─── Create ──────────────────────────────────────────────────────────────────

/// Body of `POST /users/{id}/tasks`. The owning user comes from the path;
/// any `startTime`, `endTime` or `duration` sent along is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBody {
  pub description: String,
}

/// `POST /users/{id}/tasks`
pub async fn create<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Path(user_id): Path<i64>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  let task = state.tasks.add_task(user_id, body.description).await?;
  Ok((StatusCode::CREATED, Json(task)))
}

// ─── Start / end ─────────────────────────────────────────────────────────────

/// `PUT /users/{id}/tasks/{task_id}/start`
pub async fn start<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Path((user_id, task_id)): Path<(i64, i64)>,
) -> Result<Json<Task>, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  Ok(Json(state.tasks.start_task(user_id, task_id).await?))
}

/// `PUT /users/{id}/tasks/{task_id}/end`
pub async fn end<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Path((user_id, task_id)): Path<(i64, i64)>,
) -> Result<Json<Task>, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  Ok(Json(state.tasks.end_task(user_id, task_id).await?))
}

// ─── Time entries ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PeriodParams {
  pub start_date: Option<String>,
  pub end_date:   Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ApiError> {
  value
    .as_deref()
    .ok_or_else(|| Error::Validation(format!("{name} is required")).into())
}

/// `GET /users/{id}/time-entries?start_date=YYYY-MM-DDTHH:MM:SS&end_date=...`
pub async fn time_entries<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Path(user_id): Path<i64>,
  Query(params): Query<PeriodParams>,
) -> Result<Json<Vec<Task>>, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  let start = required(&params.start_date, "start_date")?;
  let end   = required(&params.end_date, "end_date")?;
  Ok(Json(state.tasks.list_tasks_in_period(user_id, start, end).await?))
}
