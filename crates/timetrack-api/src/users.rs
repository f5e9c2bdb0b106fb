//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | Exact-match filters plus `page`/`pageSize` |
//! | `POST`   | `/users` | Body: `{"passportNumber":"1234 567890"}`; returns 201 |
//! | `PUT`    | `/users/{id}` | Body: full replacement of the user's fields |
//! | `DELETE` | `/users/{id}` | 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use mockable::Clock;
use serde::Deserialize;
use serde_json::json;
use timetrack_core::{
  resolver::IdentityResolver,
  store::TrackerStore,
  user::{User, UserFields, UserFilter},
};

use crate::{AppState, error::ApiError};

// ─── List ────────────────────────────────────────────────────────────────────

/// Query string of `GET /users`. Everything is taken as text so that bad
/// paging values fall back to the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub passport_number: Option<String>,
  pub surname:         Option<String>,
  pub name:            Option<String>,
  pub patronymic:      Option<String>,
  pub address:         Option<String>,
  pub page:            Option<String>,
  pub page_size:       Option<String>,
}

impl ListParams {
  fn filter(&self) -> UserFilter {
    fn supplied(value: &Option<String>) -> Option<String> {
      value.as_deref().filter(|v| !v.is_empty()).map(str::to_owned)
    }
    UserFilter {
      passport_number: supplied(&self.passport_number),
      surname:         supplied(&self.surname),
      name:            supplied(&self.name),
      patronymic:      supplied(&self.patronymic),
      address:         supplied(&self.address),
    }
  }
}

/// Unparseable values become `0`, which the query layer treats as "use the
/// default".
fn lenient(value: Option<&str>) -> i64 { value.and_then(|v| v.parse().ok()).unwrap_or(0) }

/// `GET /users[?surname=...][&page=N][&pageSize=N]`
pub async fn list<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  let users = state
    .query
    .get_users(
      &params.filter(),
      lenient(params.page.as_deref()),
      lenient(params.page_size.as_deref()),
    )
    .await?;
  Ok(Json(users))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub passport_number: String,
}

/// `POST /users`: body `{"passportNumber":"1234 567890"}`
pub async fn create<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  let user = state.users.add_user(&body.passport_number).await?;
  Ok((StatusCode::CREATED, Json(user)))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /users/{id}`: fields absent from the body are cleared.
pub async fn update<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Path(id): Path<i64>,
  Json(fields): Json<UserFields>,
) -> Result<Json<User>, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  Ok(Json(state.users.update_user(id, fields).await?))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /users/{id}`
pub async fn remove<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  state.users.delete_user(id).await?;
  Ok(Json(json!({ "message": "User deleted successfully" })))
}
