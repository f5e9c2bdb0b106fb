//! `GET /api/info`: the local mirror of the passport registry.
//!
//! Answers the same contract the enrolment flow expects from the external
//! registry, so one deployment can point its resolver at itself.

use axum::{
  Json,
  extract::{Query, State},
};
use mockable::Clock;
use serde::Deserialize;
use timetrack_core::{people::People, resolver::IdentityResolver, store::TrackerStore};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoParams {
  pub passport_series: Option<String>,
  pub passport_number: Option<String>,
}

/// `GET /api/info?passportSeries=1234&passportNumber=567890`
pub async fn info<S, R, C>(
  State(state): State<AppState<S, R, C>>,
  Query(params): Query<InfoParams>,
) -> Result<Json<People>, ApiError>
where
  S: TrackerStore,
  R: IdentityResolver,
  C: Clock + Send + Sync,
{
  let person = state
    .query
    .get_person_by_passport(
      params.passport_series.as_deref().unwrap_or_default(),
      params.passport_number.as_deref().unwrap_or_default(),
    )
    .await?;
  Ok(Json(person))
}
