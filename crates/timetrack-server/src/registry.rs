//! [`HttpIdentityResolver`]: the passport registry reached over HTTP.
//!
//! Contract: `GET {base}/info?passportSeries=<int>&passportNumber=<int>`
//! answers `200` with a JSON person record. Any other status is a failure.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use timetrack_core::{passport::PassportNumber, people::PersonDetails, resolver::IdentityResolver};
use tracing::debug;

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("registry request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("registry responded with {0}")]
  Status(StatusCode),

  #[error("registry response could not be decoded: {0}")]
  Decode(#[source] reqwest::Error),
}

/// Async client for the passport registry.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based. Each lookup
/// is a single attempt bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpIdentityResolver {
  client:   Client,
  base_url: String,
}

impl HttpIdentityResolver {
  pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ResolveError> {
    let client = Client::builder().timeout(timeout).build()?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self) -> String { format!("{}/info", self.base_url.trim_end_matches('/')) }
}

impl IdentityResolver for HttpIdentityResolver {
  type Error = ResolveError;

  async fn resolve(&self, passport: PassportNumber) -> Result<PersonDetails, ResolveError> {
    let url = self.url();
    debug!(%url, %passport, "querying passport registry");

    let resp = self
      .client
      .get(&url)
      .query(&[("passportSeries", passport.series), ("passportNumber", passport.number)])
      .send()
      .await?;

    if resp.status() != StatusCode::OK {
      return Err(ResolveError::Status(resp.status()));
    }
    resp.json().await.map_err(ResolveError::Decode)
  }
}

#[cfg(test)]
mod tests {
  use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode as AxumStatus,
    response::{IntoResponse, Response},
    routing::get,
  };
  use serde::Deserialize;
  use serde_json::json;

  use super::*;

  #[derive(Deserialize)]
  #[serde(rename_all = "camelCase")]
  struct Lookup {
    passport_series: i64,
    passport_number: i64,
  }

  async fn info(Query(q): Query<Lookup>) -> Response {
    if (q.passport_series, q.passport_number) == (1234, 567_890) {
      Json(json!({
        "passportSeries": 1234,
        "passportNumber": 567890,
        "surname": "Ivanov",
        "name": "Ivan",
        "patronymic": "Ivanovich",
        "address": "Moscow"
      }))
      .into_response()
    } else {
      (AxumStatus::NOT_FOUND, "Person not found").into_response()
    }
  }

  /// Serve a fake registry on an ephemeral port and return its base URL.
  async fn fake_registry() -> String {
    let app = Router::new()
      .route("/api/info", get(info))
      .route("/garbled/info", get(|| async { "definitely not json" }))
      .route("/created/info", get(|| async { (AxumStatus::CREATED, Json(json!({}))) }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
  }

  fn resolver(base: String) -> HttpIdentityResolver {
    HttpIdentityResolver::new(base, Duration::from_secs(5)).unwrap()
  }

  #[tokio::test]
  async fn resolves_a_registered_passport() {
    let base = fake_registry().await;
    let details = resolver(format!("{base}/api/"))
      .resolve(PassportNumber::new(1234, 567_890))
      .await
      .unwrap();
    assert_eq!(details.surname, "Ivanov");
    assert_eq!(details.name, "Ivan");
    assert_eq!(details.patronymic, "Ivanovich");
    assert_eq!(details.address, "Moscow");
  }

  #[tokio::test]
  async fn unknown_passport_is_a_status_error() {
    let base = fake_registry().await;
    let err = resolver(format!("{base}/api"))
      .resolve(PassportNumber::new(1, 2))
      .await
      .unwrap_err();
    assert!(matches!(err, ResolveError::Status(StatusCode::NOT_FOUND)), "{err}");
  }

  #[tokio::test]
  async fn only_200_counts_as_success() {
    let base = fake_registry().await;
    let err = resolver(format!("{base}/created"))
      .resolve(PassportNumber::new(1234, 567_890))
      .await
      .unwrap_err();
    assert!(matches!(err, ResolveError::Status(StatusCode::CREATED)), "{err}");
  }

  #[tokio::test]
  async fn garbled_body_is_a_decode_error() {
    let base = fake_registry().await;
    let err = resolver(format!("{base}/garbled"))
      .resolve(PassportNumber::new(1234, 567_890))
      .await
      .unwrap_err();
    assert!(matches!(err, ResolveError::Decode(_)), "{err}");
  }

  #[tokio::test]
  async fn unreachable_registry_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = resolver(format!("http://{addr}"))
      .resolve(PassportNumber::new(1234, 567_890))
      .await
      .unwrap_err();
    assert!(matches!(err, ResolveError::Transport(_)), "{err}");
  }
}
