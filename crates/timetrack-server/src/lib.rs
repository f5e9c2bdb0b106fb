//! Server wiring for the time-tracking service: configuration, the HTTP
//! passport-registry client and application assembly.

pub mod registry;

use std::{path::Path, sync::Arc, time::Duration};

use axum::Router;
use config::{Config, ConfigError, Environment, File};
use mockable::DefaultClock;
use serde::Deserialize;
use timetrack_api::{AppState, api_router};
use timetrack_store_sqlite::SqliteStore;

pub use registry::{HttpIdentityResolver, ResolveError};

/// Prefix of environment variables that override the config file,
/// e.g. `TIMETRACK_DATABASE_PATH`.
pub const ENV_PREFIX: &str = "TIMETRACK";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                  String,
  pub port:                  u16,
  pub database_path:         String,
  /// Base URL of the passport registry; `/info` is appended.
  pub external_api_url:      String,
  pub resolver_timeout_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                  "0.0.0.0".to_string(),
      port:                  8080,
      database_path:         "timetrack.db".to_string(),
      external_api_url:      "http://localhost:8080/api".to_string(),
      resolver_timeout_secs: 10,
    }
  }
}

impl ServerConfig {
  /// Read `file` if it exists, then apply `TIMETRACK_*` environment overrides.
  pub fn load(file: &Path) -> Result<Self, ConfigError> {
    Self::from_sources(file, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
  }

  fn from_sources(file: &Path, env: Environment) -> Result<Self, ConfigError> {
    Config::builder()
      .add_source(File::from(file).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub const fn resolver_timeout(&self) -> Duration {
    Duration::from_secs(self.resolver_timeout_secs)
  }
}

// ─── Application ─────────────────────────────────────────────────────────────

/// Assemble the full router: SQLite-backed services, the HTTP registry
/// client and the wall clock.
pub fn app(config: &ServerConfig, store: Arc<SqliteStore>) -> Result<Router, ResolveError> {
  let resolver = HttpIdentityResolver::new(&config.external_api_url, config.resolver_timeout())?;
  let state = AppState::new(store, Arc::new(resolver), Arc::new(DefaultClock));
  Ok(api_router(state))
}
