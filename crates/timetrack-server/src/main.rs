//! timetrack server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `TIMETRACK_*`
//! environment overrides, opens the SQLite store and serves the JSON API.
//!
//! ```text
//! cargo run -p timetrack-server -- --seed
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use timetrack_server::ServerConfig;
use timetrack_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Time-tracking record service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Wipe the database and load demo users, tasks and registry records
  /// before serving.
  #[arg(long)]
  seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let config = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

  let store = SqliteStore::open(&config.database_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", config.database_path))?;

  if cli.seed {
    let summary = store.seed_demo_data().await.context("failed to seed demo data")?;
    tracing::info!(
      users = summary.users,
      tasks = summary.tasks,
      people = summary.people,
      "seeded demo data"
    );
  }

  let app = timetrack_server::app(&config, Arc::new(store))
    .context("failed to build registry client")?;

  let address = config.address();
  tracing::info!(registry = %config.external_api_url, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
