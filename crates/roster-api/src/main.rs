//! roster server binary.
//!
//! Reads `roster.toml` (or the path given with `--config`) plus `ROSTER_*`
//! environment variables, connects to the record store, and serves the JSON
//! API over HTTP.
//!
//! ```text
//! ROSTER_STORE_URL=sqlite://roster.db ROSTER_AUTH_KEY=... cargo run -p roster-api --bin server
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use roster_api::{AppState, ServerConfig, gate::AuthConfig};
use roster_store_sqlite::SqliteConnector;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster record server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "roster.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration. Missing values are fatal before anything is served.
  let server_cfg = ServerConfig::load(&cli.config)
    .context("failed to load config (store_url and auth_key are required)")?;

  let connector = SqliteConnector::parse(&server_cfg.store_url)?;
  let state = AppState::new(connector, AuthConfig { key: server_cfg.auth_key.clone() });

  // Connect eagerly so an unreachable store stops the process at startup.
  state
    .gateway
    .ensure_connected()
    .await
    .context("failed to connect to record store")?;

  let app = roster_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
