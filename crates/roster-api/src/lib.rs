//! JSON HTTP API for Roster.
//!
//! Exposes an axum [`Router`] serving `POST /products`, backed by any
//! [`Connector`] whose store is opened lazily through a shared [`Gateway`].

pub mod error;
pub mod gate;
pub mod records;

pub use error::{ApiError, ConfigError};

use std::{path::Path, sync::Arc};

use axum::{Router, routing::post};
use roster_core::gateway::{Connector, Gateway};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use gate::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `roster.toml` and
/// `ROSTER_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:      String,
  #[serde(default = "default_port")]
  pub port:      u16,
  /// Where records live, e.g. `sqlite://roster.db`.
  pub store_url: String,
  /// Shared secret expected in the `x-auth-key` header.
  pub auth_key:  String,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 3000 }

impl ServerConfig {
  /// Load from `path` (optional) layered under the process environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::load_with_env(path, None)
  }

  /// As [`load`](Self::load), reading `ROSTER_*` variables from `env` instead
  /// of the process environment when given. Values are kept as text so a
  /// secret like `007` survives unchanged.
  pub fn load_with_env(
    path: &Path,
    env:  Option<config::Map<String, String>>,
  ) -> Result<Self, ConfigError> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER").source(env))
      .build()?;

    let server_cfg: ServerConfig = settings.try_deserialize()?;
    server_cfg.validate()?;
    Ok(server_cfg)
  }

  /// Both the store location and the auth secret must be non-empty.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.store_url.trim().is_empty() {
      return Err(ConfigError::Missing("store_url"));
    }
    if self.auth_key.is_empty() {
      return Err(ConfigError::Missing("auth_key"));
    }
    Ok(())
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<C: Connector> {
  pub gateway: Arc<Gateway<C>>,
  pub auth:    Arc<AuthConfig>,
}

impl<C: Connector> AppState<C> {
  pub fn new(connector: C, auth: AuthConfig) -> Self {
    Self {
      gateway: Arc::new(Gateway::new(connector)),
      auth:    Arc::new(auth),
    }
  }
}

impl<C: Connector> Clone for AppState<C> {
  fn clone(&self) -> Self {
    Self { gateway: self.gateway.clone(), auth: self.auth.clone() }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API [`Router`].
pub fn router<C>(state: AppState<C>) -> Router
where
  C: Connector + 'static,
{
  Router::new()
    .route("/products", post(records::create::<C>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
