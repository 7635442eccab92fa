//! API error types and [`axum::response::IntoResponse`] implementation.
//!
//! Every rejection renders as `{"message": ...}` and, where there is detail
//! to report, an `"error"` field alongside it.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::{create::CreateError, store::DuplicateKey};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler or gate.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("unsupported content type")]
  UnsupportedContentType,

  #[error("invalid record: {0}")]
  InvalidRecord(String),

  #[error("duplicate record")]
  Duplicate,

  #[error("duplicate key: {0}")]
  DuplicateKey(DuplicateKey),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl<E> From<CreateError<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(e: CreateError<E>) -> Self {
    match e {
      CreateError::Duplicate { .. } => ApiError::Duplicate,
      CreateError::DuplicateKey(key) => ApiError::DuplicateKey(key),
      CreateError::Store(e) => ApiError::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::Unauthorized => (
        StatusCode::FORBIDDEN,
        json!({ "message": "Unauthorized Access" }),
      ),
      ApiError::UnsupportedContentType => (
        StatusCode::BAD_REQUEST,
        json!({ "message": "Content-Type must be application/json" }),
      ),
      ApiError::InvalidRecord(detail) => (
        StatusCode::BAD_REQUEST,
        json!({ "message": "Invalid record", "error": detail }),
      ),
      ApiError::Duplicate => (
        StatusCode::BAD_REQUEST,
        json!({ "message": "Duplicate entry: Mobile, Email, or PAN already exists" }),
      ),
      ApiError::DuplicateKey(key) => (
        StatusCode::BAD_REQUEST,
        json!({ "message": "Duplicate key error", "error": key }),
      ),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "failed to create record");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "message": "Error creating product", "error": e.to_string() }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}

/// Startup configuration that cannot be served with.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("`{0}` must be set and non-empty")]
  Missing(&'static str),

  #[error("config error: {0}")]
  Source(#[from] config::ConfigError),
}
