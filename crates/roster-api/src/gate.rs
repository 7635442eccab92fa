//! Request gates run before any handler touches the store.
//!
//! Both are extractors, so axum resolves them in argument order ahead of the
//! body: auth first, then content type.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use roster_core::gateway::Connector;

use crate::{AppState, error::ApiError};

/// Header carrying the shared secret.
pub const AUTH_HEADER: &str = "x-auth-key";

/// The only content type accepted on write routes.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Secret accepted as valid for this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub key: String,
}

/// Zero-size marker: present in the handler means the request was authorized.
pub struct Authorized;

/// Zero-size marker: the request declared a JSON body.
pub struct JsonContent;

/// Check the auth header directly against `config`.
pub fn verify_key(headers: &HeaderMap, config: &AuthConfig) -> Result<(), ApiError> {
  let presented = headers
    .get(AUTH_HEADER)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  if presented != config.key {
    return Err(ApiError::Unauthorized);
  }
  Ok(())
}

impl<C> FromRequestParts<AppState<C>> for Authorized
where
  C: Connector + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<C>,
  ) -> Result<Self, Self::Rejection> {
    verify_key(&parts.headers, &state.auth).inspect_err(|_| {
      tracing::debug!(uri = %parts.uri, "rejected request without valid auth key");
    })?;
    Ok(Authorized)
  }
}

impl<S> FromRequestParts<S> for JsonContent
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
    match parts.headers.get(header::CONTENT_TYPE) {
      Some(v) if v.as_bytes() == JSON_CONTENT_TYPE.as_bytes() => Ok(JsonContent),
      _ => Err(ApiError::UnsupportedContentType),
    }
  }
}
