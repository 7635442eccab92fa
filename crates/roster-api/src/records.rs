//! Handler for `POST /products`.
//!
//! | Status | Body | When |
//! |--------|------|------|
//! | `201` | `{"message","product"}` | created |
//! | `400` | `{"message"}` | a record already holds the mobile, email, or pancard |
//! | `400` | `{"message","error"}` | a concurrent create won the unique index, or the body is invalid |
//! | `500` | `{"message","error"}` | any other store fault |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  create::create_record,
  gateway::{Connector, Gateway},
  record::{NewRecord, Record},
};
use serde::Serialize;
use serde_json::Value;

use crate::{
  AppState,
  error::ApiError,
  gate::{Authorized, JsonContent},
};

#[derive(Debug, Serialize)]
pub struct Created {
  pub message: &'static str,
  pub product: Record,
}

/// `POST /products` — body: a record object; undeclared fields are kept.
pub async fn create<C>(
  State(state): State<AppState<C>>,
  _: Authorized,
  _: JsonContent,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  C: Connector + 'static,
{
  let store = connected_or_exit(&state.gateway).await;

  let Json(body) = body.map_err(|e| ApiError::InvalidRecord(e.body_text()))?;
  let input = NewRecord::from_json(body).map_err(|e| ApiError::InvalidRecord(e.to_string()))?;

  let record = create_record(store, input).await?;
  Ok((
    StatusCode::CREATED,
    Json(Created { message: "Product created", product: record }),
  ))
}

/// Without storage no request can be served, so a failed connect ends the
/// process instead of producing a response.
async fn connected_or_exit<C: Connector>(gateway: &Gateway<C>) -> &C::Store {
  match gateway.ensure_connected().await {
    Ok(store) => store,
    Err(e) => {
      tracing::error!(error = %e, "cannot connect to record store, exiting");
      std::process::exit(1);
    }
  }
}
