//! Error types for `roster-core`.

use thiserror::Error;

/// A payload that does not satisfy the record schema.
#[derive(Debug, Error)]
pub enum Error {
  #[error("record must be a JSON object")]
  NotAnObject,

  #[error("`{0}` is required")]
  MissingField(&'static str),

  #[error("`{0}` must be a string, number, or boolean")]
  NotScalar(&'static str),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
