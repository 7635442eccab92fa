//! The create-record rule: insert iff no conflicting record exists.
//!
//! Two layers guard uniqueness. The pre-insert [`RecordFilter`] lookup catches
//! the common case; the store's own unique indexes settle concurrent creates
//! that both passed the lookup.

use thiserror::Error;
use uuid::Uuid;

use crate::{
  record::{NewRecord, Record},
  store::{DuplicateKey, InsertError, RecordFilter, RecordStore},
};

/// Outcome of a rejected [`create_record`].
#[derive(Debug, Error)]
pub enum CreateError<E> {
  /// The pre-insert lookup found a record sharing a unique key.
  #[error("record {existing} already holds this mobile, email, or pancard")]
  Duplicate { existing: Uuid },

  /// The lookup passed but the insert hit a unique index.
  #[error("duplicate key: {0}")]
  DuplicateKey(DuplicateKey),

  #[error("store error: {0}")]
  Store(#[source] E),
}

impl<E> CreateError<E> {
  pub fn is_duplicate(&self) -> bool {
    matches!(self, CreateError::Duplicate { .. } | CreateError::DuplicateKey(_))
  }
}

/// Create `input` in `store` unless a record already shares its `mobile`,
/// `email`, or `pancard`.
pub async fn create_record<S>(
  store: &S,
  input: NewRecord,
) -> Result<Record, CreateError<S::Error>>
where
  S: RecordStore,
{
  let filter = RecordFilter::conflicts_with(&input);

  if let Some(existing) = store.find_one(&filter).await.map_err(CreateError::Store)? {
    tracing::debug!(existing = %existing.id, "rejected duplicate record");
    return Err(CreateError::Duplicate { existing: existing.id });
  }

  match store.insert(input).await {
    Ok(record) => {
      tracing::debug!(id = %record.id, "created record");
      Ok(record)
    }
    Err(InsertError::DuplicateKey(key)) => {
      tracing::warn!(field = %key.field, "duplicate record raced past lookup");
      Err(CreateError::DuplicateKey(key))
    }
    Err(InsertError::Store(e)) => Err(CreateError::Store(e)),
  }
}
