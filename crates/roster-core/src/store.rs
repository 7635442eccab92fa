//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The create rule and the HTTP layer depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use serde::Serialize;
use thiserror::Error;

use crate::record::{NewRecord, Record, UniqueKey};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Predicate for [`RecordStore::find_one`]: a record matches when it equals
/// the given value on at least one of the listed keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
  pub any_of: Vec<(UniqueKey, String)>,
}

impl RecordFilter {
  /// Match any record sharing `mobile`, `email`, or `pancard` with `record`.
  pub fn conflicts_with(record: &NewRecord) -> Self {
    Self {
      any_of: UniqueKey::ALL
        .into_iter()
        .map(|k| (k, record.key(k).to_owned()))
        .collect(),
    }
  }

  pub fn matches(&self, record: &NewRecord) -> bool {
    self.any_of.iter().any(|(k, v)| record.key(*k) == v)
  }
}

// ─── Insert outcome ──────────────────────────────────────────────────────────

/// A unique index rejected an insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
  pub field: UniqueKey,
  pub value: String,
}

impl std::fmt::Display for DuplicateKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {:?} already exists", self.field, self.value)
  }
}

/// Failure of [`RecordStore::insert`].
#[derive(Debug, Error)]
pub enum InsertError<E> {
  /// Lost a race against a concurrent insert of a colliding record.
  #[error("duplicate key: {0}")]
  DuplicateKey(DuplicateKey),

  #[error("store error: {0}")]
  Store(#[source] E),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a single collection of [`Record`] documents.
///
/// Implementations must enforce uniqueness of `mobile`, `email` and `pancard`
/// themselves; callers rely on it to settle concurrent inserts.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the first record matching `filter`, if any.
  fn find_one<'a>(
    &'a self,
    filter: &'a RecordFilter,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + 'a;

  /// Persist `input` under a fresh id and return the stored record.
  fn insert(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<Record, InsertError<Self::Error>>> + Send + '_;
}
