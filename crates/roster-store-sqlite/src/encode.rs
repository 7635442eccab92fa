//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase, and records
//! compact JSON documents.

use chrono::{DateTime, Utc};
use roster_core::{
  record::{NewRecord, Record, UniqueKey},
  store::DuplicateKey,
};
use uuid::Uuid;

use crate::Result;

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn encode_document(record: &Record) -> Result<String> {
  Ok(serde_json::to_string(record)?)
}

pub fn decode_document(s: &str) -> Result<Record> { Ok(serde_json::from_str(s)?) }

// ─── Constraint violations ───────────────────────────────────────────────────

/// Recognise a unique-index violation on one of the record keys.
///
/// SQLite reports these as `UNIQUE constraint failed: records.<column>`.
pub fn duplicate_key(err: &tokio_rusqlite::Error, input: &NewRecord) -> Option<DuplicateKey> {
  let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(failure, Some(msg))) = err
  else {
    return None;
  };
  if failure.extended_code != rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
    return None;
  }

  let column = msg.strip_prefix("UNIQUE constraint failed: ")?;
  let field = column
    .split(", ")
    .filter_map(|c| c.strip_prefix("records."))
    .find_map(UniqueKey::from_name)?;

  Some(DuplicateKey { field, value: input.key(field).to_owned() })
}
