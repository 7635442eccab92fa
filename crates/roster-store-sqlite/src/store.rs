//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use roster_core::{
  record::{NewRecord, Record, UniqueKey},
  store::{InsertError, RecordFilter, RecordStore},
};

use crate::{
  encode::{decode_document, duplicate_key, encode_document, encode_dt, encode_uuid},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record collection backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of stored records holding `value` for `key`.
  pub async fn count_by(&self, key: UniqueKey, value: &str) -> Result<usize> {
    let sql = format!("SELECT COUNT(*) FROM records WHERE {} = ?1", key.as_str());
    let value = value.to_owned();

    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, rusqlite::params![value], |r| r.get(0))?))
      .await?;
    Ok(n as usize)
  }

  /// Total number of stored records.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM records", [], |r| r.get(0))?))
      .await?;
    Ok(n as usize)
  }

  async fn insert_row(&self, record: &Record, document: String) -> Result<(), tokio_rusqlite::Error> {
    let id_str      = encode_uuid(record.id);
    let mobile      = record.fields.mobile.clone();
    let email       = record.fields.email.clone();
    let pancard     = record.fields.pancard.clone();
    let created_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO records (record_id, mobile, email, pancard, document, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, mobile, email, pancard, document, created_str],
        )?;
        Ok(())
      })
      .await
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn find_one(&self, filter: &RecordFilter) -> Result<Option<Record>> {
    if filter.any_of.is_empty() {
      return Ok(None);
    }

    // Build WHERE clause dynamically; column names come from `UniqueKey`.
    let conds = filter
      .any_of
      .iter()
      .enumerate()
      .map(|(i, (key, _))| format!("{} = ?{}", key.as_str(), i + 1))
      .collect::<Vec<_>>()
      .join(" OR ");
    let sql = format!("SELECT document FROM records WHERE {conds} ORDER BY rowid LIMIT 1");
    let values: Vec<String> = filter.any_of.iter().map(|(_, v)| v.clone()).collect();

    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(&sql, rusqlite::params_from_iter(values), |row| row.get(0))
          .optional()?)
      })
      .await?;

    raw.as_deref().map(decode_document).transpose()
  }

  async fn insert(&self, input: NewRecord) -> Result<Record, InsertError<Error>> {
    let record   = Record::new(input);
    let document = encode_document(&record).map_err(InsertError::Store)?;

    match self.insert_row(&record, document).await {
      Ok(()) => Ok(record),
      Err(e) => match duplicate_key(&e, &record.fields) {
        Some(key) => Err(InsertError::DuplicateKey(key)),
        None => Err(InsertError::Store(Error::Database(e))),
      },
    }
  }
}
