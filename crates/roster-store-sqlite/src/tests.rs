//! Integration tests for `SqliteStore` against an in-memory database.

use roster_core::{
  create::{CreateError, create_record},
  record::{NewRecord, UniqueKey},
  store::{InsertError, RecordFilter, RecordStore},
};
use serde_json::json;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn person(mobile: &str, email: &str, pancard: &str) -> NewRecord {
  NewRecord::from_json(json!({
    "mobile":       mobile,
    "name":         "Alice",
    "dob":          "2000-01-01",
    "email":        email,
    "employeeType": "staff",
    "pancard":      pancard,
  }))
  .unwrap()
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_id_and_persists() {
  let s = store().await;

  let rec = s.insert(person("1", "a@x.com", "P1")).await.unwrap();
  assert_eq!(rec.fields.mobile, "1");
  assert_eq!(s.count().await.unwrap(), 1);

  let found = s
    .find_one(&RecordFilter::conflicts_with(&rec.fields))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found, rec);
}

#[tokio::test]
async fn insert_keeps_undeclared_fields() {
  let s = store().await;

  let mut input = person("1", "a@x.com", "P1");
  input.extra.insert("x".into(), json!({ "team": "ops", "level": 3 }));
  let rec = s.insert(input).await.unwrap();

  let found = s
    .find_one(&RecordFilter::conflicts_with(&rec.fields))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.fields.extra.get("x"), Some(&json!({ "team": "ops", "level": 3 })));
}

#[tokio::test]
async fn unique_index_rejects_each_key() {
  let s = store().await;
  s.insert(person("1", "a@x.com", "P1")).await.unwrap();

  for (clash, field, value) in [
    (person("1", "b@x.com", "P2"), UniqueKey::Mobile, "1"),
    (person("2", "a@x.com", "P2"), UniqueKey::Email, "a@x.com"),
    (person("2", "b@x.com", "P1"), UniqueKey::Pancard, "P1"),
  ] {
    match s.insert(clash).await {
      Err(InsertError::DuplicateKey(key)) => {
        assert_eq!(key.field, field);
        assert_eq!(key.value, value);
      }
      other => panic!("expected duplicate key, got {other:?}"),
    }
  }

  assert_eq!(s.count().await.unwrap(), 1);
}

// ─── Find ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_one_on_empty_store_returns_none() {
  let s = store().await;
  let filter = RecordFilter::conflicts_with(&person("1", "a@x.com", "P1"));
  assert!(s.find_one(&filter).await.unwrap().is_none());
}

#[tokio::test]
async fn find_one_matches_on_any_single_key() {
  let s = store().await;
  let rec = s.insert(person("1", "a@x.com", "P1")).await.unwrap();
  s.insert(person("9", "z@x.com", "P9")).await.unwrap();

  for key in UniqueKey::ALL {
    let filter = RecordFilter {
      any_of: vec![(key, rec.fields.key(key).to_owned())],
    };
    let found = s.find_one(&filter).await.unwrap().unwrap();
    assert_eq!(found.id, rec.id);
  }

  let miss = RecordFilter::conflicts_with(&person("2", "b@x.com", "P2"));
  assert!(s.find_one(&miss).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_filter_matches_nothing() {
  let s = store().await;
  s.insert(person("1", "a@x.com", "P1")).await.unwrap();
  assert!(s.find_one(&RecordFilter::default()).await.unwrap().is_none());
}

// ─── Create rule against SQLite ──────────────────────────────────────────────

#[tokio::test]
async fn concurrent_creates_with_shared_email_yield_one_record() {
  let s = store().await;

  let (a, b) = tokio::join!(
    create_record(&s, person("1", "same@x.com", "P1")),
    create_record(&s, person("2", "same@x.com", "P2")),
  );

  let oks = [a.is_ok(), b.is_ok()].into_iter().filter(|ok| *ok).count();
  assert_eq!(oks, 1);
  let err = a.err().or(b.err()).unwrap();
  assert!(matches!(
    err,
    CreateError::Duplicate { .. } | CreateError::DuplicateKey(_)
  ));
  assert_eq!(s.count_by(UniqueKey::Email, "same@x.com").await.unwrap(), 1);
}
