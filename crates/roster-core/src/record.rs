//! Record — a person/employee profile keyed by three natural keys.
//!
//! The schema is non-strict: the six declared fields are required, and any
//! other top-level field is carried through untouched in [`NewRecord::extra`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{Error, Result};

/// Field name of the store-assigned identifier.
pub const ID_FIELD: &str = "_id";

/// Declared fields, in wire spelling. Every one must be present and non-empty.
pub const REQUIRED_FIELDS: [&str; 6] =
  ["mobile", "name", "dob", "email", "employeeType", "pancard"];

// ─── Unique keys ─────────────────────────────────────────────────────────────

/// One of the three fields that must be unique across all records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniqueKey {
  Mobile,
  Email,
  Pancard,
}

impl UniqueKey {
  pub const ALL: [UniqueKey; 3] =
    [UniqueKey::Mobile, UniqueKey::Email, UniqueKey::Pancard];

  pub fn as_str(self) -> &'static str {
    match self {
      UniqueKey::Mobile => "mobile",
      UniqueKey::Email => "email",
      UniqueKey::Pancard => "pancard",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|k| k.as_str() == name)
  }
}

impl std::fmt::Display for UniqueKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Payload ─────────────────────────────────────────────────────────────────

/// A record as submitted by a client, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
  pub mobile:        String,
  pub name:          String,
  /// Opaque text; never parsed as a date.
  pub dob:           String,
  pub email:         String,
  #[serde(rename = "employeeType")]
  pub employee_type: String,
  pub pancard:       String,
  /// Undeclared fields, persisted and returned as-is.
  #[serde(flatten)]
  pub extra:         Map<String, Value>,
}

impl NewRecord {
  /// Validate a raw JSON payload against the schema.
  ///
  /// Each declared field must be present and non-empty. Numbers and booleans
  /// are converted to their text form; arrays and objects are rejected. A
  /// client-supplied `_id` is dropped because identifiers belong to the store.
  pub fn from_json(value: Value) -> Result<Self> {
    let Value::Object(mut map) = value else {
      return Err(Error::NotAnObject);
    };

    for field in REQUIRED_FIELDS {
      let value = map.get_mut(field).ok_or(Error::MissingField(field))?;
      // Scalars are stored in their text form.
      let text = match value {
        Value::Null => return Err(Error::MissingField(field)),
        Value::String(s) => std::mem::take(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => return Err(Error::NotScalar(field)),
      };
      if text.is_empty() {
        return Err(Error::MissingField(field));
      }
      *value = Value::String(text);
    }

    map.remove(ID_FIELD);
    Ok(serde_json::from_value(Value::Object(map))?)
  }

  /// The value this record holds for a unique key.
  pub fn key(&self, key: UniqueKey) -> &str {
    match key {
      UniqueKey::Mobile => &self.mobile,
      UniqueKey::Email => &self.email,
      UniqueKey::Pancard => &self.pancard,
    }
  }
}

// ─── Persisted record ────────────────────────────────────────────────────────

/// A persisted record: the submitted fields plus the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  #[serde(rename = "_id")]
  pub id:     Uuid,
  #[serde(flatten)]
  pub fields: NewRecord,
}

impl Record {
  pub fn new(fields: NewRecord) -> Self {
    Self { id: Uuid::new_v4(), fields }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn payload() -> Value {
    json!({
      "mobile":       "9990001111",
      "name":         "A",
      "dob":          "2000-01-01",
      "email":        "a@x.com",
      "employeeType": "staff",
      "pancard":      "ABCDE1234F",
    })
  }

  #[test]
  fn accepts_declared_fields() {
    let rec = NewRecord::from_json(payload()).unwrap();
    assert_eq!(rec.mobile, "9990001111");
    assert_eq!(rec.employee_type, "staff");
    assert!(rec.extra.is_empty());
  }

  #[test]
  fn keeps_undeclared_fields() {
    let mut body = payload();
    body["x"] = json!({ "nested": [1, 2] });
    let rec = NewRecord::from_json(body).unwrap();
    assert_eq!(rec.extra.get("x"), Some(&json!({ "nested": [1, 2] })));

    let out = serde_json::to_value(Record::new(rec)).unwrap();
    assert_eq!(out["x"], json!({ "nested": [1, 2] }));
    assert_eq!(out["employeeType"], "staff");
  }

  #[test]
  fn drops_client_supplied_id() {
    let mut body = payload();
    body["_id"] = json!("mine");
    let rec = NewRecord::from_json(body).unwrap();
    assert!(!rec.extra.contains_key(ID_FIELD));
  }

  #[test]
  fn rejects_missing_and_empty_fields() {
    let mut body = payload();
    body.as_object_mut().unwrap().remove("pancard");
    assert!(matches!(
      NewRecord::from_json(body),
      Err(Error::MissingField("pancard"))
    ));

    let mut body = payload();
    body["email"] = json!("");
    assert!(matches!(
      NewRecord::from_json(body),
      Err(Error::MissingField("email"))
    ));
  }

  #[test]
  fn converts_scalar_fields_to_text() {
    let mut body = payload();
    body["mobile"] = json!(9990001111u64);
    body["employeeType"] = json!(true);
    let rec = NewRecord::from_json(body).unwrap();
    assert_eq!(rec.mobile, "9990001111");
    assert_eq!(rec.employee_type, "true");
  }

  #[test]
  fn rejects_structured_fields() {
    for value in [json!([1, 2]), json!({ "n": 1 })] {
      let mut body = payload();
      body["mobile"] = value;
      assert!(matches!(
        NewRecord::from_json(body),
        Err(Error::NotScalar("mobile"))
      ));
    }
  }

  #[test]
  fn rejects_non_objects() {
    assert!(matches!(
      NewRecord::from_json(json!([1, 2, 3])),
      Err(Error::NotAnObject)
    ));
  }

  #[test]
  fn record_round_trips_through_its_document() {
    let rec = Record::new(NewRecord::from_json(payload()).unwrap());
    let doc = serde_json::to_string(&rec).unwrap();
    let back: Record = serde_json::from_str(&doc).unwrap();
    assert_eq!(back, rec);
    assert!(!back.fields.extra.contains_key(ID_FIELD));
  }
}
