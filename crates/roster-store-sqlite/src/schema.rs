//! SQL schema for the Roster SQLite store.
//!
//! Executed once when a connection is opened. Future migrations will be gated
//! on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per record. `document` holds the full JSON record, including
-- undeclared fields. The unique keys are copied out so the indexes below can
-- reject collisions atomically.
CREATE TABLE IF NOT EXISTS records (
    record_id   TEXT PRIMARY KEY,
    mobile      TEXT NOT NULL,
    email       TEXT NOT NULL,
    pancard     TEXT NOT NULL,
    document    TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE UNIQUE INDEX IF NOT EXISTS records_mobile_key  ON records(mobile);
CREATE UNIQUE INDEX IF NOT EXISTS records_email_key   ON records(email);
CREATE UNIQUE INDEX IF NOT EXISTS records_pancard_key ON records(pancard);

PRAGMA user_version = 1;
";
