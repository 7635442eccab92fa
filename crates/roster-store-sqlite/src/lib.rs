//! SQLite backend for the Roster record store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Records are stored as JSON documents;
//! the three unique keys are lifted into indexed columns.

mod connect;
mod encode;
mod schema;
mod store;

pub mod error;

pub use connect::SqliteConnector;
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
