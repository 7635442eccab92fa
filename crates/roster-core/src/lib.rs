//! Core types and trait definitions for the Roster record service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::RecordStore`] and
//! [`gateway::Connector`]; the HTTP layer drives [`create::create_record`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod create;
pub mod error;
pub mod gateway;
pub mod record;
pub mod store;

pub use error::{Error, Result};
