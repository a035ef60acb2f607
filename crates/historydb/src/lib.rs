//! # historydb
//!
//! Persistent lookup-history store: a word-keyed map of rendered
//! definition documents with recency metadata.
//!
//! ## Guarantees
//! - Never holds more than `max_size` records
//! - Eviction removes the least-recently-updated record first
//! - Every mutation is atomic against the persisted file
//! - Malformed persisted records are skipped on load, not fatal

#![warn(missing_docs)]

mod error;
mod record;
mod store;

pub use error::{Error, Result};
pub use record::HistoryRecord;
pub use store::{HistoryStore, DEFAULT_MAX_SIZE};
