//! History record model

use serde::{Deserialize, Serialize};

/// One cached word-to-document mapping with recency metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Trimmed lookup key, unique within the store
    pub word: String,

    /// Canonical rendered definition document
    pub document: String,

    /// Epoch millis, set once at first insertion
    pub created_at: i64,

    /// Epoch millis, refreshed on every cache hit
    pub updated_at: i64,
}
