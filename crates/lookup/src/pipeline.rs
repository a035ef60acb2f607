//! Lookup orchestrator
//!
//! Read-through coordinator over the history store: a hit refreshes the
//! record's recency and serves the stored document unchanged; a miss
//! fetches, normalizes, and inserts before serving. Every lookup yields
//! exactly one renderable document.

use std::sync::Arc;

use historydb::{HistoryRecord, HistoryStore, Result};
use tracing::warn;

use crate::client::{DefinitionSource, FetchOutcome};
use crate::normalize::normalize;

/// Sentinel document for a word the source has no entry for
pub fn not_found_document(word: &str) -> String {
    format!("# {}\n\n## \u{274c} No definition found.", word)
}

/// Sentinel document for a failed fetch
pub fn error_document(word: &str) -> String {
    format!("# {}\n\n## \u{26a0} Lookup failed. Check your connection.", word)
}

/// Read-through definition lookup over a bounded history store
pub struct Lookup<S> {
    store: Arc<HistoryStore>,
    source: Arc<S>,
}

impl<S> Lookup<S>
where
    S: DefinitionSource + Send + Sync + 'static,
{
    /// Create an orchestrator over the given store and definition source
    pub fn new(store: Arc<HistoryStore>, source: S) -> Self {
        Self {
            store,
            source: Arc::new(source),
        }
    }

    /// Look up a word, serving from the store when possible
    ///
    /// A hit never re-fetches. On a miss the fetched-and-normalized
    /// document is inserted before it is served; source misses and
    /// transport failures serve sentinel documents and write nothing.
    ///
    /// # Errors
    /// Only store write failures propagate; the caller then knows the
    /// history was not updated.
    pub async fn lookup(&self, word: &str) -> Result<String> {
        let word = word.trim();
        if word.is_empty() {
            return Ok(not_found_document(word));
        }

        if let Some(record) = self.store.get(word) {
            self.store.touch(word)?;
            return Ok(record.document);
        }

        // The miss path runs detached so the store write still lands if
        // the caller abandons the lookup mid-fetch.
        let store = Arc::clone(&self.store);
        let source = Arc::clone(&self.source);
        let owned = word.to_string();
        let task = tokio::spawn(async move {
            match source.fetch(&owned).await {
                Ok(FetchOutcome::Found(raw)) => {
                    let document = normalize(&owned, &raw);
                    store.insert(&owned, &document)?;
                    Ok(document)
                }
                Ok(FetchOutcome::Miss) => Ok(not_found_document(&owned)),
                Err(e) => {
                    warn!("definition fetch failed for {:?}: {}", owned, e);
                    Ok(error_document(&owned))
                }
            }
        });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                warn!("lookup task failed: {}", e);
                Ok(error_document(word))
            }
        }
    }

    /// All history records, most recently updated first
    pub fn list(&self) -> Vec<HistoryRecord> {
        self.store.list_by_recency()
    }

    /// Delete one history record; no-op if absent
    pub fn remove(&self, word: &str) -> Result<()> {
        self.store.remove(word)
    }

    /// Delete all history records
    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}
