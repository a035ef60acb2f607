//! History store implementation
//!
//! File layout:
//! - `history.db`: magic line followed by one JSON record per line
//!
//! Mutations rewrite the whole file through a temp-and-rename cycle, so a
//! reader of the persisted file never observes a partial write.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::RwLock;
use tracing::warn;

use crate::error::{Error, Result};
use crate::record::HistoryRecord;

/// Default maximum number of history records
pub const DEFAULT_MAX_SIZE: usize = 200;

/// Magic first line of the data file
const HISTORY_MAGIC: &str = "historydb v1";

/// Data file name inside the store directory
const DATA_FILE: &str = "history.db";

type RecordMap = HashMap<String, HistoryRecord, RandomState>;

/// HistoryStore is the persistent, bounded word-to-record mapping
pub struct HistoryStore {
    /// Path to the data file
    data_path: PathBuf,

    /// In-memory view of the persisted records
    records: Arc<RwLock<RecordMap>>,

    /// Maximum number of records before eviction
    max_size: usize,
}

impl HistoryStore {
    /// Open or create a store in the given directory
    ///
    /// # Arguments
    /// * `path` - Directory path for the store files
    /// * `max_size` - Record bound; `0` falls back to [`DEFAULT_MAX_SIZE`]
    ///
    /// # Returns
    /// * `Result<HistoryStore>` - Store handle
    pub fn open<P: AsRef<Path>>(path: P, max_size: usize) -> Result<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;

        let data_path = path.join(DATA_FILE);
        let records = if data_path.exists() {
            Self::load(&data_path)?
        } else {
            RecordMap::default()
        };

        let max_size = if max_size == 0 {
            DEFAULT_MAX_SIZE
        } else {
            max_size
        };

        Ok(HistoryStore {
            data_path,
            records: Arc::new(RwLock::new(records)),
            max_size,
        })
    }

    fn load(data_path: &Path) -> Result<RecordMap> {
        let content = fs::read_to_string(data_path)?;
        let mut lines = content.lines();

        match lines.next() {
            Some(HISTORY_MAGIC) => {}
            _ => return Err(Error::Corrupt("missing magic line".to_string())),
        }

        let mut records = RecordMap::default();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryRecord>(line) {
                Ok(record) => {
                    records.insert(record.word.clone(), record);
                }
                Err(e) => {
                    // Bad records are dropped, the rest of the history survives
                    warn!("skipping malformed history record: {}", e);
                }
            }
        }

        Ok(records)
    }

    /// Insert a record for `word`, evicting to the bound first
    ///
    /// Re-inserting an existing word overwrites its document and refreshes
    /// `updated_at`; `created_at` is kept from the existing record.
    ///
    /// # Arguments
    /// * `word` - Trimmed lookup key
    /// * `document` - Canonical rendered definition
    pub fn insert(&self, word: &str, document: &str) -> Result<()> {
        self.insert_at(word, document, now_millis())
    }

    fn insert_at(&self, word: &str, document: &str, now: i64) -> Result<()> {
        let mut records = self.records.write();

        if !records.contains_key(word) {
            // Evict-to-bound on every insert of a new word, so the bound
            // holds even if a previous writer left the store oversized.
            while records.len() >= self.max_size {
                match Self::eviction_candidate(&records) {
                    Some(victim) => {
                        records.remove(&victim);
                    }
                    None => break,
                }
            }
        }

        let created_at = records.get(word).map(|r| r.created_at).unwrap_or(now);
        records.insert(
            word.to_string(),
            HistoryRecord {
                word: word.to_string(),
                document: document.to_string(),
                created_at,
                updated_at: now,
            },
        );

        self.persist(&records)
    }

    /// Least-recently-updated record; ties break by word ordering
    fn eviction_candidate(records: &RecordMap) -> Option<String> {
        records
            .values()
            .min_by(|a, b| {
                a.updated_at
                    .cmp(&b.updated_at)
                    .then_with(|| a.word.cmp(&b.word))
            })
            .map(|r| r.word.clone())
    }

    /// Refresh a record's recency timestamp; no-op if `word` is absent
    ///
    /// Leaves `document` and `created_at` unchanged.
    pub fn touch(&self, word: &str) -> Result<()> {
        self.touch_at(word, now_millis())
    }

    fn touch_at(&self, word: &str, now: i64) -> Result<()> {
        let mut records = self.records.write();

        match records.get_mut(word) {
            Some(record) => {
                record.updated_at = now;
                self.persist(&records)
            }
            None => Ok(()),
        }
    }

    /// Get the record for `word`, if present
    pub fn get(&self, word: &str) -> Option<HistoryRecord> {
        self.records.read().get(word).cloned()
    }

    /// All records, most recently updated first
    ///
    /// Equal timestamps order by word so the listing is deterministic.
    pub fn list_by_recency(&self) -> Vec<HistoryRecord> {
        let records = self.records.read();
        let mut all: Vec<HistoryRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.word.cmp(&b.word))
        });
        all
    }

    /// Delete the record for `word`; no-op if absent
    pub fn remove(&self, word: &str) -> Result<()> {
        let mut records = self.records.write();

        if records.remove(word).is_some() {
            self.persist(&records)
        } else {
            Ok(())
        }
    }

    /// Delete all records
    pub fn clear(&self) -> Result<()> {
        let mut records = self.records.write();
        records.clear();
        self.persist(&records)
    }

    /// Get the number of records in the store
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Get the configured record bound
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Rewrite the data file from the in-memory map
    ///
    /// Records are written sorted by word so identical contents produce
    /// identical files.
    fn persist(&self, records: &RecordMap) -> Result<()> {
        let tmp_path = self.data_path.with_extension("db.tmp");

        let mut sorted: Vec<&HistoryRecord> = records.values().collect();
        sorted.sort_by(|a, b| a.word.cmp(&b.word));

        let mut file = File::create(&tmp_path)?;
        writeln!(file, "{}", HISTORY_MAGIC)?;
        for record in sorted {
            let line = serde_json::to_string(record)?;
            writeln!(file, "{}", line)?;
        }
        file.sync_all()?;

        fs::rename(&tmp_path, &self.data_path)?;
        Ok(())
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
