//! JSON file cache for live provider lookups.
//!
//! The cache is a single JSON object mapping a cache key to an entry of the
//! form `{"data": ..., "timestamp": <unix seconds>, "source": "..."}`. It is
//! loaded once when the cache is opened and written back after every insert.
//! Disk problems never surface to callers: a missing or corrupt file starts an
//! empty cache and a failed write only costs the persistence of that entry.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::MarketDataError;

/// A single cached value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub data: Value,
    /// Unix timestamp (seconds, fractional) of when the entry was written.
    pub timestamp: f64,
    /// Where the cached value came from (e.g., "builtin_mapping").
    pub source: String,
}

/// File-backed key/value cache with a fixed time-to-live.
pub struct FileCache {
    path: PathBuf,
    ttl: Duration,
    entries: Mutex<BTreeMap<String, CacheEntry>>,
}

impl FileCache {
    /// Open the cache at `path`, loading any entries already on disk.
    pub fn open(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        let path = path.into();
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Starting with an empty provider cache: {}", e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            ttl,
            entries: Mutex::new(entries),
        }
    }

    fn load(path: &Path) -> Result<BTreeMap<String, CacheEntry>, MarketDataError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| MarketDataError::Cache(format!("read {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| MarketDataError::Cache(format!("parse {}: {}", path.display(), e)))
    }

    fn save(&self, entries: &BTreeMap<String, CacheEntry>) -> Result<(), MarketDataError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| MarketDataError::Cache(e.to_string()))?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| MarketDataError::Cache(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| MarketDataError::Cache(e.to_string()))
    }

    /// Lock the entries, recovering from poison if necessary.
    fn lock_entries(&self) -> MutexGuard<'_, BTreeMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Provider cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Current Unix time in fractional seconds.
    pub fn now_timestamp() -> f64 {
        Utc::now().timestamp_millis() as f64 / 1000.0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// True if `key` exists and is younger than the TTL.
    pub fn is_valid(&self, key: &str) -> bool {
        self.get_valid(key).is_some()
    }

    /// Return the entry for `key` if it is still fresh.
    pub fn get_valid(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.lock_entries();
        let entry = entries.get(key)?;
        let age = Self::now_timestamp() - entry.timestamp;
        if age < self.ttl.as_secs_f64() {
            Some(entry.clone())
        } else {
            None
        }
    }

    /// Store `data` under `key`, stamped with the current time.
    pub fn insert(&self, key: &str, data: Value, source: &str) {
        self.insert_with_timestamp(key, data, source, Self::now_timestamp());
    }

    /// Store `data` under `key` with an explicit timestamp.
    ///
    /// Back-dating the timestamp shortens the entry's effective lifetime.
    pub fn insert_with_timestamp(&self, key: &str, data: Value, source: &str, timestamp: f64) {
        let mut entries = self.lock_entries();
        entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                timestamp,
                source: source.to_string(),
            },
        );
        if let Err(e) = self.save(&entries) {
            debug!("Failed to persist provider cache: {}", e);
        }
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
