//! Core types for the cache module.

use std::path::PathBuf;

use thiserror::Error;

/// Cache-related errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error during cache operations
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry could not be serialized to JSON
    #[error("cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Disk cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Directory holding one `<key>.json.gz` file per entry
    pub cache_dir: PathBuf,
    /// Entries older than this many days are expired on access.
    /// Zero or negative means no entry is ever returned from disk.
    pub max_age_days: i64,
    /// Maximum number of entries kept on disk; oldest are evicted
    /// after each write
    pub max_entries: usize,
}

impl CacheConfig {
    /// Create a cache configuration with default limits
    /// (7 days, 100,000 entries).
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            max_age_days: 7,
            max_entries: 100_000,
        }
    }

    /// Set the maximum entry age in days.
    pub fn with_max_age_days(mut self, days: i64) -> Self {
        self.max_age_days = days;
        self
    }

    /// Set the maximum entry count.
    pub fn with_max_entries(mut self, entries: usize) -> Self {
        self.max_entries = entries;
        self
    }
}
