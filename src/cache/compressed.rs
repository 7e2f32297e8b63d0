//! Compressed JSON disk cache.
//!
//! Persists JSON-serializable values keyed by opaque string, one gzip
//! compressed file per key, with two independent eviction policies:
//! entries older than `max_age_days` are expired lazily on access, and
//! after each write the oldest entries (by file modification time) are
//! deleted until at most `max_entries` remain.
//!
//! Reads never raise: a missing, expired, or corrupt entry degrades to
//! a miss and the value is recomputed. Writes go through a temp file
//! and an atomic rename so a concurrent reader never observes a
//! partially written entry.

use std::fs;
use std::future::Future;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, error, warn};

use super::types::{CacheConfig, CacheError};

/// Filename suffix of every cache entry.
const ENTRY_SUFFIX: &str = ".json.gz";

/// Disk cache of gzip-compressed JSON values.
pub struct CompressedJsonCache {
    config: CacheConfig,
}

impl CompressedJsonCache {
    /// Create a cache over the configured directory, creating the
    /// directory if it does not exist.
    pub fn new(config: CacheConfig) -> Result<Self, CacheError> {
        if !config.cache_dir.exists() {
            fs::create_dir_all(&config.cache_dir)?;
        }
        Ok(Self { config })
    }

    /// Look up `key`, computing and persisting the value on a miss.
    ///
    /// `compute` runs only when no fresh, readable entry exists. A
    /// `None` compute result is returned as-is and never cached, so a
    /// transient failure is retried on the next request. A persistence
    /// failure is logged and the computed value is still returned.
    pub async fn get<T, F, Fut>(&self, key: &str, compute: F) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let path = self.entry_path(key);

        if let Some(value) = self.read_entry(&path) {
            debug!(key, "cache hit");
            return Some(value);
        }

        let value = compute().await?;

        if let Err(e) = self.write_entry(&path, &value) {
            error!(key, error = %e, "failed to persist cache entry");
        } else if let Err(e) = self.enforce_entry_limit() {
            warn!(error = %e, "cache eviction failed");
        }

        Some(value)
    }

    /// Count the entries currently on disk.
    pub fn entry_count(&self) -> usize {
        fs::read_dir(&self.config.cache_dir)
            .map(|dir| dir.flatten().filter(|e| is_entry(&e.path())).count())
            .unwrap_or(0)
    }

    /// Delete every entry.
    pub fn clear(&self) -> Result<(), CacheError> {
        for entry in fs::read_dir(&self.config.cache_dir)? {
            let path = entry?.path();
            if is_entry(&path) {
                let _ = fs::remove_file(&path);
            }
        }
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.config.cache_dir.join(format!("{key}{ENTRY_SUFFIX}"))
    }

    /// Read and decode one entry. Any failure degrades to a miss.
    fn read_entry<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let metadata = fs::metadata(path).ok()?;
        if self.is_expired(&metadata) {
            // Lazy max-age eviction: drop the stale file now so it no
            // longer counts toward the entry limit even if the
            // recompute fails.
            debug!(path = %path.display(), "cache entry expired");
            let _ = fs::remove_file(path);
            return None;
        }

        let file = fs::File::open(path).ok()?;
        match serde_json::from_reader(GzDecoder::new(BufReader::new(file))) {
            Ok(value) => Some(value),
            Err(e) => {
                // Corrupt compressed stream or corrupt JSON; drop the
                // entry so the next write replaces it cleanly.
                warn!(path = %path.display(), error = %e, "discarding corrupt cache entry");
                let _ = fs::remove_file(path);
                None
            }
        }
    }

    fn is_expired(&self, metadata: &fs::Metadata) -> bool {
        if self.config.max_age_days <= 0 {
            return true;
        }
        let max_age = Duration::from_secs(self.config.max_age_days as u64 * 24 * 60 * 60);
        match metadata
            .modified()
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        {
            Some(age) => age > max_age,
            // Unreadable or future mtime: keep the entry
            None => false,
        }
    }

    /// Serialize, compress, and atomically move the entry into place.
    fn write_entry<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), CacheError> {
        let mut tmp = NamedTempFile::new_in(&self.config.cache_dir)?;

        let mut encoder = GzEncoder::new(tmp.as_file_mut(), Compression::default());
        serde_json::to_writer(&mut encoder, value)?;
        encoder.finish()?;

        tmp.persist(path).map_err(|e| CacheError::Io(e.error))?;
        Ok(())
    }

    /// Delete oldest entries (by mtime) until at most `max_entries`
    /// remain.
    fn enforce_entry_limit(&self) -> Result<(), CacheError> {
        let mut entries: Vec<(PathBuf, SystemTime)> = Vec::new();
        for entry in fs::read_dir(&self.config.cache_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !is_entry(&path) {
                continue;
            }
            if let Ok(modified) = entry.metadata().and_then(|m| m.modified()) {
                entries.push((path, modified));
            }
        }

        if entries.len() <= self.config.max_entries {
            return Ok(());
        }

        // Oldest first
        entries.sort_by_key(|(_, modified)| *modified);
        let excess = entries.len() - self.config.max_entries;

        let mut deleted = 0usize;
        for (path, _) in entries.into_iter().take(excess) {
            match fs::remove_file(&path) {
                Ok(()) => deleted += 1,
                // Another process may have removed it already
                Err(e) => debug!(path = %path.display(), error = %e, "eviction delete failed"),
            }
        }

        debug!(
            deleted,
            limit = self.config.max_entries,
            "evicted oldest cache entries"
        );
        Ok(())
    }
}

fn is_entry(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(ENTRY_SUFFIX))
}
