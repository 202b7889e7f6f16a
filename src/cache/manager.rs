//! Cache manager for persisting forecast responses to disk
//!
//! Provides a `CacheManager` that stores validated forecast snapshots as JSON
//! files stamped with their creation time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::{SnapshotError, WeatherSnapshot};

/// How long a cached forecast stays fresh
pub const FRESHNESS_WINDOW_SECS: i64 = 60 * 60;

/// Directory name under the system temp dir shared by all invocations
const CACHE_DIR_NAME: &str = "weather-cache";

/// Errors that can occur when storing a forecast
#[derive(Debug, Error)]
pub enum CacheError {
    /// The payload is not a well-formed forecast; nothing was written
    #[error("refusing to cache malformed payload: {0}")]
    InvalidPayload(#[from] SnapshotError),

    /// The entry could not be encoded
    #[error("failed to encode cache entry: {0}")]
    Encode(#[source] serde_json::Error),

    /// Directory creation or file write failed
    #[error("failed to write cache file: {0}")]
    Io(#[from] std::io::Error),
}

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// When the data was cached
    timestamp: DateTime<Utc>,
    /// The cached data
    data: T,
}

/// Manages reading and writing cached forecasts to disk
///
/// Each key maps to `<cache_dir>/<key>.json`. There is no locking: when two
/// processes write the same key, the last completed write wins.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// Maximum age of an entry still served by `lookup`
    freshness: Duration,
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheManager {
    /// Creates a new CacheManager using `<temp dir>/weather-cache`
    pub fn new() -> Self {
        Self::with_dir(std::env::temp_dir().join(CACHE_DIR_NAME))
    }

    /// Creates a new CacheManager with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            freshness: Duration::seconds(FRESHNESS_WINDOW_SECS),
        }
    }

    /// Overrides the freshness window
    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Directory where cache files are stored
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Reads a fresh forecast from the cache
    ///
    /// Returns `None` if the entry doesn't exist, cannot be parsed, or is
    /// older than the freshness window.
    pub fn lookup(&self, key: &str) -> Option<WeatherSnapshot> {
        self.lookup_at(key, Utc::now())
    }

    /// Reads a forecast from the cache as if the current time were `now`
    ///
    /// An entry exactly as old as the freshness window is still fresh.
    pub fn lookup_at(&self, key: &str, now: DateTime<Utc>) -> Option<WeatherSnapshot> {
        let path = self.cache_path(key);
        let content = fs::read(&path).ok()?;

        let entry: CacheEntry<WeatherSnapshot> = match serde_json::from_slice(&content) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Ignoring unreadable cache file {}: {}", path.display(), e);
                return None;
            }
        };

        let age = now.signed_duration_since(entry.timestamp);
        if age > self.freshness {
            tracing::debug!(key, age_secs = age.num_seconds(), "Cache entry is stale");
            return None;
        }

        Some(entry.data)
    }

    /// Validates a raw forecast body and writes it to the cache
    ///
    /// The payload is decoded before anything touches the disk, so a malformed
    /// body leaves any existing entry for `key` as it was.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(CacheError::InvalidPayload)` if the body does not decode
    /// * `Err(CacheError::Io)` if directory creation or file writing fails
    pub fn store(&self, key: &str, raw_payload: &[u8]) -> Result<(), CacheError> {
        let snapshot = WeatherSnapshot::from_slice(raw_payload)?;
        self.store_snapshot_at(key, &snapshot, Utc::now())
    }

    /// Writes an already-decoded snapshot stamped with `timestamp`
    fn store_snapshot_at(
        &self,
        key: &str,
        snapshot: &WeatherSnapshot,
        timestamp: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let entry = CacheEntry {
            timestamp,
            data: snapshot,
        };
        let json = serde_json::to_vec(&entry).map_err(CacheError::Encode)?;

        self.ensure_dir()?;
        fs::write(self.cache_path(key), json)?;
        Ok(())
    }
}
