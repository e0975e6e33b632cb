//! Durable file-backed cache.

use crate::entry::CacheEntry;
use crate::error::CacheResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Namespace prefix applied to every persisted key.
const KEY_PREFIX: &str = "cave.";

/// File-backed key/value cache with per-entry expiry.
///
/// Each entry is one JSON file holding `{value, expires_at}` text under
/// the cache directory, so entries survive process restarts. Storage
/// failures degrade silently: a failed `set` is logged and dropped, an
/// unreadable entry reads as a miss.
#[derive(Debug, Clone)]
pub struct DurableCache {
    dir: PathBuf,
}

impl DurableCache {
    /// Create a cache over `dir`. The directory is created lazily on the
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Read a value; an expired or unreadable entry is purged and
    /// reported as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key);
        let text = fs::read_to_string(&path).ok()?;

        let entry: CacheEntry<serde_json::Value> = match serde_json::from_str(&text) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(key, error = %e, "Unreadable durable cache entry, purging");
                let _ = fs::remove_file(&path);
                return None;
            }
        };

        if entry.is_expired() {
            let _ = fs::remove_file(&path);
            return None;
        }

        match serde_json::from_value(entry.value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!(key, error = %e, "Durable cache entry has unexpected shape, treating as miss");
                None
            }
        }
    }

    /// Store a value; `ttl = None` means never expire.
    ///
    /// Quota, IO, and serialization failures are logged and swallowed —
    /// a cache write failure must never throw into the caller.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        if let Err(e) = self.try_set(key, value, ttl) {
            warn!(key, error = %e, "Failed to persist durable cache entry, skipping write");
        }
    }

    fn try_set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()> {
        fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry::new(serde_json::to_value(value)?, ttl);
        let text = serde_json::to_string(&entry)?;
        fs::write(self.entry_path(key), text)?;
        Ok(())
    }

    pub fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.entry_path(key));
    }

    /// Drop every entry owned by this cache's namespace.
    pub fn clear_all(&self) {
        let Ok(dir) = fs::read_dir(&self.dir) else {
            return;
        };
        for file in dir.flatten() {
            let name = file.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(sanitize(KEY_PREFIX).as_str()) && name.ends_with(".json") {
                let _ = fs::remove_file(file.path());
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", sanitize(&format!("{KEY_PREFIX}{key}"))))
    }
}

/// Map a logical key to a filesystem-safe file stem.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = DurableCache::new(dir.path());

        cache.set("resource:res_1", &"hello".to_string(), None);
        assert_eq!(cache.get::<String>("resource:res_1"), Some("hello".to_string()));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let cache = DurableCache::new(dir.path());
            cache.set("resource:res_1", &42u32, None);
        }
        let reopened = DurableCache::new(dir.path());
        assert_eq!(reopened.get::<u32>("resource:res_1"), Some(42));
    }

    #[test]
    fn test_expired_entry_is_purged() {
        let dir = TempDir::new().unwrap();
        let cache = DurableCache::new(dir.path());

        cache.set("k", &1u32, Some(Duration::from_millis(10)));
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.get::<u32>("k"), None);
        // The backing file is gone, not just hidden.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(cache.get::<u32>("k"), None);
    }

    #[test]
    fn test_corrupt_entry_reads_as_miss() {
        let dir = TempDir::new().unwrap();
        let cache = DurableCache::new(dir.path());

        cache.set("k", &1u32, None);
        let path = cache.entry_path("k");
        fs::write(&path, "not json").unwrap();

        assert_eq!(cache.get::<u32>("k"), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_and_clear_all() {
        let dir = TempDir::new().unwrap();
        let cache = DurableCache::new(dir.path());

        cache.set("a", &1u32, None);
        cache.set("b", &2u32, None);

        cache.remove("a");
        assert_eq!(cache.get::<u32>("a"), None);
        assert_eq!(cache.get::<u32>("b"), Some(2));

        cache.clear_all();
        assert_eq!(cache.get::<u32>("b"), None);
    }

    #[test]
    fn test_set_failure_is_swallowed() {
        // Point the cache at a path that cannot be a directory.
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("occupied");
        fs::write(&file_path, "x").unwrap();

        let cache = DurableCache::new(&file_path);
        // Must not panic or error; subsequent reads miss.
        cache.set("k", &1u32, None);
        assert_eq!(cache.get::<u32>("k"), None);
    }
}
