//! Session-scoped in-memory cache.

use crate::entry::CacheEntry;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// In-memory key/value cache with per-entry expiry, scoped to one
/// connected-account session.
///
/// Values are stored as JSON so one cache serves heterogeneous result
/// types (holdings, collections, discovery lists). Synchronous by
/// contract; the map handles concurrent access.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: DashMap<String, CacheEntry<serde_json::Value>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value; an expired entry is purged and reported as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                drop(entry);
                self.entries.remove(key);
                return None;
            }
            Some(entry) => entry.value.clone(),
            None => return None,
        };

        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key, error = %e, "Session cache entry has unexpected shape, treating as miss");
                None
            }
        }
    }

    /// Store a value; `ttl = None` means never expire.
    ///
    /// A serialization failure is logged and the entry is left unset —
    /// cache write failures never reach the caller.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        match serde_json::to_value(value) {
            Ok(json) => {
                self.entries.insert(key.to_string(), CacheEntry::new(json, ttl));
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize session cache entry, skipping write");
            }
        }
    }

    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry. Called on account switch or disconnect.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
