//! Cache entry with absolute expiry.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A cached value with its expiry instant.
///
/// Expiry is wall-clock milliseconds since the epoch so durable entries
/// stay meaningful across process restarts. `None` means never expire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: Option<u64>,
}

impl<T> CacheEntry<T> {
    /// Build an entry expiring `ttl` from now; `None` never expires.
    pub fn new(value: T, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| now_ms().saturating_add(ttl.as_millis() as u64)),
        }
    }

    /// A read past the expiry is treated as absent.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => now_ms() > expires_at,
            None => false,
        }
    }
}

/// Current wall-clock time in milliseconds since the epoch.
pub(crate) fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
