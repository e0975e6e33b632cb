//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gateway root URL.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Address of the shared vault key/value store. Must be set.
    #[serde(default)]
    pub vault_store_address: String,
    /// Cache TTLs.
    #[serde(default)]
    pub cache_ttl: CacheTtlConfig,
    /// Gateway rate limiting.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Shortened-address display windows.
    #[serde(default)]
    pub address_display: AddressDisplayConfig,
    /// Directory for the durable cache.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
}

fn default_gateway_url() -> String {
    "https://mainnet.radixdlt.com".to_string()
}

fn default_cache_dir() -> String {
    "./data/cache".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            vault_store_address: String::new(),
            cache_ttl: CacheTtlConfig::default(),
            rate_limit: RateLimitConfig::default(),
            address_display: AddressDisplayConfig::default(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration: `CAVE_CONFIG` env var, else the default path.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("CAVE_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}

/// Cache TTL configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheTtlConfig {
    /// Resource metadata TTL (ms). Absent means never expire —
    /// metadata is treated as immutable.
    #[serde(default)]
    pub resource_metadata_ms: Option<u64>,
    /// Account holdings / vault discovery TTL (ms). Default: 60,000.
    #[serde(default = "default_account_resources_ms")]
    pub account_resources_ms: u64,
}

fn default_account_resources_ms() -> u64 {
    60_000
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            resource_metadata_ms: None,
            account_resources_ms: default_account_resources_ms(),
        }
    }
}

impl CacheTtlConfig {
    pub fn resource_metadata(&self) -> Option<Duration> {
        self.resource_metadata_ms.map(Duration::from_millis)
    }

    pub fn account_resources(&self) -> Option<Duration> {
        Some(Duration::from_millis(self.account_resources_ms))
    }
}

/// Gateway rate limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum requests per window. Default: 5.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Window size (ms). Default: 1,000.
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_ms() -> u64 {
    1_000
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Shortened-address display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDisplayConfig {
    /// Leading characters to keep. Default: 6.
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,
    /// Trailing characters to keep. Default: 6.
    #[serde(default = "default_suffix_len")]
    pub suffix_len: usize,
}

fn default_prefix_len() -> usize {
    6
}

fn default_suffix_len() -> usize {
    6
}

impl Default for AddressDisplayConfig {
    fn default() -> Self {
        Self {
            prefix_len: default_prefix_len(),
            suffix_len: default_suffix_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_ms, 1_000);
        assert_eq!(config.cache_ttl.account_resources_ms, 60_000);
        // Metadata never expires unless configured.
        assert!(config.cache_ttl.resource_metadata().is_none());
        assert!(config.vault_store_address.is_empty());
    }

    #[test]
    fn test_parse_partial_toml_applies_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            vault_store_address = "internal_keyvaluestore_rdx1store"

            [rate_limit]
            max_requests = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.vault_store_address, "internal_keyvaluestore_rdx1store");
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_ms, 1_000);
        assert_eq!(config.address_display.prefix_len, 6);
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("gateway_url"));

        let back: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.gateway_url, config.gateway_url);
    }
}
