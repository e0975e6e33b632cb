//! Two-tier caching for the cave vault client.
//!
//! - `DurableCache`: file-backed key/value store with per-entry expiry,
//!   survives process restarts. Holds resource metadata.
//! - `SessionCache`: in-memory store scoped to one connected-account
//!   session, cleared in full on account switch or disconnect. Holds
//!   account holdings and vault-token discovery results.
//!
//! Cache failures never reach callers: writes are logged and swallowed,
//! reads degrade to a miss.

pub mod durable;
pub mod entry;
pub mod error;
pub mod keys;
pub mod session;

pub use durable::DurableCache;
pub use entry::CacheEntry;
pub use error::CacheError;
pub use keys::{fungibles_key, nfts_key, resource_key, CAVE_TOKENS_KEY};
pub use session::SessionCache;
