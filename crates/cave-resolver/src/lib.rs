//! Cache-first resolvers over the Gateway client.
//!
//! - `MetadataResolver`: batched resource metadata behind the durable cache
//! - `HoldingsResolver`: account fungibles and non-fungible collections
//!   behind the session cache
//! - `VaultTokenDiscovery`: resource addresses known to the shared vault
//!   store
//! - `ReconciliationEngine`: optimistic balance corrections and cache
//!   invalidation after a confirmed transaction

pub mod discovery;
pub mod error;
pub mod holdings;
pub mod metadata;
pub mod reconcile;

pub use discovery::VaultTokenDiscovery;
pub use error::{ResolverError, ResolverResult};
pub use holdings::{HoldingsResolver, NftIdBatch};
pub use metadata::MetadataResolver;
pub use reconcile::{ReconciliationEngine, TokenMovement, VaultOperation};
