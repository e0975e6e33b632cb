//! Wiring for the cave vault client.
//!
//! Builds the component graph from configuration — rate limiter,
//! Gateway client, caches, resolvers, reconciliation — and exposes the
//! operations the UI layer consumes.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod wallet;

pub use app::CaveApp;
pub use config::{AddressDisplayConfig, AppConfig, CacheTtlConfig, RateLimitConfig};
pub use error::{AppError, AppResult};
pub use logging::init_logging;
pub use wallet::{TransactionResult, TransactionStatus, TransferRequest, WalletConnector, WalletError};
