//! Rate-limited Gateway API client.
//!
//! The Gateway is the external read API indexing the ledger; it is the
//! sole source of remote truth for this client. This crate provides:
//! - `RateLimiter`: fixed-window budget every outbound request passes
//! - `GatewayClient`: JSON-over-POST request execution with typed errors
//!   and the cursor pagination protocol
//! - `BalancePreviewEngine`: dry-run execution and balance decoding

pub mod client;
pub mod error;
pub mod models;
pub mod preview;
pub mod rate_limiter;

pub use client::{collect_all_pages, GatewayApi, GatewayClient};
pub use error::{GatewayError, GatewayResult};
pub use models::{
    EntityDetailsItem, EntityDetailsRequest, EntityDetailsResponse, FungibleResourcesItem,
    GatewayStatusResponse, KeyValueStoreKeyItem, NonFungibleResourcesItem, NonFungibleVaultItem,
    Page, PreviewFlags, PreviewReceipt, ProgrammaticValue, TransactionPreviewRequest,
    TransactionPreviewResponse, VariantId,
};
pub use preview::{decode_balances, BalancePreviewEngine, STATUS_SUCCEEDED};
pub use rate_limiter::RateLimiter;
