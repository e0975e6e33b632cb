//! Core domain types for the cave vault client.
//!
//! This crate provides fundamental types used throughout the system:
//! - `ResourceAddress`, `AccountAddress`: typed ledger addresses
//! - `Amount`: precision-safe decimal token amount
//! - `NftId`: non-fungible local id variants with canonical text form
//! - `ResourceMetadata`: resolved token metadata
//! - `FungibleHolding`, `NonFungibleCollection`: account holdings
//! - `VaultBalanceSnapshot`: per-resource vault balances from a preview

pub mod address;
pub mod amount;
pub mod error;
pub mod holdings;
pub mod metadata;
pub mod nft;
pub mod snapshot;

pub use address::{AccountAddress, ResourceAddress};
pub use amount::Amount;
pub use error::{CoreError, Result};
pub use holdings::{FungibleHolding, NonFungibleCollection};
pub use metadata::{EntityType, ResourceMetadata};
pub use nft::NftId;
pub use snapshot::VaultBalanceSnapshot;
