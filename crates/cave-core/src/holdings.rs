//! Account holdings as returned by the holdings resolver.

use crate::{Amount, NftId, ResourceAddress, ResourceMetadata};
use serde::{Deserialize, Serialize};

/// One fungible resource held by an account, merged with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FungibleHolding {
    pub resource_address: ResourceAddress,
    pub amount: Amount,
    pub metadata: ResourceMetadata,
}

/// One (resource, vault) pair of non-fungibles held by an account.
///
/// An account may hold the same collection across several vaults; each
/// vault becomes its own record. `nf_ids` may be a strict prefix of the
/// vault's ids — a non-null `next_cursor` signals more exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonFungibleCollection {
    pub resource_address: ResourceAddress,
    pub vault_address: String,
    /// Total ids in this vault, which may exceed `nf_ids.len()`.
    pub total_count: u64,
    pub nf_ids: Vec<NftId>,
    /// Continuation cursor for the vault's id listing, if any.
    pub next_cursor: Option<String>,
    pub metadata: ResourceMetadata,
}

impl NonFungibleCollection {
    /// Whether every id in the vault has been fetched.
    pub fn is_complete(&self) -> bool {
        self.next_cursor.is_none()
    }
}
