//! Vault balance snapshot from a dry-run preview.

use crate::{Amount, ResourceAddress};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-resource vault balances decoded from a preview receipt.
///
/// `None` means the vault has no record for the resource, which is
/// distinct from a real zero balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultBalanceSnapshot {
    balances: HashMap<ResourceAddress, Option<Amount>>,
}

impl VaultBalanceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: ResourceAddress, balance: Option<Amount>) {
        self.balances.insert(resource, balance);
    }

    /// Known balance for a resource. Outer `None`: resource not in the
    /// snapshot at all; inner `None`: snapshot says "no vault record".
    pub fn get(&self, resource: &ResourceAddress) -> Option<&Option<Amount>> {
        self.balances.get(resource)
    }

    pub fn get_mut(&mut self, resource: &ResourceAddress) -> Option<&mut Option<Amount>> {
        self.balances.get_mut(resource)
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceAddress, &Option<Amount>)> {
        self.balances.iter()
    }

    pub fn clear(&mut self) {
        self.balances.clear();
    }
}
