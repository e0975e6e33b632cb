//! Cache key builders.
//!
//! Session keys are scoped per account so an account switch (which clears
//! the session cache wholesale) can never leak holdings between accounts.

use cave_core::{AccountAddress, ResourceAddress};

/// Fixed session key for the vault-token discovery result.
pub const CAVE_TOKENS_KEY: &str = "cave_tokens";

/// Session key for an account's fungible holdings.
pub fn fungibles_key(account: &AccountAddress) -> String {
    format!("fungibles:{account}")
}

/// Session key for an account's non-fungible collections.
pub fn nfts_key(account: &AccountAddress) -> String {
    format!("nfts:{account}")
}

/// Durable key for a resource's metadata.
pub fn resource_key(resource: &ResourceAddress) -> String {
    format!("resource:{resource}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        let account = AccountAddress::new("account_rdx12abc");
        let resource = ResourceAddress::new("resource_rdx1tkn");

        assert_eq!(fungibles_key(&account), "fungibles:account_rdx12abc");
        assert_eq!(nfts_key(&account), "nfts:account_rdx12abc");
        assert_eq!(resource_key(&resource), "resource:resource_rdx1tkn");
    }
}
