//! Typed ledger addresses.
//!
//! Thin string newtypes that prevent mixing resource addresses with
//! account addresses in resolver and cache signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Global address of a resource (token) on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceAddress(pub String);

impl ResourceAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shorten for display: a prefix and suffix joined by an ellipsis.
    ///
    /// Used as the display-name fallback for resources with no explicit
    /// `name` metadata. Addresses shorter than the requested window are
    /// returned whole.
    pub fn shorten(&self, prefix_len: usize, suffix_len: usize) -> String {
        shorten(&self.0, prefix_len, suffix_len)
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Global address of an account on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(pub String);

impl AccountAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

fn shorten(s: &str, prefix_len: usize, suffix_len: usize) -> String {
    if s.len() <= prefix_len + suffix_len {
        return s.to_string();
    }
    format!("{}...{}", &s[..prefix_len], &s[s.len() - suffix_len..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_long_address() {
        let addr = ResourceAddress::new("resource_rdx1tknxxxxxxxxxradxrdxxxxxxxxx009923554798xxxxxxxxxradxrd");
        assert_eq!(addr.shorten(8, 6), "resource...radxrd");
    }

    #[test]
    fn test_shorten_short_address_returned_whole() {
        let addr = ResourceAddress::new("res_1");
        assert_eq!(addr.shorten(8, 6), "res_1");
    }
}
