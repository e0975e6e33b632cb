//! Resolved resource metadata.

use crate::ResourceAddress;
use serde::{Deserialize, Serialize};

/// Default divisibility for a fungible resource that does not declare one.
pub const DEFAULT_DIVISIBILITY: u8 = 18;

/// Entity kind as reported by the Gateway's entity details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityType {
    /// Fungible resource; divisibility applies.
    Fungible,
    /// Non-fungible resource; divisibility has no numeric meaning.
    NonFungible,
    /// Anything else, or details missing entirely.
    #[default]
    Unknown,
}

impl EntityType {
    /// Map the Gateway's details `type` discriminator.
    pub fn from_details_kind(kind: Option<&str>) -> Self {
        match kind {
            Some("FungibleResource") => Self::Fungible,
            Some("NonFungibleResource") => Self::NonFungible,
            _ => Self::Unknown,
        }
    }
}

/// Metadata for a resource, resolved from the Gateway and cached durably.
///
/// Immutable once cached; entries are only replaced by manual invalidation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    pub address: ResourceAddress,
    /// Explicit `name` metadata, if the resource declares one.
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub icon_url: Option<String>,
    pub description: Option<String>,
    pub entity_type: EntityType,
    /// Declared decimal places, 0..=18. `None` for non-fungibles and for
    /// entities whose details were missing.
    pub divisibility: Option<u8>,
}

impl ResourceMetadata {
    /// Placeholder metadata for an address the Gateway returned nothing for.
    pub fn unknown(address: ResourceAddress) -> Self {
        Self {
            address,
            name: None,
            symbol: None,
            icon_url: None,
            description: None,
            entity_type: EntityType::Unknown,
            divisibility: None,
        }
    }

    /// Display name: the explicit `name` metadata when present, else a
    /// shortened form of the address.
    ///
    /// The fallback is computed here and never cached as `name`, so an
    /// explicit name takes precedence once the resource declares one.
    pub fn display_name(&self, prefix_len: usize, suffix_len: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.address.shorten(prefix_len, suffix_len),
        }
    }

    /// Divisibility with the fungible default applied.
    pub fn divisibility_or_default(&self) -> u8 {
        self.divisibility.unwrap_or(DEFAULT_DIVISIBILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(name: Option<&str>) -> ResourceMetadata {
        ResourceMetadata {
            address: ResourceAddress::new("resource_rdx1qqqqqqqqqqqqqpppppppppp"),
            name: name.map(String::from),
            symbol: None,
            icon_url: None,
            description: None,
            entity_type: EntityType::Fungible,
            divisibility: None,
        }
    }

    #[test]
    fn test_display_name_prefers_explicit_name() {
        let md = metadata(Some("Cave Token"));
        assert_eq!(md.display_name(6, 6), "Cave Token");
    }

    #[test]
    fn test_display_name_falls_back_to_shortened_address() {
        let md = metadata(None);
        assert_eq!(md.display_name(6, 6), "resour...pppppp");
        // Fallback is computed, not stored.
        assert!(md.name.is_none());
    }

    #[test]
    fn test_divisibility_default() {
        let md = metadata(None);
        assert_eq!(md.divisibility_or_default(), 18);

        let mut zero = metadata(None);
        zero.divisibility = Some(0);
        assert_eq!(zero.divisibility_or_default(), 0);
    }

    #[test]
    fn test_entity_type_from_details_kind() {
        assert_eq!(
            EntityType::from_details_kind(Some("FungibleResource")),
            EntityType::Fungible
        );
        assert_eq!(
            EntityType::from_details_kind(Some("NonFungibleResource")),
            EntityType::NonFungible
        );
        assert_eq!(EntityType::from_details_kind(None), EntityType::Unknown);
        assert_eq!(
            EntityType::from_details_kind(Some("Component")),
            EntityType::Unknown
        );
    }
}
