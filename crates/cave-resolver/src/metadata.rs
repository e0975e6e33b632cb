//! Resource metadata resolution.
//!
//! Cache-first: addresses already in the durable cache are never
//! re-fetched, even across unrelated calls. The remainder goes to the
//! Gateway in exactly one batched details call.

use crate::error::ResolverResult;
use cave_cache::{resource_key, DurableCache};
use cave_core::metadata::DEFAULT_DIVISIBILITY;
use cave_core::{EntityType, ResourceAddress, ResourceMetadata};
use cave_gateway::client::GatewayApi;
use cave_gateway::models::{EntityDetailsOptIns, EntityDetailsRequest};
use cave_gateway::EntityDetailsItem;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Resolves resource metadata through the durable cache.
pub struct MetadataResolver<G> {
    gateway: Arc<G>,
    durable: Arc<DurableCache>,
    /// TTL for cached metadata; `None` never expires (metadata is
    /// treated as immutable, invalidated manually if ever).
    ttl: Option<Duration>,
}

impl<G: GatewayApi> MetadataResolver<G> {
    pub fn new(gateway: Arc<G>, durable: Arc<DurableCache>, ttl: Option<Duration>) -> Self {
        Self { gateway, durable, ttl }
    }

    /// Resolve metadata for a set of addresses.
    ///
    /// Duplicates are collapsed. Addresses the Gateway returns nothing
    /// for are absent from the result; callers decide their fallback.
    pub async fn resolve(
        &self,
        addresses: &[ResourceAddress],
    ) -> ResolverResult<HashMap<ResourceAddress, ResourceMetadata>> {
        let mut resolved = HashMap::new();
        let mut uncached = Vec::new();
        let mut seen = HashSet::new();

        for address in addresses {
            if !seen.insert(address.clone()) {
                continue;
            }
            match self.durable.get::<ResourceMetadata>(&resource_key(address)) {
                Some(metadata) => {
                    resolved.insert(address.clone(), metadata);
                }
                None => uncached.push(address.clone()),
            }
        }

        if uncached.is_empty() {
            return Ok(resolved);
        }

        debug!(
            cached = resolved.len(),
            uncached = uncached.len(),
            "Fetching metadata for uncached resources"
        );

        let request = EntityDetailsRequest {
            addresses: uncached.iter().map(ToString::to_string).collect(),
            opt_ins: EntityDetailsOptIns::default(),
        };
        let response = self.gateway.entity_details(&request).await?;

        for item in &response.items {
            let metadata = metadata_from_item(item);
            self.durable
                .set(&resource_key(&metadata.address), &metadata, self.ttl);
            resolved.insert(metadata.address.clone(), metadata);
        }

        Ok(resolved)
    }
}

/// Build metadata from one entity details item.
///
/// Only typed key/value pairs with a defined value populate the output.
/// Divisibility: 18 unless the detail record is a fungible resource
/// declaring its own (0 counts as declared); non-fungibles carry none.
fn metadata_from_item(item: &EntityDetailsItem) -> ResourceMetadata {
    let mut name = None;
    let mut symbol = None;
    let mut icon_url = None;
    let mut description = None;

    if let Some(collection) = &item.explicit_metadata {
        for pair in &collection.items {
            let Some(value) = pair.defined_value() else {
                continue;
            };
            match pair.key.as_str() {
                "name" => name = Some(value.to_string()),
                "symbol" => symbol = Some(value.to_string()),
                "icon_url" => icon_url = Some(value.to_string()),
                "description" => description = Some(value.to_string()),
                _ => {}
            }
        }
    }

    let details = item.details.as_ref();
    let entity_type = EntityType::from_details_kind(details.and_then(|d| d.kind.as_deref()));
    let divisibility = match entity_type {
        EntityType::Fungible => Some(
            details
                .and_then(|d| d.divisibility)
                .unwrap_or(DEFAULT_DIVISIBILITY),
        ),
        _ => None,
    };

    ResourceMetadata {
        address: ResourceAddress::new(item.address.clone()),
        name,
        symbol,
        icon_url,
        description,
        entity_type,
        divisibility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: &str) -> EntityDetailsItem {
        serde_json::from_str(json).expect("item fixture")
    }

    #[test]
    fn test_metadata_from_full_item() {
        let item = item(
            r#"{
                "address": "resource_rdx1tkn",
                "explicit_metadata": {"items": [
                    {"key": "name", "value": {"typed": {"value": "Cave Token"}}},
                    {"key": "symbol", "value": {"typed": {"value": "CAVE"}}},
                    {"key": "icon_url", "value": {"typed": {"value": "https://cave.example/icon.png"}}},
                    {"key": "tags", "value": {"typed": {}}}
                ]},
                "details": {"type": "FungibleResource", "divisibility": 6}
            }"#,
        );
        let metadata = metadata_from_item(&item);

        assert_eq!(metadata.name.as_deref(), Some("Cave Token"));
        assert_eq!(metadata.symbol.as_deref(), Some("CAVE"));
        assert_eq!(metadata.entity_type, EntityType::Fungible);
        assert_eq!(metadata.divisibility, Some(6));
        // Undefined typed values are dropped, not recorded as empty.
        assert!(metadata.description.is_none());
    }

    #[test]
    fn test_fungible_divisibility_defaults_to_18() {
        let item = item(
            r#"{"address": "resource_rdx1tkn", "details": {"type": "FungibleResource"}}"#,
        );
        assert_eq!(metadata_from_item(&item).divisibility, Some(18));
    }

    #[test]
    fn test_fungible_divisibility_zero_is_respected() {
        let item = item(
            r#"{"address": "resource_rdx1tkn",
                "details": {"type": "FungibleResource", "divisibility": 0}}"#,
        );
        assert_eq!(metadata_from_item(&item).divisibility, Some(0));
    }

    #[test]
    fn test_non_fungible_has_no_divisibility() {
        let item = item(
            r#"{"address": "resource_rdx1nft",
                "details": {"type": "NonFungibleResource", "divisibility": 7}}"#,
        );
        let metadata = metadata_from_item(&item);
        assert_eq!(metadata.entity_type, EntityType::NonFungible);
        assert_eq!(metadata.divisibility, None);
    }

    #[test]
    fn test_missing_details_is_unknown_entity() {
        let item = item(r#"{"address": "resource_rdx1tkn"}"#);
        let metadata = metadata_from_item(&item);
        assert_eq!(metadata.entity_type, EntityType::Unknown);
        assert_eq!(metadata.divisibility, None);
    }
}
