//! Account holdings resolution.
//!
//! Session-cached per account: a cache hit short-circuits all network
//! access. On a miss the full listing is paged in, metadata is resolved
//! for every distinct resource, and the merged result is cached under
//! the account-resources TTL.

use crate::error::ResolverResult;
use crate::metadata::MetadataResolver;
use cave_cache::{fungibles_key, nfts_key, SessionCache};
use cave_core::{
    AccountAddress, Amount, FungibleHolding, NftId, NonFungibleCollection, ResourceAddress,
    ResourceMetadata,
};
use cave_gateway::client::{collect_all_pages, GatewayApi};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// One fetched page of non-fungible ids with its continuation cursor.
#[derive(Debug, Clone)]
pub struct NftIdBatch {
    pub ids: Vec<NftId>,
    pub next_cursor: Option<String>,
}

/// Resolves an account's fungible and non-fungible holdings.
pub struct HoldingsResolver<G> {
    gateway: Arc<G>,
    metadata: Arc<MetadataResolver<G>>,
    session: Arc<SessionCache>,
    /// Account-resources TTL for cached results.
    ttl: Option<Duration>,
}

impl<G: GatewayApi> HoldingsResolver<G> {
    pub fn new(
        gateway: Arc<G>,
        metadata: Arc<MetadataResolver<G>>,
        session: Arc<SessionCache>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            gateway,
            metadata,
            session,
            ttl,
        }
    }

    /// Fungible holdings of `account`, with metadata merged in.
    pub async fn fungibles(
        &self,
        account: &AccountAddress,
    ) -> ResolverResult<Vec<FungibleHolding>> {
        let key = fungibles_key(account);
        if let Some(cached) = self.session.get::<Vec<FungibleHolding>>(&key) {
            debug!(account = %account, "Fungible holdings served from session cache");
            return Ok(cached);
        }

        let gateway = self.gateway.clone();
        let items = collect_all_pages(|cursor| {
            let gateway = gateway.clone();
            let account = account.clone();
            async move { gateway.fungibles_page(&account, cursor).await }
        })
        .await?;

        let addresses: Vec<ResourceAddress> = items
            .iter()
            .map(|item| ResourceAddress::new(item.resource_address.clone()))
            .collect();
        let metadata = self.metadata.resolve(&addresses).await?;

        let mut holdings = Vec::with_capacity(items.len());
        for item in items {
            let resource = ResourceAddress::new(item.resource_address);
            let raw_amount = item.amount.as_deref().unwrap_or("0");
            let amount = match raw_amount.parse::<Amount>() {
                Ok(amount) => amount,
                Err(e) => {
                    warn!(resource = %resource, amount = raw_amount, error = %e, "Unparseable holding amount, skipping entry");
                    continue;
                }
            };
            let merged = metadata
                .get(&resource)
                .cloned()
                .unwrap_or_else(|| ResourceMetadata::unknown(resource.clone()));
            holdings.push(FungibleHolding {
                resource_address: resource,
                amount,
                metadata: merged,
            });
        }

        self.session.set(&key, &holdings, self.ttl);
        Ok(holdings)
    }

    /// Non-fungible collections of `account`, one record per
    /// (resource, vault) pair, with metadata merged in.
    pub async fn non_fungibles(
        &self,
        account: &AccountAddress,
    ) -> ResolverResult<Vec<NonFungibleCollection>> {
        let key = nfts_key(account);
        if let Some(cached) = self.session.get::<Vec<NonFungibleCollection>>(&key) {
            debug!(account = %account, "Non-fungible collections served from session cache");
            return Ok(cached);
        }

        let gateway = self.gateway.clone();
        let items = collect_all_pages(|cursor| {
            let gateway = gateway.clone();
            let account = account.clone();
            async move { gateway.non_fungibles_page(&account, cursor).await }
        })
        .await?;

        let addresses: Vec<ResourceAddress> = items
            .iter()
            .map(|item| ResourceAddress::new(item.resource_address.clone()))
            .collect();
        let metadata = self.metadata.resolve(&addresses).await?;

        // A resource entity may spread its ids across several vaults;
        // each vault becomes its own collection record.
        let mut collections = Vec::new();
        for item in items {
            let resource = ResourceAddress::new(item.resource_address);
            let merged = metadata
                .get(&resource)
                .cloned()
                .unwrap_or_else(|| ResourceMetadata::unknown(resource.clone()));
            for vault in item.vaults.items {
                let nf_ids = vault
                    .items
                    .unwrap_or_default()
                    .iter()
                    .map(|raw| NftId::parse(raw))
                    .collect();
                collections.push(NonFungibleCollection {
                    resource_address: resource.clone(),
                    vault_address: vault.vault_address,
                    total_count: vault.total_count,
                    nf_ids,
                    next_cursor: vault.next_cursor,
                    metadata: merged.clone(),
                });
            }
        }

        self.session.set(&key, &collections, self.ttl);
        Ok(collections)
    }

    /// Fetch one further page of a vault's non-fungible ids.
    ///
    /// Continuation of a collection snapshot whose `next_cursor` was
    /// non-null; intentionally uncached.
    pub async fn non_fungible_ids(
        &self,
        account: &AccountAddress,
        resource: &ResourceAddress,
        vault_address: &str,
        cursor: Option<String>,
    ) -> ResolverResult<NftIdBatch> {
        let page = self
            .gateway
            .non_fungible_ids_page(account, resource, vault_address, cursor)
            .await?;
        Ok(NftIdBatch {
            ids: page.items.iter().map(|raw| NftId::parse(raw)).collect(),
            next_cursor: page.next_cursor,
        })
    }
}
