//! Vault-token discovery.
//!
//! The shared vault store is an external key/value record keyed by
//! resource address; enumerating its keys yields every resource ever
//! deposited. Addresses are never removed — a balance drained to zero
//! stays enumerable.

use crate::error::ResolverResult;
use cave_cache::{SessionCache, CAVE_TOKENS_KEY};
use cave_core::ResourceAddress;
use cave_gateway::client::{collect_all_pages, GatewayApi};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Enumerates resource addresses known to the shared vault store.
pub struct VaultTokenDiscovery<G> {
    gateway: Arc<G>,
    session: Arc<SessionCache>,
    store_address: String,
    ttl: Option<Duration>,
}

impl<G: GatewayApi> VaultTokenDiscovery<G> {
    pub fn new(
        gateway: Arc<G>,
        session: Arc<SessionCache>,
        store_address: impl Into<String>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            gateway,
            session,
            store_address: store_address.into(),
            ttl,
        }
    }

    /// Every resource address present in the vault store.
    ///
    /// A key counts only if its structured encoding is a reference of
    /// type `ResourceAddress` with a non-empty value; malformed keys
    /// are logged and skipped rather than aborting discovery. The
    /// result is session-cached and must be invalidated after any
    /// deposit, since new resource addresses may appear.
    pub async fn discover(&self) -> ResolverResult<Vec<ResourceAddress>> {
        if let Some(cached) = self.session.get::<Vec<ResourceAddress>>(CAVE_TOKENS_KEY) {
            debug!("Vault tokens served from session cache");
            return Ok(cached);
        }

        let gateway = self.gateway.clone();
        let store_address = self.store_address.clone();
        let items = collect_all_pages(|cursor| {
            let gateway = gateway.clone();
            let store_address = store_address.clone();
            async move {
                gateway
                    .key_value_store_keys_page(&store_address, cursor)
                    .await
            }
        })
        .await?;

        let mut seen = HashSet::new();
        let mut resources = Vec::new();
        for item in &items {
            let reference = item
                .key
                .as_ref()
                .and_then(|key| key.programmatic_json.as_ref())
                .and_then(|value| value.as_reference("ResourceAddress"));
            match reference {
                Some(address) => {
                    let address = ResourceAddress::new(address);
                    if seen.insert(address.clone()) {
                        resources.push(address);
                    }
                }
                None => {
                    warn!(store = %self.store_address, "Skipping malformed vault store key");
                }
            }
        }

        debug!(count = resources.len(), "Discovered vault tokens");
        self.session.set(CAVE_TOKENS_KEY, &resources, self.ttl);
        Ok(resources)
    }
}
