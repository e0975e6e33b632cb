//! HTTP client for the Gateway API.
//!
//! All consumed endpoints are JSON-over-POST. Every request passes the
//! shared rate limiter first, with no exceptions for retries (there are
//! no automatic retries — callers decide).

use crate::error::{GatewayError, GatewayResult};
use crate::models::{
    EntityDetailsRequest, EntityDetailsResponse, EntityPageOptIns, EntityPageRequest,
    FungibleResourcesItem, GatewayStatusResponse, KeyValueStoreKeyItem, KeyValueStoreKeysRequest,
    NonFungibleIdsRequest, NonFungibleResourcesItem, Page, TransactionPreviewRequest,
    TransactionPreviewResponse,
};
use crate::rate_limiter::RateLimiter;
use async_trait::async_trait;
use cave_core::{AccountAddress, ResourceAddress};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default timeout for Gateway requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const GATEWAY_STATUS: &str = "/status/gateway-status";
pub const STATE_ENTITY_DETAILS: &str = "/state/entity/details";
pub const STATE_ENTITY_PAGE_FUNGIBLES: &str = "/state/entity/page/fungibles/";
pub const STATE_ENTITY_PAGE_NON_FUNGIBLES: &str = "/state/entity/page/non-fungibles/";
pub const STATE_NON_FUNGIBLE_VAULT_IDS: &str = "/state/entity/page/non-fungible-vault/ids";
pub const STATE_KVS_KEYS: &str = "/state/key-value-store/keys";
pub const TRANSACTION_PREVIEW: &str = "/transaction/preview";

/// Error body the Gateway returns on non-success statuses.
#[derive(Debug, Default, Deserialize)]
struct GatewayErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Typed surface of the Gateway endpoints this client consumes.
///
/// Resolvers take this trait rather than the concrete client so tests
/// can drive them with fakes.
#[async_trait]
pub trait GatewayApi: Send + Sync {
    async fn gateway_status(&self) -> GatewayResult<GatewayStatusResponse>;

    async fn entity_details(
        &self,
        request: &EntityDetailsRequest,
    ) -> GatewayResult<EntityDetailsResponse>;

    async fn fungibles_page(
        &self,
        account: &AccountAddress,
        cursor: Option<String>,
    ) -> GatewayResult<Page<FungibleResourcesItem>>;

    async fn non_fungibles_page(
        &self,
        account: &AccountAddress,
        cursor: Option<String>,
    ) -> GatewayResult<Page<NonFungibleResourcesItem>>;

    async fn non_fungible_ids_page(
        &self,
        account: &AccountAddress,
        resource: &ResourceAddress,
        vault_address: &str,
        cursor: Option<String>,
    ) -> GatewayResult<Page<String>>;

    async fn key_value_store_keys_page(
        &self,
        store_address: &str,
        cursor: Option<String>,
    ) -> GatewayResult<Page<KeyValueStoreKeyItem>>;

    async fn transaction_preview(
        &self,
        request: &TransactionPreviewRequest,
    ) -> GatewayResult<TransactionPreviewResponse>;
}

/// Gateway API client.
pub struct GatewayClient {
    client: Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

impl GatewayClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Gateway root URL, no trailing slash
    /// * `limiter` - shared rate limiter gating every outbound request
    pub fn new(base_url: impl Into<String>, limiter: Arc<RateLimiter>) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter,
        })
    }

    /// Execute one POST request against `endpoint`.
    async fn request<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> GatewayResult<T> {
        self.limiter.acquire().await;

        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, "Issuing Gateway request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<GatewayErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("Gateway request failed with status {}", status.as_u16()));
            return Err(GatewayError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::ResponseDecode(format!("Unparseable response body: {e}")))
    }
}

#[async_trait]
impl GatewayApi for GatewayClient {
    async fn gateway_status(&self) -> GatewayResult<GatewayStatusResponse> {
        self.request(GATEWAY_STATUS, &serde_json::json!({})).await
    }

    async fn entity_details(
        &self,
        request: &EntityDetailsRequest,
    ) -> GatewayResult<EntityDetailsResponse> {
        self.request(STATE_ENTITY_DETAILS, request).await
    }

    async fn fungibles_page(
        &self,
        account: &AccountAddress,
        cursor: Option<String>,
    ) -> GatewayResult<Page<FungibleResourcesItem>> {
        let request = EntityPageRequest {
            address: account.to_string(),
            aggregation_level: "Global".to_string(),
            cursor,
            opt_ins: None,
        };
        self.request(STATE_ENTITY_PAGE_FUNGIBLES, &request).await
    }

    async fn non_fungibles_page(
        &self,
        account: &AccountAddress,
        cursor: Option<String>,
    ) -> GatewayResult<Page<NonFungibleResourcesItem>> {
        let request = EntityPageRequest {
            address: account.to_string(),
            aggregation_level: "Vault".to_string(),
            cursor,
            opt_ins: Some(EntityPageOptIns {
                non_fungible_include_nfids: true,
            }),
        };
        self.request(STATE_ENTITY_PAGE_NON_FUNGIBLES, &request).await
    }

    async fn non_fungible_ids_page(
        &self,
        account: &AccountAddress,
        resource: &ResourceAddress,
        vault_address: &str,
        cursor: Option<String>,
    ) -> GatewayResult<Page<String>> {
        let request = NonFungibleIdsRequest {
            address: account.to_string(),
            resource_address: resource.to_string(),
            vault_address: vault_address.to_string(),
            cursor,
        };
        self.request(STATE_NON_FUNGIBLE_VAULT_IDS, &request).await
    }

    async fn key_value_store_keys_page(
        &self,
        store_address: &str,
        cursor: Option<String>,
    ) -> GatewayResult<Page<KeyValueStoreKeyItem>> {
        let request = KeyValueStoreKeysRequest {
            key_value_store_address: store_address.to_string(),
            cursor,
        };
        self.request(STATE_KVS_KEYS, &request).await
    }

    async fn transaction_preview(
        &self,
        request: &TransactionPreviewRequest,
    ) -> GatewayResult<TransactionPreviewResponse> {
        self.request(TRANSACTION_PREVIEW, request).await
    }
}

/// Drain a cursor-paginated endpoint.
///
/// Calls `fetch` with `None` first, then with each returned cursor,
/// accumulating items until a page carries no `next_cursor`. The null
/// sentinel is the only terminator: there is no iteration ceiling, so a
/// pathological endpoint that never returns null would spin here.
pub async fn collect_all_pages<T, F, Fut>(mut fetch: F) -> GatewayResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = GatewayResult<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = fetch(cursor).await?;
        items.extend(page.items);
        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => return Ok(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_all_pages_terminates_on_null_cursor() {
        let pages = vec![
            Page::partial(vec![1, 2], "c1"),
            Page::partial(vec![3], "c2"),
            Page::complete(vec![4, 5]),
        ];
        let calls = std::sync::Mutex::new(Vec::new());
        let pages = std::sync::Mutex::new(pages.into_iter());

        let items = collect_all_pages(|cursor| {
            calls.lock().unwrap().push(cursor.clone());
            let page = pages.lock().unwrap().next().expect("no page left");
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_collect_all_pages_propagates_errors() {
        let result: GatewayResult<Vec<u32>> = collect_all_pages(|_| async {
            Err(GatewayError::Gateway {
                status: 500,
                message: "boom".to_string(),
            })
        })
        .await;
        assert!(result.is_err());
    }
}
