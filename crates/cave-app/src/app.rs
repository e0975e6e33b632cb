//! Application wiring and operations facade.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::wallet::{TransactionResult, TransferRequest, WalletConnector};
use cave_cache::{DurableCache, SessionCache};
use cave_core::{
    AccountAddress, FungibleHolding, NonFungibleCollection, ResourceAddress, VaultBalanceSnapshot,
};
use cave_gateway::client::GatewayApi;
use cave_gateway::{decode_balances, BalancePreviewEngine, GatewayClient, RateLimiter};
use cave_resolver::{
    HoldingsResolver, MetadataResolver, NftIdBatch, ReconciliationEngine, VaultTokenDiscovery,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// The assembled vault client.
///
/// All components are constructed here with explicit lifecycles — no
/// process-wide globals — so several instances can coexist in tests.
pub struct CaveApp {
    config: AppConfig,
    gateway: Arc<GatewayClient>,
    holdings: HoldingsResolver<GatewayClient>,
    discovery: VaultTokenDiscovery<GatewayClient>,
    preview: BalancePreviewEngine<GatewayClient>,
    reconciliation: ReconciliationEngine,
    active_account: Mutex<Option<AccountAddress>>,
}

impl CaveApp {
    /// Build the component graph from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        if config.vault_store_address.is_empty() {
            return Err(AppError::Config(
                "vault_store_address must be set".to_string(),
            ));
        }

        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit.max_requests,
            config.rate_limit.window(),
        ));
        let gateway = Arc::new(GatewayClient::new(&config.gateway_url, limiter)?);
        let session = Arc::new(SessionCache::new());
        let durable = Arc::new(DurableCache::new(&config.cache_dir));

        let metadata = Arc::new(MetadataResolver::new(
            gateway.clone(),
            durable,
            config.cache_ttl.resource_metadata(),
        ));
        let holdings = HoldingsResolver::new(
            gateway.clone(),
            metadata,
            session.clone(),
            config.cache_ttl.account_resources(),
        );
        let discovery = VaultTokenDiscovery::new(
            gateway.clone(),
            session.clone(),
            config.vault_store_address.clone(),
            config.cache_ttl.account_resources(),
        );
        let preview = BalancePreviewEngine::new(gateway.clone());
        let reconciliation = ReconciliationEngine::new(session);

        info!(gateway_url = %config.gateway_url, "Cave app assembled");

        Ok(Self {
            config,
            gateway,
            holdings,
            discovery,
            preview,
            reconciliation,
            active_account: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Switch the active account.
    ///
    /// A change clears the whole session cache and the balance snapshot
    /// — coarse invalidation, nothing may leak between accounts.
    pub fn set_active_account(&self, account: Option<AccountAddress>) {
        let mut active = self.active_account.lock();
        if *active != account {
            info!(account = ?account, "Active account changed, resetting session state");
            self.reconciliation.reset();
            *active = account;
        }
    }

    pub fn active_account(&self) -> Option<AccountAddress> {
        self.active_account.lock().clone()
    }

    /// Current ledger epoch.
    pub async fn current_epoch(&self) -> AppResult<u64> {
        Ok(self.gateway.gateway_status().await?.ledger_state.epoch)
    }

    /// Fungible holdings of `account`.
    pub async fn fungibles(&self, account: &AccountAddress) -> AppResult<Vec<FungibleHolding>> {
        Ok(self.holdings.fungibles(account).await?)
    }

    /// Non-fungible collections of `account`.
    pub async fn non_fungibles(
        &self,
        account: &AccountAddress,
    ) -> AppResult<Vec<NonFungibleCollection>> {
        Ok(self.holdings.non_fungibles(account).await?)
    }

    /// One further page of a vault's non-fungible ids.
    pub async fn non_fungible_ids(
        &self,
        account: &AccountAddress,
        resource: &ResourceAddress,
        vault_address: &str,
        cursor: Option<String>,
    ) -> AppResult<NftIdBatch> {
        Ok(self
            .holdings
            .non_fungible_ids(account, resource, vault_address, cursor)
            .await?)
    }

    /// Resource addresses present in the shared vault store.
    pub async fn vault_tokens(&self) -> AppResult<Vec<ResourceAddress>> {
        Ok(self.discovery.discover().await?)
    }

    /// Preview `manifest` and decode current vault balances.
    ///
    /// `resources` must match the manifest's read order. The decoded
    /// snapshot is recorded for later reconciliation.
    pub async fn vault_balances(
        &self,
        manifest: &str,
        resources: &[ResourceAddress],
    ) -> AppResult<VaultBalanceSnapshot> {
        let response = self.preview.preview(manifest).await?;
        let snapshot = decode_balances(&response.receipt, resources);
        self.reconciliation.record_snapshot(snapshot.clone());
        Ok(snapshot)
    }

    /// Submit a transfer through the wallet and reconcile on commit.
    pub async fn submit_transfer<W: WalletConnector>(
        &self,
        wallet: &W,
        request: &TransferRequest,
    ) -> AppResult<TransactionResult> {
        let result = wallet
            .submit(&request.manifest)
            .await
            .map_err(|e| AppError::Wallet(e.to_string()))?;

        if result.is_committed() {
            self.reconciliation
                .apply(request.operation, &request.account, &request.movements);
        }

        Ok(result)
    }

    /// Reconciliation engine, for the consuming layer's direct use.
    pub fn reconciliation(&self) -> &ReconciliationEngine {
        &self.reconciliation
    }
}
