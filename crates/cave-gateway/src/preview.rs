//! Dry-run balance preview and receipt decoding.
//!
//! Reading current vault balances is done by previewing a read-only
//! manifest against the Gateway and decoding the structured return of
//! its last output.

use crate::client::GatewayApi;
use crate::error::GatewayResult;
use crate::models::{
    PreviewFlags, PreviewReceipt, TransactionPreviewRequest, TransactionPreviewResponse,
};
use cave_core::{Amount, ResourceAddress, VaultBalanceSnapshot};
use std::sync::Arc;
use tracing::{debug, warn};

/// Receipt status sentinel for a successful preview execution.
pub const STATUS_SUCCEEDED: &str = "Succeeded";

/// Executes dry-run previews against the Gateway.
pub struct BalancePreviewEngine<G> {
    gateway: Arc<G>,
}

impl<G: GatewayApi> BalancePreviewEngine<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Preview `manifest` against the current ledger epoch.
    ///
    /// The epoch window is `[epoch, epoch + 2)` with zero tip, a fresh
    /// random nonce, and no signer keys; the flags let the read-only
    /// preview run with assumed signature proofs and free credit.
    pub async fn preview(&self, manifest: &str) -> GatewayResult<TransactionPreviewResponse> {
        let status = self.gateway.gateway_status().await?;
        let epoch = status.ledger_state.epoch;

        let request = TransactionPreviewRequest {
            manifest: manifest.to_string(),
            start_epoch_inclusive: epoch,
            end_epoch_exclusive: epoch + 2,
            tip_percentage: 0,
            nonce: rand::random(),
            signer_public_keys: Vec::new(),
            flags: PreviewFlags {
                use_free_credit: true,
                assume_all_signature_proofs: true,
                skip_epoch_check: false,
            },
        };

        debug!(epoch, "Submitting balance preview");
        self.gateway.transaction_preview(&request).await
    }
}

/// Decode vault balances from a preview receipt.
///
/// `resources` must be in the manifest's read order — positions of the
/// structured return are matched to addresses in lock-step. Every
/// address starts as `None` ("no vault record"); a position holding the
/// `Some` variant contributes its first field's value, with an empty
/// value reading as `"0"`. Positions beyond the shorter sequence stay
/// `None`, and any shape surprise degrades to the partial map rather
/// than failing — the receipt layout is not under this client's control.
pub fn decode_balances(
    receipt: &PreviewReceipt,
    resources: &[ResourceAddress],
) -> VaultBalanceSnapshot {
    let mut snapshot = VaultBalanceSnapshot::new();
    for resource in resources {
        snapshot.insert(resource.clone(), None);
    }

    if receipt.status.as_deref() != Some(STATUS_SUCCEEDED) {
        warn!(
            status = ?receipt.status,
            error = ?receipt.error_message,
            "Preview did not succeed, reporting no balances"
        );
        return snapshot;
    }

    let Some(return_value) = receipt
        .output
        .as_ref()
        .and_then(|output| output.last())
        .and_then(|last| last.programmatic_json.as_ref())
    else {
        warn!("Preview receipt carries no structured return value");
        return snapshot;
    };

    for (resource, element) in resources.iter().zip(return_value.positional()) {
        if !element.is_some_variant() {
            continue;
        }
        let value = element
            .fields
            .first()
            .and_then(|field| field.value.as_deref())
            .unwrap_or("");
        let text = if value.is_empty() { "0" } else { value };
        match text.parse::<Amount>() {
            Ok(amount) => snapshot.insert(resource.clone(), Some(amount)),
            Err(e) => {
                warn!(resource = %resource, value = text, error = %e, "Undecodable balance value, leaving unknown");
            }
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayResult;
    use crate::models::{
        EntityDetailsRequest, EntityDetailsResponse, FungibleResourcesItem, GatewayStatusResponse,
        KeyValueStoreKeyItem, NonFungibleResourcesItem, Page,
    };
    use async_trait::async_trait;
    use cave_core::AccountAddress;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Captures the preview request the engine builds.
    #[derive(Default)]
    struct CapturingGateway {
        captured: Mutex<Option<serde_json::Value>>,
    }

    #[async_trait]
    impl GatewayApi for CapturingGateway {
        async fn gateway_status(&self) -> GatewayResult<GatewayStatusResponse> {
            Ok(serde_json::from_value(serde_json::json!({
                "ledger_state": {"epoch": 100}
            }))
            .unwrap())
        }

        async fn entity_details(
            &self,
            _request: &EntityDetailsRequest,
        ) -> GatewayResult<EntityDetailsResponse> {
            panic!("not used");
        }

        async fn fungibles_page(
            &self,
            _account: &AccountAddress,
            _cursor: Option<String>,
        ) -> GatewayResult<Page<FungibleResourcesItem>> {
            panic!("not used");
        }

        async fn non_fungibles_page(
            &self,
            _account: &AccountAddress,
            _cursor: Option<String>,
        ) -> GatewayResult<Page<NonFungibleResourcesItem>> {
            panic!("not used");
        }

        async fn non_fungible_ids_page(
            &self,
            _account: &AccountAddress,
            _resource: &ResourceAddress,
            _vault_address: &str,
            _cursor: Option<String>,
        ) -> GatewayResult<Page<String>> {
            panic!("not used");
        }

        async fn key_value_store_keys_page(
            &self,
            _store_address: &str,
            _cursor: Option<String>,
        ) -> GatewayResult<Page<KeyValueStoreKeyItem>> {
            panic!("not used");
        }

        async fn transaction_preview(
            &self,
            request: &TransactionPreviewRequest,
        ) -> GatewayResult<TransactionPreviewResponse> {
            *self.captured.lock().unwrap() = Some(serde_json::to_value(request).unwrap());
            Ok(TransactionPreviewResponse::default())
        }
    }

    #[tokio::test]
    async fn test_preview_request_is_epoch_bounded_and_unsigned() {
        let gateway = Arc::new(CapturingGateway::default());
        let engine = BalancePreviewEngine::new(gateway.clone());

        engine.preview("CALL_METHOD ...").await.unwrap();

        let request = gateway.captured.lock().unwrap().take().unwrap();
        assert_eq!(request["manifest"], "CALL_METHOD ...");
        assert_eq!(request["start_epoch_inclusive"], 100);
        assert_eq!(request["end_epoch_exclusive"], 102);
        assert_eq!(request["tip_percentage"], 0);
        assert_eq!(request["signer_public_keys"], serde_json::json!([]));
        assert_eq!(request["flags"]["use_free_credit"], true);
        assert_eq!(request["flags"]["assume_all_signature_proofs"], true);
        assert_eq!(request["flags"]["skip_epoch_check"], false);
    }

    fn receipt(json: &str) -> PreviewReceipt {
        serde_json::from_str(json).expect("receipt fixture")
    }

    fn addresses() -> Vec<ResourceAddress> {
        vec![
            ResourceAddress::new("resource_rdx1aaa"),
            ResourceAddress::new("resource_rdx1bbb"),
        ]
    }

    #[test]
    fn test_decode_some_and_none_positions() {
        let receipt = receipt(
            r#"{
                "status": "Succeeded",
                "output": [
                    {"programmatic_json": {"kind": "Tuple", "fields": []}},
                    {"programmatic_json": {
                        "kind": "Tuple",
                        "fields": [
                            {"kind": "Enum", "variant_id": 1, "variant_name": "Some",
                             "fields": [{"kind": "Decimal", "value": "42.5"}]},
                            {"kind": "Enum", "variant_id": 0, "variant_name": "None"}
                        ]
                    }}
                ]
            }"#,
        );
        let addrs = addresses();

        let snapshot = decode_balances(&receipt, &addrs);
        assert_eq!(snapshot.get(&addrs[0]), Some(&Some(Amount::new(dec!(42.5)))));
        assert_eq!(snapshot.get(&addrs[1]), Some(&None));
    }

    #[test]
    fn test_failed_preview_reports_all_unknown() {
        let receipt = receipt(r#"{"status": "Failed", "error_message": "epoch out of range"}"#);
        let addrs = addresses();

        let snapshot = decode_balances(&receipt, &addrs);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&addrs[0]), Some(&None));
        assert_eq!(snapshot.get(&addrs[1]), Some(&None));
    }

    #[test]
    fn test_missing_output_reports_all_unknown() {
        let receipt = receipt(r#"{"status": "Succeeded"}"#);
        let addrs = addresses();

        let snapshot = decode_balances(&receipt, &addrs);
        assert_eq!(snapshot.get(&addrs[0]), Some(&None));
        assert_eq!(snapshot.get(&addrs[1]), Some(&None));
    }

    #[test]
    fn test_empty_some_value_reads_as_zero() {
        let receipt = receipt(
            r#"{
                "status": "Succeeded",
                "output": [{"programmatic_json": {
                    "kind": "Tuple",
                    "fields": [{"kind": "Enum", "variant_name": "Some",
                                "fields": [{"kind": "Decimal", "value": ""}]}]
                }}]
            }"#,
        );
        let addrs = addresses();

        let snapshot = decode_balances(&receipt, &addrs);
        assert_eq!(snapshot.get(&addrs[0]), Some(&Some(Amount::ZERO)));
        // Position beyond the return's elements stays unknown.
        assert_eq!(snapshot.get(&addrs[1]), Some(&None));
    }

    #[test]
    fn test_array_elements_are_positional_too() {
        let receipt = receipt(
            r#"{
                "status": "Succeeded",
                "output": [{"programmatic_json": {
                    "kind": "Array",
                    "elements": [
                        {"kind": "Enum", "variant_id": "1",
                         "fields": [{"kind": "Decimal", "value": "7"}]},
                        {"kind": "Enum", "variant_id": "1",
                         "fields": [{"kind": "Decimal", "value": "0"}]}
                    ]
                }}]
            }"#,
        );
        let addrs = addresses();

        let snapshot = decode_balances(&receipt, &addrs);
        assert_eq!(snapshot.get(&addrs[0]), Some(&Some(Amount::new(dec!(7)))));
        assert_eq!(snapshot.get(&addrs[1]), Some(&Some(Amount::ZERO)));
    }

    #[test]
    fn test_undecodable_value_leaves_position_unknown() {
        let receipt = receipt(
            r#"{
                "status": "Succeeded",
                "output": [{"programmatic_json": {
                    "kind": "Tuple",
                    "fields": [
                        {"kind": "Enum", "variant_id": 1,
                         "fields": [{"kind": "Decimal", "value": "not-a-number"}]},
                        {"kind": "Enum", "variant_id": 1,
                         "fields": [{"kind": "Decimal", "value": "3"}]}
                    ]
                }}]
            }"#,
        );
        let addrs = addresses();

        let snapshot = decode_balances(&receipt, &addrs);
        assert_eq!(snapshot.get(&addrs[0]), Some(&None));
        assert_eq!(snapshot.get(&addrs[1]), Some(&Some(Amount::new(dec!(3)))));
    }
}
