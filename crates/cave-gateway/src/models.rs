//! Request and response models for the Gateway endpoints.
//!
//! Every field the Gateway might omit is an `Option` or defaulted; a
//! missing field reads as absent rather than an error.

use serde::{Deserialize, Serialize};

/// Response from `/status/gateway-status`.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayStatusResponse {
    pub ledger_state: LedgerState,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerState {
    /// Current ledger epoch, used to bound preview validity.
    pub epoch: u64,
}

/// One page of a cursor-paginated listing.
///
/// An absent `next_cursor` is the sole termination signal; a fixed page
/// count must never be assumed.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    /// A single page with no continuation.
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
            total_count: None,
        }
    }

    /// A page pointing at a continuation cursor.
    pub fn partial(items: Vec<T>, next_cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(next_cursor.into()),
            total_count: None,
        }
    }
}

/// Request body for `/state/entity/details`.
#[derive(Debug, Serialize)]
pub struct EntityDetailsRequest {
    pub addresses: Vec<String>,
    pub opt_ins: EntityDetailsOptIns,
}

/// Metadata fields must be opted into explicitly on the batch call.
#[derive(Debug, Serialize)]
pub struct EntityDetailsOptIns {
    pub explicit_metadata: Vec<String>,
}

impl Default for EntityDetailsOptIns {
    fn default() -> Self {
        Self {
            explicit_metadata: vec![
                "name".to_string(),
                "symbol".to_string(),
                "icon_url".to_string(),
                "description".to_string(),
            ],
        }
    }
}

/// Response from `/state/entity/details`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityDetailsResponse {
    #[serde(default)]
    pub items: Vec<EntityDetailsItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityDetailsItem {
    pub address: String,
    #[serde(default)]
    pub explicit_metadata: Option<MetadataCollection>,
    #[serde(default)]
    pub details: Option<EntityDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataCollection {
    #[serde(default)]
    pub items: Vec<MetadataKvPair>,
}

/// One typed metadata key/value pair.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataKvPair {
    pub key: String,
    #[serde(default)]
    pub value: Option<MetadataValue>,
}

impl MetadataKvPair {
    /// The defined string value, if the pair carries one. Pairs whose
    /// typed value has no defined `value` field are dropped.
    pub fn defined_value(&self) -> Option<&str> {
        self.value
            .as_ref()
            .and_then(|v| v.typed.as_ref())
            .and_then(|t| t.value.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataValue {
    #[serde(default)]
    pub typed: Option<TypedMetadataValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypedMetadataValue {
    #[serde(default)]
    pub value: Option<String>,
}

/// The entity's detail record from `/state/entity/details`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityDetails {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub divisibility: Option<u8>,
}

/// Request body for the account holdings page endpoints.
#[derive(Debug, Serialize)]
pub struct EntityPageRequest {
    pub address: String,
    pub aggregation_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_ins: Option<EntityPageOptIns>,
}

#[derive(Debug, Serialize)]
pub struct EntityPageOptIns {
    pub non_fungible_include_nfids: bool,
}

/// One fungible resource from `/state/entity/page/fungibles/`
/// (aggregation "Global").
#[derive(Debug, Clone, Deserialize)]
pub struct FungibleResourcesItem {
    pub resource_address: String,
    #[serde(default)]
    pub amount: Option<String>,
}

/// One non-fungible resource from `/state/entity/page/non-fungibles/`
/// (aggregation "Vault").
#[derive(Debug, Clone, Deserialize)]
pub struct NonFungibleResourcesItem {
    pub resource_address: String,
    #[serde(default)]
    pub vaults: VaultsPage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaultsPage {
    #[serde(default)]
    pub items: Vec<NonFungibleVaultItem>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NonFungibleVaultItem {
    pub vault_address: String,
    #[serde(default)]
    pub total_count: u64,
    /// Non-fungible ids in canonical text form, present only when the
    /// request opted into them. May be a strict prefix of the vault.
    #[serde(default)]
    pub items: Option<Vec<String>>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Request body for `/state/entity/page/non-fungible-vault/ids`.
#[derive(Debug, Serialize)]
pub struct NonFungibleIdsRequest {
    pub address: String,
    pub resource_address: String,
    pub vault_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Request body for `/state/key-value-store/keys`.
#[derive(Debug, Serialize)]
pub struct KeyValueStoreKeysRequest {
    pub key_value_store_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// One key enumerated from the vault store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyValueStoreKeyItem {
    #[serde(default)]
    pub key: Option<KeyValueStoreKey>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyValueStoreKey {
    #[serde(default)]
    pub programmatic_json: Option<ProgrammaticValue>,
}

/// Enum variant discriminator in the structured value encoding.
///
/// The Gateway has emitted this both as a number and as a string; both
/// are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantId {
    Number(u64),
    Text(String),
}

impl VariantId {
    pub fn is(&self, id: u64) -> bool {
        match self {
            Self::Number(n) => *n == id,
            Self::Text(s) => s.parse::<u64>().map(|n| n == id).unwrap_or(false),
        }
    }
}

/// One node of the Gateway's structured ("programmatic") value encoding.
///
/// Only the fields this client inspects are modeled; unknown fields are
/// ignored and missing ones read as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgrammaticValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ProgrammaticValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ProgrammaticValue>,
}

impl ProgrammaticValue {
    /// Whether this node is the `Some` variant of an option enum,
    /// identified by variant id 1 or variant name "Some".
    pub fn is_some_variant(&self) -> bool {
        self.variant_id.as_ref().is_some_and(|id| id.is(1))
            || self.variant_name.as_deref() == Some("Some")
    }

    /// Positional children: array elements when present, else tuple
    /// fields.
    pub fn positional(&self) -> &[ProgrammaticValue] {
        if !self.elements.is_empty() {
            &self.elements
        } else {
            &self.fields
        }
    }

    /// Whether this node is a reference to the named type with a
    /// non-empty value. Vault-store keys must satisfy this to count as
    /// resource addresses.
    pub fn as_reference(&self, type_name: &str) -> Option<&str> {
        if self.kind.as_deref() != Some("Reference") {
            return None;
        }
        if self.type_name.as_deref() != Some(type_name) {
            return None;
        }
        match self.value.as_deref() {
            Some(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }
}

/// Request body for `/transaction/preview`.
#[derive(Debug, Serialize)]
pub struct TransactionPreviewRequest {
    pub manifest: String,
    pub start_epoch_inclusive: u64,
    pub end_epoch_exclusive: u64,
    pub tip_percentage: u32,
    pub nonce: u32,
    pub signer_public_keys: Vec<serde_json::Value>,
    pub flags: PreviewFlags,
}

/// Preview execution flags. The combination used here lets a read-only
/// preview run with no real funds or signature.
#[derive(Debug, Serialize)]
pub struct PreviewFlags {
    pub use_free_credit: bool,
    pub assume_all_signature_proofs: bool,
    pub skip_epoch_check: bool,
}

/// Response from `/transaction/preview`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPreviewResponse {
    #[serde(default)]
    pub receipt: PreviewReceipt,
}

/// Execution receipt of a preview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewReceipt {
    #[serde(default)]
    pub status: Option<String>,
    /// Structured return values, one per manifest output.
    #[serde(default)]
    pub output: Option<Vec<ReceiptOutput>>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptOutput {
    #[serde(default)]
    pub programmatic_json: Option<ProgrammaticValue>,
}
