//! Wallet connector boundary.
//!
//! Connection and signing live in an external SDK; this module only
//! defines the interface the app drives and the outcome it reacts to.
//! Manifests arrive here as opaque script strings built elsewhere and
//! are passed through unmodified.

use async_trait::async_trait;
use cave_core::AccountAddress;
use cave_resolver::{TokenMovement, VaultOperation};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Wallet error: {0}")]
pub struct WalletError(pub String);

/// Terminal status the wallet reports for a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Committed on ledger; reconciliation applies.
    Committed,
    /// The user declined to sign.
    Rejected,
    /// Submitted but failed to commit.
    Failed,
}

/// Result of a wallet submission.
#[derive(Debug, Clone)]
pub struct TransactionResult {
    pub status: TransactionStatus,
    pub transaction_id: Option<String>,
    pub message: Option<String>,
}

impl TransactionResult {
    pub fn is_committed(&self) -> bool {
        self.status == TransactionStatus::Committed
    }
}

/// A structured vault transfer ready for submission.
///
/// `movements` lists the resources the manifest moves; on a committed
/// result they drive the optimistic reconciliation.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub operation: VaultOperation,
    pub account: AccountAddress,
    /// Opaque transaction script.
    pub manifest: String,
    pub movements: Vec<TokenMovement>,
}

/// External wallet connection/signing SDK.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Submit a manifest for signing and await its terminal status.
    async fn submit(&self, manifest: &str) -> Result<TransactionResult, WalletError>;
}
