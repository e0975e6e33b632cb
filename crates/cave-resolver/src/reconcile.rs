//! Optimistic reconciliation after a confirmed transaction.
//!
//! The ledger settles eventually; the Gateway lags a committed
//! transaction. Until fresh reads land, cached vault balances are
//! corrected optimistically and the session cache keys the operation
//! could have invalidated are dropped.

use cave_cache::{fungibles_key, nfts_key, SessionCache, CAVE_TOKENS_KEY};
use cave_core::{AccountAddress, Amount, ResourceAddress, VaultBalanceSnapshot};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Direction of a confirmed vault transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultOperation {
    /// Tokens moved into the vault (IN).
    Deposit,
    /// Tokens moved out of the vault (OUT).
    Withdraw,
}

/// One resource moved by a transaction.
#[derive(Debug, Clone)]
pub struct TokenMovement {
    pub resource: ResourceAddress,
    pub amount: Amount,
}

impl TokenMovement {
    pub fn new(resource: ResourceAddress, amount: Amount) -> Self {
        Self { resource, amount }
    }
}

/// Applies optimistic balance deltas and cache invalidation.
///
/// Holds the in-memory balance snapshot recorded by the latest preview.
/// Invoked by the consuming layer immediately after a wallet-confirmed
/// transaction, before any re-query.
pub struct ReconciliationEngine {
    session: Arc<SessionCache>,
    snapshot: Mutex<VaultBalanceSnapshot>,
}

impl ReconciliationEngine {
    pub fn new(session: Arc<SessionCache>) -> Self {
        Self {
            session,
            snapshot: Mutex::new(VaultBalanceSnapshot::new()),
        }
    }

    /// Replace the snapshot with the latest preview result.
    pub fn record_snapshot(&self, snapshot: VaultBalanceSnapshot) {
        *self.snapshot.lock() = snapshot;
    }

    /// Current snapshot, as corrected so far.
    pub fn snapshot(&self) -> VaultBalanceSnapshot {
        self.snapshot.lock().clone()
    }

    /// Apply a confirmed transfer.
    ///
    /// Known balances are bumped by the moved amount (clamped at zero).
    /// A resource the snapshot does not know — absent entirely, or
    /// known to have no vault record — is skipped: a balance is never
    /// fabricated from nothing.
    ///
    /// Invalidation: both holdings keys for the account always; the
    /// vault-token discovery key only on deposit, where new resource
    /// addresses may have appeared. A withdrawal cannot shrink the set
    /// of enumerable resources, so discovery stays cached.
    pub fn apply(
        &self,
        operation: VaultOperation,
        account: &AccountAddress,
        movements: &[TokenMovement],
    ) {
        {
            let mut snapshot = self.snapshot.lock();
            for movement in movements {
                let Some(slot) = snapshot.get_mut(&movement.resource) else {
                    debug!(resource = %movement.resource, "No snapshot entry, skipping optimistic update");
                    continue;
                };
                let Some(balance) = slot.as_mut() else {
                    debug!(resource = %movement.resource, "Snapshot has no vault record, skipping optimistic update");
                    continue;
                };
                *balance = match operation {
                    VaultOperation::Deposit => balance.saturating_add(movement.amount),
                    VaultOperation::Withdraw => balance.saturating_sub(movement.amount),
                };
            }
        }

        self.session.remove(&fungibles_key(account));
        self.session.remove(&nfts_key(account));
        if operation == VaultOperation::Deposit {
            self.session.remove(CAVE_TOKENS_KEY);
        }
        debug!(?operation, account = %account, moved = movements.len(), "Applied reconciliation");
    }

    /// Account switch or disconnect: drop the whole session cache and
    /// the snapshot.
    pub fn reset(&self) {
        self.session.clear();
        self.snapshot.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn engine() -> (ReconciliationEngine, Arc<SessionCache>) {
        let session = Arc::new(SessionCache::new());
        (ReconciliationEngine::new(session.clone()), session)
    }

    fn resource() -> ResourceAddress {
        ResourceAddress::new("resource_rdx1tkn")
    }

    fn account() -> AccountAddress {
        AccountAddress::new("account_rdx12abc")
    }

    fn seeded_snapshot(balance: &str) -> VaultBalanceSnapshot {
        let mut snapshot = VaultBalanceSnapshot::new();
        snapshot.insert(resource(), Some(balance.parse().unwrap()));
        snapshot
    }

    #[test]
    fn test_withdrawals_never_go_negative() {
        let (engine, _) = engine();
        engine.record_snapshot(seeded_snapshot("5"));

        let out = |amount: &str| {
            engine.apply(
                VaultOperation::Withdraw,
                &account(),
                &[TokenMovement::new(resource(), amount.parse().unwrap())],
            )
        };
        out("5");
        out("3");

        assert_eq!(
            engine.snapshot().get(&resource()),
            Some(&Some(Amount::ZERO))
        );
    }

    #[test]
    fn test_deposit_bumps_known_balance() {
        let (engine, _) = engine();
        engine.record_snapshot(seeded_snapshot("1.5"));

        engine.apply(
            VaultOperation::Deposit,
            &account(),
            &[TokenMovement::new(resource(), "2".parse().unwrap())],
        );

        assert_eq!(
            engine.snapshot().get(&resource()),
            Some(&Some(Amount::new(dec!(3.5))))
        );
    }

    #[test]
    fn test_unknown_resource_is_never_fabricated() {
        let (engine, _) = engine();

        engine.apply(
            VaultOperation::Deposit,
            &account(),
            &[TokenMovement::new(resource(), "100".parse().unwrap())],
        );

        assert_eq!(engine.snapshot().get(&resource()), None);
    }

    #[test]
    fn test_no_vault_record_is_left_alone() {
        let (engine, _) = engine();
        let mut snapshot = VaultBalanceSnapshot::new();
        snapshot.insert(resource(), None);
        engine.record_snapshot(snapshot);

        engine.apply(
            VaultOperation::Deposit,
            &account(),
            &[TokenMovement::new(resource(), "100".parse().unwrap())],
        );

        assert_eq!(engine.snapshot().get(&resource()), Some(&None));
    }

    #[test]
    fn test_deposit_invalidates_discovery_withdrawal_does_not() {
        let (engine, session) = engine();
        let account = account();

        let seed = |session: &SessionCache| {
            session.set(&fungibles_key(&account), &1u32, None);
            session.set(&nfts_key(&account), &1u32, None);
            session.set(CAVE_TOKENS_KEY, &1u32, None);
        };

        seed(&session);
        engine.apply(VaultOperation::Withdraw, &account, &[]);
        assert_eq!(session.get::<u32>(&fungibles_key(&account)), None);
        assert_eq!(session.get::<u32>(&nfts_key(&account)), None);
        // The vault's resource set cannot shrink on withdrawal.
        assert_eq!(session.get::<u32>(CAVE_TOKENS_KEY), Some(1));

        seed(&session);
        engine.apply(VaultOperation::Deposit, &account, &[]);
        assert_eq!(session.get::<u32>(&fungibles_key(&account)), None);
        assert_eq!(session.get::<u32>(&nfts_key(&account)), None);
        assert_eq!(session.get::<u32>(CAVE_TOKENS_KEY), None);
    }

    #[test]
    fn test_reset_clears_session_and_snapshot() {
        let (engine, session) = engine();
        engine.record_snapshot(seeded_snapshot("5"));
        session.set("anything", &1u32, None);

        engine.reset();

        assert!(session.is_empty());
        assert!(engine.snapshot().is_empty());
    }
}
