//! Latest value seen from every polled source.

use crate::domain::{
    Decimal, ExternalBalances, FeeSample, FeeWindows, MarketContext, TokenSupplyInfo,
};
use crate::engine::fee_windows;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A value with the time it was last refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped<T> {
    pub value: T,
    pub updated_at: DateTime<Utc>,
}

impl<T> Stamped<T> {
    pub fn now(value: T) -> Self {
        Self {
            value,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub token_info: Option<Stamped<TokenSupplyInfo>>,
    pub staked_balance: Option<Stamped<Decimal>>,
    pub foundation_delegations: Option<Stamped<Decimal>>,
    pub perp_dex_stake: Option<Stamped<Decimal>>,
    pub evm_bridge_balance: Option<Stamped<Decimal>>,
    pub burnt_evm_balance: Option<Stamped<Decimal>>,
    pub assistance_fund_balance: Option<Stamped<Decimal>>,
    /// USDC the assistance fund holds for buybacks. Not part of supply.
    pub assistance_fund_usdc: Option<Stamped<Decimal>>,
    pub market: Option<Stamped<MarketContext>>,
    pub fee_history: Option<Stamped<Vec<FeeSample>>>,
}

fn value<T: Copy>(slot: &Option<Stamped<T>>) -> Option<T> {
    slot.as_ref().map(|s| s.value)
}

impl Snapshot {
    pub fn token_info(&self) -> Option<&TokenSupplyInfo> {
        self.token_info.as_ref().map(|s| &s.value)
    }

    /// The balance inputs as currently known; absent sources stay `None`.
    pub fn external_balances(&self) -> ExternalBalances {
        ExternalBalances {
            staked_balance: value(&self.staked_balance),
            foundation_delegations: value(&self.foundation_delegations),
            perp_dex_stake: value(&self.perp_dex_stake),
            evm_bridge_balance: value(&self.evm_bridge_balance),
            burnt_evm_balance: value(&self.burnt_evm_balance),
            assistance_fund_balance: value(&self.assistance_fund_balance),
        }
    }

    pub fn assistance_fund_usdc(&self) -> Option<Decimal> {
        value(&self.assistance_fund_usdc)
    }

    pub fn market(&self) -> Option<MarketContext> {
        value(&self.market)
    }

    pub fn fee_windows(&self) -> Option<FeeWindows> {
        self.fee_history
            .as_ref()
            .and_then(|s| fee_windows(&s.value))
    }
}

/// Shared, async-locked [`Snapshot`]. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current snapshot; computation happens outside the lock.
    pub async fn read(&self) -> Snapshot {
        self.inner.read().await.clone()
    }

    pub async fn update<F>(&self, apply: F)
    where
        F: FnOnce(&mut Snapshot),
    {
        let mut guard = self.inner.write().await;
        apply(&mut guard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_update_and_read() {
        let store = SnapshotStore::new();
        assert!(store.read().await.token_info().is_none());

        store
            .update(|s| s.staked_balance = Some(Stamped::now(Decimal::from(5i64))))
            .await;

        let snapshot = store.read().await;
        let balances = snapshot.external_balances();
        assert_eq!(balances.staked_balance, Some(Decimal::from(5i64)));
        assert_eq!(balances.foundation_delegations, None);
    }

    #[test]
    fn test_fee_windows_need_history() {
        let mut snapshot = Snapshot::default();
        assert!(snapshot.fee_windows().is_none());

        snapshot.fee_history = Some(Stamped::now(vec![
            FeeSample { time: 0, total_fees: Decimal::zero() },
            FeeSample { time: 86_400, total_fees: Decimal::from(1_000_000i64) },
        ]));
        assert!(snapshot.fee_windows().is_some());
    }
}
