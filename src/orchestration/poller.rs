//! Independent polling of each upstream source into the snapshot store.

use crate::config::PollIntervals;
use crate::datasource::{DataSource, DataSourceError};
use crate::domain::Coin;
use crate::engine::SupplyAccountant;
use crate::orchestration::snapshot::{SnapshotStore, Stamped};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    TokenInfo,
    StakedBalance,
    FoundationDelegations,
    PerpDexStake,
    EvmBridgeBalance,
    BurntEvmBalance,
    AssistanceFundBalance,
    AssistanceFundUsdc,
    Market,
    FeeHistory,
}

impl SourceKind {
    pub const ALL: [SourceKind; 10] = [
        SourceKind::TokenInfo,
        SourceKind::StakedBalance,
        SourceKind::FoundationDelegations,
        SourceKind::PerpDexStake,
        SourceKind::EvmBridgeBalance,
        SourceKind::BurntEvmBalance,
        SourceKind::AssistanceFundBalance,
        SourceKind::AssistanceFundUsdc,
        SourceKind::Market,
        SourceKind::FeeHistory,
    ];

    pub fn interval(&self, poll: &PollIntervals) -> Duration {
        match self {
            SourceKind::TokenInfo
            | SourceKind::StakedBalance
            | SourceKind::EvmBridgeBalance
            | SourceKind::AssistanceFundBalance
            | SourceKind::AssistanceFundUsdc
            | SourceKind::Market => poll.fast,
            SourceKind::BurntEvmBalance | SourceKind::FeeHistory => poll.metrics,
            SourceKind::FoundationDelegations | SourceKind::PerpDexStake => poll.slow,
        }
    }
}

/// Fetches sources and writes them into the [`SnapshotStore`].
///
/// A failed fetch leaves the previous value in place; the next tick retries.
#[derive(Clone)]
pub struct Poller {
    datasource: Arc<dyn DataSource>,
    store: SnapshotStore,
    accountant: Arc<SupplyAccountant>,
    poll: PollIntervals,
}

impl Poller {
    pub fn new(
        datasource: Arc<dyn DataSource>,
        store: SnapshotStore,
        accountant: Arc<SupplyAccountant>,
        poll: PollIntervals,
    ) -> Self {
        Self {
            datasource,
            store,
            accountant,
            poll,
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Refresh one source. The error is returned after logging so callers
    /// can observe it; the stored value is untouched on failure.
    pub async fn refresh(&self, kind: SourceKind) -> Result<(), DataSourceError> {
        let result = self.fetch_into_store(kind).await;
        match &result {
            Ok(()) => debug!("Refreshed {:?}", kind),
            Err(e) => warn!("Refreshing {:?} failed, keeping previous value: {}", kind, e),
        }
        result
    }

    /// Refresh every source once, concurrently. Failures are logged only.
    pub async fn refresh_all(&self) {
        join_all(SourceKind::ALL.iter().map(|kind| self.refresh(*kind))).await;
    }

    /// One interval task per source, each on its own period. The first tick
    /// fires immediately, so a fresh store starts filling right away.
    pub fn spawn_all(&self) -> Vec<JoinHandle<()>> {
        SourceKind::ALL
            .iter()
            .map(|kind| {
                let poller = self.clone();
                let kind = *kind;
                let period = kind.interval(&self.poll);
                tokio::spawn(async move {
                    let mut ticker = tokio::time::interval(period);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    loop {
                        ticker.tick().await;
                        let _ = poller.refresh(kind).await;
                    }
                })
            })
            .collect()
    }

    async fn fetch_into_store(&self, kind: SourceKind) -> Result<(), DataSourceError> {
        let policy = self.accountant.policy();
        let ds = &self.datasource;

        match kind {
            SourceKind::TokenInfo => {
                let v = ds.fetch_token_info().await?;
                self.store.update(|s| s.token_info = Some(Stamped::now(v))).await;
            }
            SourceKind::StakedBalance => {
                let v = ds.fetch_staked_balance().await?;
                self.store.update(|s| s.staked_balance = Some(Stamped::now(v))).await;
            }
            SourceKind::FoundationDelegations => {
                let v = ds
                    .fetch_foundation_delegations(&policy.foundation_addresses)
                    .await?;
                self.store
                    .update(|s| s.foundation_delegations = Some(Stamped::now(v)))
                    .await;
            }
            SourceKind::PerpDexStake => {
                let count = ds.fetch_perp_dex_deployer_count().await?;
                let v = self.accountant.perp_dex_stake(count);
                self.store.update(|s| s.perp_dex_stake = Some(Stamped::now(v))).await;
            }
            SourceKind::EvmBridgeBalance => {
                let v = ds
                    .fetch_spot_balance(&policy.evm_bridge_address, &Coin::hype())
                    .await?;
                self.store
                    .update(|s| s.evm_bridge_balance = Some(Stamped::now(v)))
                    .await;
            }
            SourceKind::BurntEvmBalance => {
                let v = ds.fetch_burnt_evm_total().await?;
                self.store
                    .update(|s| s.burnt_evm_balance = Some(Stamped::now(v)))
                    .await;
            }
            SourceKind::AssistanceFundBalance => {
                let v = ds
                    .fetch_spot_balance(&policy.assistance_fund_address, &Coin::hype())
                    .await?;
                self.store
                    .update(|s| s.assistance_fund_balance = Some(Stamped::now(v)))
                    .await;
            }
            SourceKind::AssistanceFundUsdc => {
                let v = ds
                    .fetch_spot_balance(&policy.assistance_fund_address, &Coin::usdc())
                    .await?;
                self.store
                    .update(|s| s.assistance_fund_usdc = Some(Stamped::now(v)))
                    .await;
            }
            SourceKind::Market => {
                let v = ds.fetch_market_context().await?;
                self.store.update(|s| s.market = Some(Stamped::now(v))).await;
            }
            SourceKind::FeeHistory => {
                let v = ds.fetch_fee_history().await?;
                self.store.update(|s| s.fee_history = Some(Stamped::now(v))).await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_groups() {
        let poll = PollIntervals::default();
        assert_eq!(SourceKind::TokenInfo.interval(&poll), Duration::from_secs(2));
        assert_eq!(SourceKind::FeeHistory.interval(&poll), Duration::from_secs(10));
        assert_eq!(
            SourceKind::FoundationDelegations.interval(&poll),
            Duration::from_secs(30)
        );
    }
}
