//! Independently polled balance inputs to the supply accountant.

use crate::domain::Decimal;

/// Latest value seen from each balance source.
///
/// `None` means the source has not answered yet. Sources refresh on their
/// own schedules, so any subset may be missing at a given moment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalBalances {
    pub staked_balance: Option<Decimal>,
    pub foundation_delegations: Option<Decimal>,
    pub perp_dex_stake: Option<Decimal>,
    pub evm_bridge_balance: Option<Decimal>,
    pub burnt_evm_balance: Option<Decimal>,
    pub assistance_fund_balance: Option<Decimal>,
}

/// [`ExternalBalances`] with every missing source read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedBalances {
    pub staked_balance: Decimal,
    pub foundation_delegations: Decimal,
    pub perp_dex_stake: Decimal,
    pub evm_bridge_balance: Decimal,
    pub burnt_evm_balance: Decimal,
    pub assistance_fund_balance: Decimal,
}

impl ExternalBalances {
    /// Apply the zero-default for sources that have not responded.
    pub fn resolved(&self) -> ResolvedBalances {
        ResolvedBalances {
            staked_balance: self.staked_balance.unwrap_or_default(),
            foundation_delegations: self.foundation_delegations.unwrap_or_default(),
            perp_dex_stake: self.perp_dex_stake.unwrap_or_default(),
            evm_bridge_balance: self.evm_bridge_balance.unwrap_or_default(),
            burnt_evm_balance: self.burnt_evm_balance.unwrap_or_default(),
            assistance_fund_balance: self.assistance_fund_balance.unwrap_or_default(),
        }
    }

    /// True once every source has reported at least once.
    pub fn is_complete(&self) -> bool {
        self.staked_balance.is_some()
            && self.foundation_delegations.is_some()
            && self.perp_dex_stake.is_some()
            && self.evm_bridge_balance.is_some()
            && self.burnt_evm_balance.is_some()
            && self.assistance_fund_balance.is_some()
    }
}
