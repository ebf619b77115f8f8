//! Supply and burn accounting.
//!
//! Every method is a pure function of its arguments and the injected
//! [`AccountingPolicy`]. Missing inputs are zero, nothing is floored, and
//! negative intermediate results are returned as-is.

use crate::domain::{
    Address, Decimal, ExternalBalances, NonCirculatingBalance, SupplyBreakdown, TokenSupplyInfo,
};

pub const INITIAL_SUPPLY: i64 = 1_000_000_000;
pub const STAKE_PER_DEPLOYER: i64 = 500_000;
pub const ASSISTANCE_FUND_ADDRESS: &str = "0xfefefefefefefefefefefefefefefefefefefefe";
pub const EVM_BRIDGE_ADDRESS: &str = "0x2222222222222222222222222222222222222222";
pub const FOUNDATION_ADDRESSES: [&str; 2] = [
    "0x43e9abea1910387c4292bca4b94de81462f8a251",
    "0xd57ecca444a9acb7208d286be439de12dd09de5d",
];

/// Policy values that change without the arithmetic changing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountingPolicy {
    pub initial_supply: Decimal,
    pub stake_per_deployer: Decimal,
    /// Wallets whose delegations are excluded from public staked supply.
    pub foundation_addresses: Vec<Address>,
    /// Non-circulating wallet that still counts toward FDV.
    pub fdv_foundation_wallet: Address,
    pub assistance_fund_address: Address,
    pub evm_bridge_address: Address,
    /// Smallest donut slice, as a percent of total supply.
    pub min_visible_percent: Decimal,
    /// Share of revenue the assistance fund spends on buybacks.
    pub buyback_share: Decimal,
}

impl Default for AccountingPolicy {
    fn default() -> Self {
        Self {
            initial_supply: Decimal::from(INITIAL_SUPPLY),
            stake_per_deployer: Decimal::from(STAKE_PER_DEPLOYER),
            foundation_addresses: FOUNDATION_ADDRESSES.iter().map(|a| Address::new(*a)).collect(),
            fdv_foundation_wallet: Address::new(FOUNDATION_ADDRESSES[0]),
            assistance_fund_address: Address::new(ASSISTANCE_FUND_ADDRESS),
            evm_bridge_address: Address::new(EVM_BRIDGE_ADDRESS),
            min_visible_percent: Decimal::new(rust_decimal::Decimal::new(25, 2)),
            buyback_share: Decimal::new(rust_decimal::Decimal::new(97, 2)),
        }
    }
}

/// Which earmarked amounts to take out of circulating supply when computing
/// the ready-for-sale figure. Each flag is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyForSaleExclusions {
    pub assistance_fund: bool,
    pub staked: bool,
    pub perp_dex: bool,
    /// The "exclude bridged HYPE" toggle.
    pub evm: bool,
}

impl Default for ReadyForSaleExclusions {
    fn default() -> Self {
        Self {
            assistance_fund: true,
            staked: true,
            perp_dex: false,
            evm: false,
        }
    }
}

impl ReadyForSaleExclusions {
    pub fn none() -> Self {
        Self {
            assistance_fund: false,
            staked: false,
            perp_dex: false,
            evm: false,
        }
    }

    pub fn with_evm(mut self, exclude: bool) -> Self {
        self.evm = exclude;
        self
    }

    pub fn with_perp_dex(mut self, exclude: bool) -> Self {
        self.perp_dex = exclude;
        self
    }
}

/// Candidate subtrahends for [`SupplyAccountant::ready_for_sale_supply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadyForSaleInputs {
    pub assistance_fund_balance: Decimal,
    pub staked_circulating: Decimal,
    pub perp_dex_stake: Decimal,
    pub evm_balance: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct SupplyAccountant {
    policy: AccountingPolicy,
}

impl SupplyAccountant {
    pub fn new(policy: AccountingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AccountingPolicy {
        &self.policy
    }

    /// Supply removed by trading-fee burns: `initial_supply - total_supply`.
    ///
    /// Negative if `total_supply` exceeds the initial supply.
    pub fn burned_from_trading(&self, total_supply: Decimal) -> Decimal {
        self.policy.initial_supply - total_supply
    }

    /// Publicly staked supply: staked minus foundation delegations minus
    /// perp-dex deployer bonds. Transiently negative while sources load.
    pub fn staked_circulating(
        &self,
        staked_balance: Decimal,
        foundation_delegations: Decimal,
        perp_dex_stake: Decimal,
    ) -> Decimal {
        staked_balance - foundation_delegations - perp_dex_stake
    }

    /// Circulating supply minus each excluded component, in the order
    /// assistance fund, staked, perp dex, EVM. No zero floor.
    pub fn ready_for_sale_supply(
        &self,
        circulating_supply: Decimal,
        inputs: &ReadyForSaleInputs,
        exclusions: ReadyForSaleExclusions,
    ) -> Decimal {
        let mut supply = circulating_supply;
        if exclusions.assistance_fund {
            supply = supply - inputs.assistance_fund_balance;
        }
        if exclusions.staked {
            supply = supply - inputs.staked_circulating;
        }
        if exclusions.perp_dex {
            supply = supply - inputs.perp_dex_stake;
        }
        if exclusions.evm {
            supply = supply - inputs.evm_balance;
        }
        supply
    }

    /// `total_supply * min_visible_percent / 100`.
    pub fn minimum_visible_segment(
        &self,
        total_supply: Decimal,
        min_visible_percent: Decimal,
    ) -> Decimal {
        total_supply * min_visible_percent * Decimal::new(rust_decimal::Decimal::new(1, 2))
    }

    /// Sum of the parsed amounts; unparsable entries count as zero.
    pub fn sum_non_circulating_balances(&self, balances: &[NonCirculatingBalance]) -> Decimal {
        balances
            .iter()
            .map(|b| b.parsed_amount().unwrap_or_default())
            .sum()
    }

    /// Bond attributed to registered perp-dex deployers.
    pub fn perp_dex_stake(&self, deployer_count: usize) -> Decimal {
        Decimal::from(deployer_count) * self.policy.stake_per_deployer
    }

    /// Assistance fund balance: the dedicated query when available, else the
    /// fund's entry in the non-circulating list.
    pub fn assistance_fund_balance(
        &self,
        token: &TokenSupplyInfo,
        balances: &ExternalBalances,
    ) -> Decimal {
        balances
            .assistance_fund_balance
            .or_else(|| {
                token
                    .non_circulating_balances
                    .iter()
                    .find(|b| b.address.matches(&self.policy.assistance_fund_address))
                    .and_then(|b| b.parsed_amount())
            })
            .unwrap_or_default()
    }

    /// Full breakdown of the current snapshot.
    ///
    /// Assistance fund, perp-dex bonds and bridged EVM balance are
    /// circulating-but-earmarked. EVM burns are reported only in
    /// `burned_evm`. The assistance fund's entry in the non-circulating list,
    /// if present, is left out of `non_circulating_other` so the fund is
    /// counted once.
    pub fn breakdown(
        &self,
        token: &TokenSupplyInfo,
        balances: &ExternalBalances,
        exclusions: ReadyForSaleExclusions,
    ) -> SupplyBreakdown {
        let resolved = balances.resolved();
        let total_supply = token.total_supply_or_zero();
        let circulating_supply = token.circulating_supply_or_zero();

        let assistance = self.assistance_fund_balance(token, balances);
        let perp_dex = resolved.perp_dex_stake;
        let staked = self.staked_circulating(
            resolved.staked_balance,
            resolved.foundation_delegations,
            perp_dex,
        );
        let evm = resolved.evm_bridge_balance - resolved.burnt_evm_balance;
        let other = circulating_supply - assistance - staked - perp_dex - evm;

        let non_circulating_other = token
            .non_circulating_balances
            .iter()
            .filter(|b| !b.address.matches(&self.policy.assistance_fund_address))
            .map(|b| b.parsed_amount().unwrap_or_default())
            .sum();

        let ready_for_sale_supply = self.ready_for_sale_supply(
            circulating_supply,
            &ReadyForSaleInputs {
                assistance_fund_balance: assistance,
                staked_circulating: staked,
                perp_dex_stake: perp_dex,
                evm_balance: evm,
            },
            exclusions,
        );

        SupplyBreakdown {
            total_supply,
            circulating_supply,
            other_circulating: other,
            staked_circulating: staked,
            perp_dex_circulating: perp_dex,
            assistance_circulating: assistance,
            evm_circulating: evm,
            burned_trading_fees: self.burned_from_trading(total_supply),
            burned_evm: resolved.burnt_evm_balance,
            non_circulating_future_emissions: token.future_emissions.unwrap_or_default(),
            non_circulating_other,
            ready_for_sale_supply,
        }
    }
}
