//! Headline figures for the stats ticker.

use crate::domain::{Decimal, MarketContext, ResolvedBalances, TokenSupplyInfo};
use crate::engine::SupplyAccountant;
use serde::Serialize;

/// Day-over-day price move as a fraction (0.05 = 5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", content = "percent", rename_all = "lowercase")]
pub enum PriceChange {
    Up(Decimal),
    Down(Decimal),
}

impl PriceChange {
    /// `None` when the previous price is zero.
    pub fn from_prices(mark: Decimal, prev_day: Decimal) -> Option<Self> {
        let ratio = mark.checked_div(prev_day)?;
        let one = Decimal::from(1i64);
        if ratio >= one {
            Some(PriceChange::Up(ratio - one))
        } else {
            Some(PriceChange::Down(one - ratio))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFigures {
    pub mark_price: Decimal,
    pub price_change: Option<PriceChange>,
    pub day_volume: Decimal,
    pub market_cap: Decimal,
    pub fdv: Decimal,
    pub burned_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerStats {
    /// Core burns, EVM burns, and assistance fund holdings together.
    pub total_burned: Decimal,
    pub burned_core: Decimal,
    pub burned_evm: Decimal,
    pub burned_assistance_fund: Decimal,
    pub available_supply: Decimal,
    pub adjusted_total_supply: Decimal,
    pub fdv_supply: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketFigures>,
}

impl TickerStats {
    pub fn compute(
        accountant: &SupplyAccountant,
        token: &TokenSupplyInfo,
        balances: &ResolvedBalances,
        assistance_fund_balance: Decimal,
        market: Option<&MarketContext>,
    ) -> Self {
        let total_supply = token.total_supply_or_zero();
        let circulating_supply = token.circulating_supply_or_zero();
        let burned_core = accountant.burned_from_trading(total_supply);
        let burned_evm = balances.burnt_evm_balance;

        let fdv_wallet = &accountant.policy().fdv_foundation_wallet;
        let non_circulating_excluding_foundation: Decimal = token
            .non_circulating_balances
            .iter()
            .filter(|b| !b.address.matches(fdv_wallet))
            .map(|b| b.parsed_amount().unwrap_or_default())
            .sum();

        let available_supply = circulating_supply - burned_evm;
        let fdv_supply = total_supply - non_circulating_excluding_foundation;

        let market = market.map(|m| MarketFigures {
            mark_price: m.mark_px,
            price_change: PriceChange::from_prices(m.mark_px, m.prev_day_px),
            day_volume: m.day_ntl_vlm,
            market_cap: m.mark_px * available_supply,
            fdv: m.mark_px * fdv_supply,
            burned_value: m.mark_px * burned_core,
        });

        TickerStats {
            total_burned: burned_core + burned_evm + assistance_fund_balance,
            burned_core,
            burned_evm,
            burned_assistance_fund: assistance_fund_balance,
            available_supply,
            adjusted_total_supply: total_supply - burned_evm,
            fdv_supply,
            market,
        }
    }
}
