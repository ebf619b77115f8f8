//! Years for the assistance fund to buy out the ready-for-sale supply across
//! a grid of prices and daily revenues.

use crate::domain::Decimal;
use serde::Serialize;

const BASE_DAILY_REVENUES: [i64; 9] = [
    2_000_000, 3_000_000, 4_000_000, 5_000_000, 6_000_000, 7_000_000, 8_000_000, 9_000_000,
    10_000_000,
];
const PRICE_STEPS: i64 = 11;
/// Rows in a full grid.
pub const PRICE_ROWS: usize = PRICE_STEPS as usize;
const DAYS_PER_YEAR: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub daily_revenue: Decimal,
    /// `None` where the division is undefined (zero price or zero revenue).
    pub years: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapRow {
    pub price: Decimal,
    pub is_mark: bool,
    pub cells: Vec<HeatmapCell>,
}

/// `ready / (revenue * share / price) / 365`, with an undefined result as `None`.
pub fn years_to_buy(
    ready_for_sale: Decimal,
    daily_revenue: Decimal,
    price: Decimal,
    buyback_share: Decimal,
) -> Option<Decimal> {
    let tokens_per_day = daily_revenue
        .checked_mul(buyback_share)?
        .checked_div(price)?;
    let days = ready_for_sale.checked_div(tokens_per_day)?;
    days.checked_div(Decimal::from(DAYS_PER_YEAR))
}

/// Rows run from mark+5 down to mark-5 in whole-dollar steps; the mark row
/// keeps the mark rounded to one decimal, the others are floored. Columns are
/// the fixed revenue ladder plus the observed daily revenue, ascending.
///
/// Rows whose price falls outside the representable range are left out.
pub fn years_to_buy_grid(
    mark_price: Decimal,
    daily_revenue: Decimal,
    ready_for_sale: Decimal,
    buyback_share: Decimal,
) -> Vec<HeatmapRow> {
    let mark = mark_price.round_dp(1);

    let mut revenues: Vec<Decimal> = BASE_DAILY_REVENUES
        .iter()
        .map(|r| Decimal::from(*r))
        .chain(std::iter::once(daily_revenue))
        .collect();
    revenues.sort();

    (0..PRICE_STEPS)
        .rev()
        .filter_map(|i| {
            let raw = mark.checked_add(Decimal::from(i - PRICE_STEPS / 2))?;
            let is_mark = raw == mark;
            let price = if is_mark { mark } else { raw.floor() };
            let cells = revenues
                .iter()
                .map(|rev| HeatmapCell {
                    daily_revenue: *rev,
                    years: years_to_buy(ready_for_sale, *rev, price, buyback_share),
                })
                .collect();
            Some(HeatmapRow {
                price,
                is_mark,
                cells,
            })
        })
        .collect()
}
