//! Time series, fee history, market, leaderboard and validator records.

use crate::domain::{Address, Decimal};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated value, the input shape for moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: Decimal) -> Self {
        Self { date, value }
    }
}

/// Daily HYPE candle from the buyback API; only the close is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// Daily protocol revenue (buybacks plus burns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub total: Decimal,
}

impl From<&RevenuePoint> for SeriesPoint {
    fn from(r: &RevenuePoint) -> Self {
        SeriesPoint::new(r.date, r.total)
    }
}

/// Price and revenue moving averages aligned on a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedChartRow {
    pub date: NaiveDate,
    pub price: Option<Decimal>,
    #[serde(rename = "revenue7dMA")]
    pub revenue_7d_ma: Option<Decimal>,
    #[serde(rename = "revenue30dMA")]
    pub revenue_30d_ma: Option<Decimal>,
    #[serde(rename = "revenue90dMA")]
    pub revenue_90d_ma: Option<Decimal>,
}

/// Cumulative fee counter sample. `time` is unix seconds, `total_fees` is in
/// micro-USD as the fees API reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSample {
    pub time: i64,
    pub total_fees: Decimal,
}

/// Average daily fees in USD over trailing windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeWindows {
    pub one_day: Decimal,
    pub seven_days: Decimal,
    pub thirty_days: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeePeriod {
    OneDay,
    SevenDays,
    ThirtyDays,
}

impl FeeWindows {
    pub fn get(&self, period: FeePeriod) -> Decimal {
        match period {
            FeePeriod::OneDay => self.one_day,
            FeePeriod::SevenDays => self.seven_days,
            FeePeriod::ThirtyDays => self.thirty_days,
        }
    }
}

/// HYPE/USDC spot context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketContext {
    pub mark_px: Decimal,
    pub prev_day_px: Decimal,
    pub day_ntl_vlm: Decimal,
}

/// A holder row from the project leaderboard, ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub balance: Decimal,
    #[serde(default)]
    pub balance_staked: Decimal,
}

impl LeaderboardRow {
    pub fn holdings(&self) -> Decimal {
        self.balance + self.balance_staked
    }
}

/// One validator's name and total stake, in HYPE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorStake {
    pub validator: Address,
    pub name: String,
    pub stake: Decimal,
}
