//! Domain types for the HYPE supply service.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - Domain primitives: Address, Coin
//! - Token supply and external balance inputs
//! - Derived breakdown and donut segment records
//! - Series, fee, market and leaderboard records

pub mod balances;
pub mod breakdown;
pub mod decimal;
pub mod primitives;
pub mod series;
pub mod token;

pub use balances::{ExternalBalances, ResolvedBalances};
pub use breakdown::{Segment, SegmentKind, SupplyBreakdown};
pub use decimal::Decimal;
pub use primitives::{Address, Coin};
pub use series::{
    CombinedChartRow, FeePeriod, FeeSample, FeeWindows, LeaderboardRow, MarketContext,
    PricePoint, RevenuePoint, SeriesPoint, ValidatorStake,
};
pub use token::{NonCirculatingBalance, TokenDetails, TokenSupplyInfo};
