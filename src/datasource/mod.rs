//! Data source abstraction over the public endpoints the dashboard reads.
//!
//! Each method returns one normalized value; interpretation of those values
//! is left to the engine.

use crate::domain::{
    Address, Coin, Decimal, FeeSample, LeaderboardRow, MarketContext, PricePoint, RevenuePoint,
    TokenSupplyInfo, ValidatorStake,
};
use async_trait::async_trait;
use std::fmt;

pub mod hyperliquid;
pub mod mock;

pub use hyperliquid::{Endpoints, HyperliquidDataSource};
pub use mock::MockDataSource;

/// Source of raw supply, balance and market inputs.
///
/// Implementations must handle retry/backoff and rate limiting.
#[async_trait]
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Token supply snapshot (`tokenDetails`).
    async fn fetch_token_info(&self) -> Result<TokenSupplyInfo, DataSourceError>;

    /// Total stake across all validators, in HYPE.
    async fn fetch_staked_balance(&self) -> Result<Decimal, DataSourceError>;

    /// Every validator with its stake, largest first.
    async fn fetch_validators(&self) -> Result<Vec<ValidatorStake>, DataSourceError>;

    /// Sum of all delegations made by the given wallets.
    async fn fetch_foundation_delegations(
        &self,
        addresses: &[Address],
    ) -> Result<Decimal, DataSourceError>;

    /// Number of registered perp dexs that name a deployer.
    async fn fetch_perp_dex_deployer_count(&self) -> Result<usize, DataSourceError>;

    /// Spot `total` of `coin` held by `user`; zero if the coin is absent.
    async fn fetch_spot_balance(&self, user: &Address, coin: &Coin)
        -> Result<Decimal, DataSourceError>;

    /// HYPE burned as HyperEVM gas fees, all time.
    async fn fetch_burnt_evm_total(&self) -> Result<Decimal, DataSourceError>;

    /// Cumulative fee counter history, ascending by time.
    async fn fetch_fee_history(&self) -> Result<Vec<FeeSample>, DataSourceError>;

    /// HYPE/USDC spot mark, previous-day price and volume.
    async fn fetch_market_context(&self) -> Result<MarketContext, DataSourceError>;

    async fn fetch_price_history(&self) -> Result<Vec<PricePoint>, DataSourceError>;

    async fn fetch_revenue_history(&self) -> Result<Vec<RevenuePoint>, DataSourceError>;

    /// Holder leaderboard, ordered by rank.
    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardRow>, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone)]
pub enum DataSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// HTTP error (e.g., 429 rate limit, 5xx server error)
    HttpError { status: u16, message: String },
    /// Parsing error (invalid JSON or malformed response)
    ParseError(String),
    /// Rate limit exceeded (caller should implement backoff)
    RateLimited,
    /// Source is not configured (e.g., no project API host)
    Unconfigured(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
            DataSourceError::Unconfigured(what) => write!(f, "Not configured: {}", what),
        }
    }
}

impl std::error::Error for DataSourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_error_display() {
        let err = DataSourceError::NetworkError("connection timeout".to_string());
        assert_eq!(err.to_string(), "Network error: connection timeout");

        let err = DataSourceError::HttpError {
            status: 429,
            message: "Too many requests".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 429: Too many requests");

        let err = DataSourceError::ParseError("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Parse error: invalid JSON");

        let err = DataSourceError::RateLimited;
        assert_eq!(err.to_string(), "Rate limited");

        let err = DataSourceError::Unconfigured("PROJECT_API_URL".to_string());
        assert_eq!(err.to_string(), "Not configured: PROJECT_API_URL");
    }
}
