//! Mock data source for testing without network calls.

use super::{DataSource, DataSourceError};
use crate::domain::{
    Address, Coin, Decimal, FeeSample, LeaderboardRow, MarketContext, PricePoint, RevenuePoint,
    TokenSupplyInfo, ValidatorStake,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock data source that returns predefined values.
///
/// Unset values answer with a `ParseError`, the same way an upstream that
/// has not been wired up would fail.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    token_info: Option<TokenSupplyInfo>,
    staked_balance: Option<Decimal>,
    validators: Vec<ValidatorStake>,
    delegations: HashMap<String, Decimal>,
    perp_dex_deployers: Option<usize>,
    spot_balances: HashMap<(String, String), Decimal>,
    burnt_evm_total: Option<Decimal>,
    fee_history: Vec<FeeSample>,
    market: Option<MarketContext>,
    prices: Vec<PricePoint>,
    revenue: Vec<RevenuePoint>,
    leaderboard: Vec<LeaderboardRow>,
    failing: Arc<AtomicBool>,
    latency: Option<Duration>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token_info(mut self, info: TokenSupplyInfo) -> Self {
        self.token_info = Some(info);
        self
    }

    pub fn with_staked_balance(mut self, staked: Decimal) -> Self {
        self.staked_balance = Some(staked);
        self
    }

    pub fn with_validators(mut self, validators: Vec<ValidatorStake>) -> Self {
        self.validators = validators;
        self
    }

    /// Delegations made by one wallet.
    pub fn with_delegation(mut self, address: &Address, amount: Decimal) -> Self {
        self.delegations
            .insert(address.as_str().to_lowercase(), amount);
        self
    }

    pub fn with_perp_dex_deployers(mut self, count: usize) -> Self {
        self.perp_dex_deployers = Some(count);
        self
    }

    pub fn with_spot_balance(mut self, user: &Address, coin: &Coin, total: Decimal) -> Self {
        self.spot_balances
            .insert((user.as_str().to_lowercase(), coin.as_str().to_string()), total);
        self
    }

    pub fn with_burnt_evm_total(mut self, total: Decimal) -> Self {
        self.burnt_evm_total = Some(total);
        self
    }

    pub fn with_fee_history(mut self, samples: Vec<FeeSample>) -> Self {
        self.fee_history = samples;
        self
    }

    pub fn with_market(mut self, market: MarketContext) -> Self {
        self.market = Some(market);
        self
    }

    pub fn with_prices(mut self, prices: Vec<PricePoint>) -> Self {
        self.prices = prices;
        self
    }

    pub fn with_revenue(mut self, revenue: Vec<RevenuePoint>) -> Self {
        self.revenue = revenue;
        self
    }

    pub fn with_leaderboard(mut self, rows: Vec<LeaderboardRow>) -> Self {
        self.leaderboard = rows;
        self
    }

    /// Make every call fail with a network error until cleared.
    ///
    /// Shared across clones, so a test can flip it after handing the mock out.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delay every call, like a slow upstream.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn check(&self) -> Result<(), DataSourceError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(DataSourceError::NetworkError("mock outage".to_string()));
        }
        Ok(())
    }

    fn missing(what: &str) -> DataSourceError {
        DataSourceError::ParseError(format!("mock has no {}", what))
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_token_info(&self) -> Result<TokenSupplyInfo, DataSourceError> {
        self.check().await?;
        self.token_info.clone().ok_or_else(|| Self::missing("token info"))
    }

    async fn fetch_staked_balance(&self) -> Result<Decimal, DataSourceError> {
        self.check().await?;
        self.staked_balance.ok_or_else(|| Self::missing("staked balance"))
    }

    async fn fetch_validators(&self) -> Result<Vec<ValidatorStake>, DataSourceError> {
        self.check().await?;
        Ok(self.validators.clone())
    }

    async fn fetch_foundation_delegations(
        &self,
        addresses: &[Address],
    ) -> Result<Decimal, DataSourceError> {
        self.check().await?;
        Ok(addresses
            .iter()
            .filter_map(|a| self.delegations.get(&a.as_str().to_lowercase()))
            .sum())
    }

    async fn fetch_perp_dex_deployer_count(&self) -> Result<usize, DataSourceError> {
        self.check().await?;
        self.perp_dex_deployers
            .ok_or_else(|| Self::missing("perp dexs"))
    }

    async fn fetch_spot_balance(
        &self,
        user: &Address,
        coin: &Coin,
    ) -> Result<Decimal, DataSourceError> {
        self.check().await?;
        Ok(self
            .spot_balances
            .get(&(user.as_str().to_lowercase(), coin.as_str().to_string()))
            .copied()
            .unwrap_or_default())
    }

    async fn fetch_burnt_evm_total(&self) -> Result<Decimal, DataSourceError> {
        self.check().await?;
        self.burnt_evm_total
            .ok_or_else(|| Self::missing("network metrics"))
    }

    async fn fetch_fee_history(&self) -> Result<Vec<FeeSample>, DataSourceError> {
        self.check().await?;
        Ok(self.fee_history.clone())
    }

    async fn fetch_market_context(&self) -> Result<MarketContext, DataSourceError> {
        self.check().await?;
        self.market.ok_or_else(|| Self::missing("market context"))
    }

    async fn fetch_price_history(&self) -> Result<Vec<PricePoint>, DataSourceError> {
        self.check().await?;
        Ok(self.prices.clone())
    }

    async fn fetch_revenue_history(&self) -> Result<Vec<RevenuePoint>, DataSourceError> {
        self.check().await?;
        Ok(self.revenue.clone())
    }

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardRow>, DataSourceError> {
        self.check().await?;
        Ok(self.leaderboard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[tokio::test]
    async fn test_mock_sums_delegations_of_requested_wallets() {
        let a = Address::new("0xAAA");
        let b = Address::new("0xbbb");
        let mock = MockDataSource::new()
            .with_delegation(&a, d("10"))
            .with_delegation(&b, d("5"));

        let both = mock
            .fetch_foundation_delegations(&[Address::new("0xaaa"), b.clone()])
            .await
            .unwrap();
        assert_eq!(both, d("15"));

        let one = mock.fetch_foundation_delegations(&[b]).await.unwrap();
        assert_eq!(one, d("5"));
    }

    #[tokio::test]
    async fn test_mock_spot_balance_defaults_to_zero() {
        let fund = Address::new("0xfefe");
        let mock = MockDataSource::new().with_spot_balance(&fund, &Coin::hype(), d("7"));
        assert_eq!(mock.fetch_spot_balance(&fund, &Coin::hype()).await.unwrap(), d("7"));
        assert_eq!(
            mock.fetch_spot_balance(&fund, &Coin::usdc()).await.unwrap(),
            Decimal::zero()
        );
    }

    #[tokio::test]
    async fn test_mock_failing_toggle_shared_across_clones() {
        let mock = MockDataSource::new().with_staked_balance(d("1"));
        let handle = mock.clone();
        handle.set_failing(true);
        assert!(matches!(
            mock.fetch_staked_balance().await,
            Err(DataSourceError::NetworkError(_))
        ));
        handle.set_failing(false);
        assert_eq!(mock.fetch_staked_balance().await.unwrap(), d("1"));
    }

    #[tokio::test]
    async fn test_mock_unset_value_errors() {
        let mock = MockDataSource::new();
        assert!(mock.fetch_token_info().await.is_err());
        assert!(mock.fetch_market_context().await.is_err());
    }
}
