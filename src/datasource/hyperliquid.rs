//! HTTP client for the Hyperliquid info API and the stats APIs around it.

use super::{DataSource, DataSourceError};
use crate::domain::{
    Address, Coin, Decimal, FeeSample, LeaderboardRow, MarketContext, PricePoint, RevenuePoint,
    TokenDetails, TokenSupplyInfo, ValidatorStake,
};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use futures::future::try_join_all;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Staking amounts from `validatorSummaries` are integers in 1e-8 HYPE.
const STAKE_DECIMALS: u32 = 8;

/// Base URLs for every upstream the data source talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub hyperliquid_api_url: String,
    pub evm_metrics_url: String,
    pub fees_api_url: String,
    pub buyback_api_url: String,
    pub project_api_url: Option<String>,
    pub token_id: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            hyperliquid_api_url: "https://api.hyperliquid.xyz".to_string(),
            evm_metrics_url:
                "https://api-hyperliquid.asxn.xyz/api/hyper-evm/network-metrics?time_range=all"
                    .to_string(),
            fees_api_url: "https://api.hypurrscan.io/fees".to_string(),
            buyback_api_url: "https://api-hyperliquid.asxn.xyz/api/buyback".to_string(),
            project_api_url: None,
            token_id: "0x0d01dc56dcaaca66ad901c959b4011ec".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HyperliquidDataSource {
    client: Client,
    endpoints: Endpoints,
}

impl HyperliquidDataSource {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    async fn post_info(&self, payload: Value) -> Result<Value, DataSourceError> {
        let url = format!("{}/info", self.endpoints.hyperliquid_api_url);
        self.send_json(|| self.client.post(&url).json(&payload)).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, DataSourceError> {
        self.send_json(|| self.client.get(url)).await
    }

    /// Send with exponential backoff. 429 and 5xx are retried; other
    /// failures are permanent.
    async fn send_json<F>(&self, build: F) -> Result<Value, DataSourceError>
    where
        F: Fn() -> RequestBuilder,
    {
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        retry(backoff, || {
            let request = build();
            async move {
                let response = request.send().await.map_err(|e| {
                    backoff::Error::transient(DataSourceError::NetworkError(e.to_string()))
                })?;

                let status = response.status();
                if status == 429 {
                    return Err(backoff::Error::transient(DataSourceError::RateLimited));
                }
                if status.is_server_error() {
                    return Err(backoff::Error::transient(DataSourceError::HttpError {
                        status: status.as_u16(),
                        message: "Server error".to_string(),
                    }));
                }
                if !status.is_success() {
                    return Err(backoff::Error::permanent(DataSourceError::HttpError {
                        status: status.as_u16(),
                        message: "Client error".to_string(),
                    }));
                }

                response.json::<Value>().await.map_err(|e| {
                    backoff::Error::permanent(DataSourceError::ParseError(e.to_string()))
                })
            }
        })
        .await
    }
}

#[async_trait]
impl DataSource for HyperliquidDataSource {
    async fn fetch_token_info(&self) -> Result<TokenSupplyInfo, DataSourceError> {
        debug!("Fetching token details for {}", self.endpoints.token_id);
        let response = self
            .post_info(serde_json::json!({
                "type": "tokenDetails",
                "tokenId": self.endpoints.token_id,
            }))
            .await?;
        parse_token_info(response)
    }

    async fn fetch_staked_balance(&self) -> Result<Decimal, DataSourceError> {
        debug!("Fetching validator summaries");
        let response = self
            .post_info(serde_json::json!({ "type": "validatorSummaries" }))
            .await?;
        parse_staked_balance(&response)
    }

    async fn fetch_validators(&self) -> Result<Vec<ValidatorStake>, DataSourceError> {
        debug!("Fetching validator summaries");
        let response = self
            .post_info(serde_json::json!({ "type": "validatorSummaries" }))
            .await?;
        parse_validators(&response)
    }

    async fn fetch_foundation_delegations(
        &self,
        addresses: &[Address],
    ) -> Result<Decimal, DataSourceError> {
        debug!("Fetching delegations for {} foundation wallets", addresses.len());
        let per_address = try_join_all(addresses.iter().map(|address| async move {
            let response = self
                .post_info(serde_json::json!({
                    "type": "delegations",
                    "user": address.as_str(),
                }))
                .await?;
            parse_delegations_total(&response)
        }))
        .await?;
        Ok(per_address.into_iter().sum())
    }

    async fn fetch_perp_dex_deployer_count(&self) -> Result<usize, DataSourceError> {
        debug!("Fetching perp dexs");
        let response = self
            .post_info(serde_json::json!({ "type": "perpDexs" }))
            .await?;
        parse_perp_dex_deployer_count(&response)
    }

    async fn fetch_spot_balance(
        &self,
        user: &Address,
        coin: &Coin,
    ) -> Result<Decimal, DataSourceError> {
        debug!("Fetching spot balance for user={}, coin={}", user, coin);
        let response = self
            .post_info(serde_json::json!({
                "type": "spotClearinghouseState",
                "user": user.as_str(),
            }))
            .await?;
        parse_spot_balance(&response, coin)
    }

    async fn fetch_burnt_evm_total(&self) -> Result<Decimal, DataSourceError> {
        debug!("Fetching HyperEVM network metrics");
        let response = self.get_json(&self.endpoints.evm_metrics_url).await?;
        parse_burnt_evm_total(&response)
    }

    async fn fetch_fee_history(&self) -> Result<Vec<FeeSample>, DataSourceError> {
        debug!("Fetching fee history");
        let response = self.get_json(&self.endpoints.fees_api_url).await?;
        parse_fee_history(&response)
    }

    async fn fetch_market_context(&self) -> Result<MarketContext, DataSourceError> {
        debug!("Fetching spot asset contexts");
        let response = self
            .post_info(serde_json::json!({ "type": "spotMetaAndAssetCtxs" }))
            .await?;
        parse_market_context(&response, &Coin::hype())
    }

    async fn fetch_price_history(&self) -> Result<Vec<PricePoint>, DataSourceError> {
        let url = format!("{}/hype-price", self.endpoints.buyback_api_url);
        debug!("Fetching price history from {}", url);
        let response = self.get_json(&url).await?;
        parse_rows(response)
    }

    async fn fetch_revenue_history(&self) -> Result<Vec<RevenuePoint>, DataSourceError> {
        let url = format!("{}/revenues", self.endpoints.buyback_api_url);
        debug!("Fetching revenue history from {}", url);
        let mut response = self.get_json(&url).await?;
        let data = response
            .get_mut("data")
            .map(Value::take)
            .ok_or_else(|| DataSourceError::ParseError("Missing data field".to_string()))?;
        parse_rows(data)
    }

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardRow>, DataSourceError> {
        let host = self
            .endpoints
            .project_api_url
            .as_deref()
            .ok_or_else(|| DataSourceError::Unconfigured("PROJECT_API_URL".to_string()))?;
        let url = format!("{}/leaderboard?coin=hype", host);
        debug!("Fetching leaderboard from {}", url);
        let mut response = self.get_json(&url).await?;
        let rows = response
            .get_mut("rows")
            .map(Value::take)
            .ok_or_else(|| DataSourceError::ParseError("Missing rows field".to_string()))?;
        parse_rows(rows)
    }
}

fn parse_token_info(response: Value) -> Result<TokenSupplyInfo, DataSourceError> {
    let details: TokenDetails = serde_json::from_value(response)
        .map_err(|e| DataSourceError::ParseError(format!("Invalid tokenDetails: {}", e)))?;
    Ok(TokenSupplyInfo::from(details))
}

fn expect_array<'a>(response: &'a Value, what: &str) -> Result<&'a Vec<Value>, DataSourceError> {
    response
        .as_array()
        .ok_or_else(|| DataSourceError::ParseError(format!("Expected array of {}", what)))
}

fn parse_staked_balance(response: &Value) -> Result<Decimal, DataSourceError> {
    Ok(parse_validators(response)?.iter().map(|v| v.stake).sum())
}

fn parse_validators(response: &Value) -> Result<Vec<ValidatorStake>, DataSourceError> {
    let entries = expect_array(response, "validators")?;

    let mut validators = Vec::with_capacity(entries.len());
    for entry in entries {
        let address = entry.get("validator").and_then(|v| v.as_str());
        let stake = entry.get("stake").and_then(|v| v.as_i64());
        let (Some(address), Some(stake)) = (address, stake) else {
            warn!("Skipping validator without address or integer stake: {}", entry);
            continue;
        };
        let stake = Decimal::from_base_units(i128::from(stake), STAKE_DECIMALS)
            .ok_or_else(|| DataSourceError::ParseError("Stake out of range".to_string()))?;
        validators.push(ValidatorStake {
            validator: Address::new(address),
            name: entry
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            stake,
        });
    }
    validators.sort_by(|a, b| b.stake.cmp(&a.stake));
    Ok(validators)
}

fn parse_delegations_total(response: &Value) -> Result<Decimal, DataSourceError> {
    let delegations = expect_array(response, "delegations")?;
    Ok(delegations
        .iter()
        .map(|d| {
            let amount = d.get("amount").and_then(|v| v.as_str()).unwrap_or("");
            Decimal::parse_amount(amount).unwrap_or_else(|| {
                warn!("Failed to parse delegation amount: {}", d);
                Decimal::zero()
            })
        })
        .sum())
}

fn parse_perp_dex_deployer_count(response: &Value) -> Result<usize, DataSourceError> {
    let dexs = expect_array(response, "perp dexs")?;
    Ok(dexs
        .iter()
        .filter(|dex| {
            dex.get("deployer")
                .and_then(|v| v.as_str())
                .is_some_and(|s| !s.is_empty())
        })
        .count())
}

fn parse_spot_balance(response: &Value, coin: &Coin) -> Result<Decimal, DataSourceError> {
    let balances = response
        .get("balances")
        .and_then(|v| v.as_array())
        .ok_or_else(|| DataSourceError::ParseError("Missing balances field".to_string()))?;

    let total = balances
        .iter()
        .find(|b| b.get("coin").and_then(|v| v.as_str()) == Some(coin.as_str()))
        .and_then(|b| b.get("total"))
        .and_then(|v| v.as_str());

    match total {
        Some(s) => Decimal::parse_amount(s)
            .ok_or_else(|| DataSourceError::ParseError(format!("Invalid {} total: {}", coin, s))),
        None => Ok(Decimal::zero()),
    }
}

fn parse_burnt_evm_total(response: &Value) -> Result<Decimal, DataSourceError> {
    let chart_data = response
        .get("chart_data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| DataSourceError::ParseError("Missing chart_data field".to_string()))?;

    Ok(chart_data
        .iter()
        .filter_map(|entry| {
            let fee = entry
                .get("fees_hype_total")
                .and_then(|v| v.as_f64())
                .and_then(Decimal::from_f64);
            if fee.is_none() {
                warn!("Skipping network metrics entry without fees_hype_total");
            }
            fee
        })
        .sum())
}

fn parse_fee_history(response: &Value) -> Result<Vec<FeeSample>, DataSourceError> {
    let rows = expect_array(response, "fee samples")?;

    let mut samples = Vec::with_capacity(rows.len());
    for row in rows {
        let time = row.get("time").and_then(|v| v.as_i64());
        let total_fees = row
            .get("total_fees")
            .and_then(|v| v.as_f64())
            .and_then(Decimal::from_f64);
        match (time, total_fees) {
            (Some(time), Some(total_fees)) => samples.push(FeeSample { time, total_fees }),
            _ => warn!("Failed to parse fee sample: {}", row),
        }
    }
    samples.sort_by_key(|s| s.time);
    Ok(samples)
}

fn parse_market_context(response: &Value, coin: &Coin) -> Result<MarketContext, DataSourceError> {
    let meta = response
        .get(0)
        .ok_or_else(|| DataSourceError::ParseError("Missing spot meta".to_string()))?;
    let ctxs = response
        .get(1)
        .and_then(|v| v.as_array())
        .ok_or_else(|| DataSourceError::ParseError("Missing asset contexts".to_string()))?;

    let token_index = meta
        .get("tokens")
        .and_then(|v| v.as_array())
        .and_then(|tokens| {
            tokens
                .iter()
                .find(|t| t.get("name").and_then(|v| v.as_str()) == Some(coin.as_str()))
        })
        .and_then(|t| t.get("index"))
        .and_then(|v| v.as_u64())
        .ok_or_else(|| DataSourceError::ParseError(format!("Token {} not listed", coin)))?;

    // USDC is token 0; the pair is [base, quote]
    let pair_index = meta
        .get("universe")
        .and_then(|v| v.as_array())
        .and_then(|universe| {
            universe.iter().find(|pair| {
                let tokens = pair.get("tokens").and_then(|v| v.as_array());
                let base = tokens.and_then(|t| t.first()).and_then(|v| v.as_u64());
                let quote = tokens.and_then(|t| t.get(1)).and_then(|v| v.as_u64());
                base == Some(token_index) && quote == Some(0)
            })
        })
        .and_then(|pair| pair.get("index"))
        .and_then(|v| v.as_u64())
        .ok_or_else(|| DataSourceError::ParseError(format!("No {}/USDC pair", coin)))?;

    let ctx = ctxs
        .get(pair_index as usize)
        .ok_or_else(|| DataSourceError::ParseError("Pair context missing".to_string()))?;

    let field = |name: &str| -> Result<Decimal, DataSourceError> {
        ctx.get(name)
            .and_then(|v| v.as_str())
            .and_then(Decimal::parse_amount)
            .ok_or_else(|| DataSourceError::ParseError(format!("Missing {} field", name)))
    };

    Ok(MarketContext {
        mark_px: field("markPx")?,
        prev_day_px: field("prevDayPx")?,
        day_ntl_vlm: field("dayNtlVlm")?,
    })
}

/// Deserialize an array of rows, skipping entries that do not fit.
fn parse_rows<T>(response: Value) -> Result<Vec<T>, DataSourceError>
where
    T: for<'de> Deserialize<'de>,
{
    let rows = match response {
        Value::Array(rows) => rows,
        _ => return Err(DataSourceError::ParseError("Expected array response".to_string())),
    };

    let mut parsed = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value::<T>(row) {
            Ok(item) => parsed.push(item),
            Err(e) => warn!("Failed to parse row: {}", e),
        }
    }
    Ok(parsed)
}
