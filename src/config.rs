use crate::datasource::Endpoints;
use crate::domain::{Address, Decimal};
use crate::engine::AccountingPolicy;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub endpoints: Endpoints,
    pub policy: AccountingPolicy,
    pub poll: PollIntervals,
}

/// Refresh periods per source group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// Token info, staking, spot balances and market context.
    pub fast: Duration,
    /// EVM burn metrics and fee history.
    pub metrics: Duration,
    /// Foundation delegations and perp-dex deployers.
    pub slow: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            fast: Duration::from_millis(2_000),
            metrics: Duration::from_millis(10_000),
            slow: Duration::from_millis(30_000),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            hyperliquid_api_url: string_or(&env_map, "HYPERLIQUID_API_URL", defaults.hyperliquid_api_url),
            evm_metrics_url: string_or(&env_map, "EVM_METRICS_URL", defaults.evm_metrics_url),
            fees_api_url: string_or(&env_map, "FEES_API_URL", defaults.fees_api_url),
            buyback_api_url: string_or(&env_map, "BUYBACK_API_URL", defaults.buyback_api_url),
            project_api_url: env_map
                .get("PROJECT_API_URL")
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty()),
            token_id: string_or(&env_map, "HYPE_TOKEN_ID", defaults.token_id),
        };

        let policy = parse_policy_from_map(&env_map)?;

        let poll = PollIntervals {
            fast: millis_or(&env_map, "POLL_FAST_MS", PollIntervals::default().fast)?,
            metrics: millis_or(&env_map, "POLL_METRICS_MS", PollIntervals::default().metrics)?,
            slow: millis_or(&env_map, "POLL_SLOW_MS", PollIntervals::default().slow)?,
        };

        Ok(Config {
            port,
            endpoints,
            policy,
            poll,
        })
    }
}

fn string_or(env_map: &HashMap<String, String>, key: &str, default: String) -> String {
    env_map
        .get(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

fn millis_or(
    env_map: &HashMap<String, String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match env_map.get(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
            _ => Err(ConfigError::InvalidValue(
                key.to_string(),
                "must be a positive number of milliseconds".to_string(),
            )),
        },
    }
}

fn decimal_or(
    env_map: &HashMap<String, String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal, ConfigError> {
    match env_map.get(key) {
        None => Ok(default),
        Some(raw) => Decimal::parse_amount(raw).ok_or_else(|| {
            ConfigError::InvalidValue(key.to_string(), "must be a decimal number".to_string())
        }),
    }
}

fn address_or(
    env_map: &HashMap<String, String>,
    key: &str,
    default: Address,
) -> Result<Address, ConfigError> {
    match env_map.get(key) {
        None => Ok(default),
        Some(raw) => parse_address(key, raw),
    }
}

fn parse_address(key: &str, raw: &str) -> Result<Address, ConfigError> {
    let address = Address::new(raw.trim());
    if address.is_well_formed() {
        Ok(address)
    } else {
        Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("not a 0x-prefixed 20-byte address: {}", raw),
        ))
    }
}

fn parse_policy_from_map(env_map: &HashMap<String, String>) -> Result<AccountingPolicy, ConfigError> {
    let defaults = AccountingPolicy::default();

    let foundation_addresses = match parse_foundation_addresses_from_map(env_map)? {
        Some(addresses) => addresses,
        None => defaults.foundation_addresses,
    };

    let min_visible_percent =
        decimal_or(env_map, "MIN_VISIBLE_PERCENT", defaults.min_visible_percent)?;
    if min_visible_percent.is_negative() || min_visible_percent > Decimal::hundred() {
        return Err(ConfigError::InvalidValue(
            "MIN_VISIBLE_PERCENT".to_string(),
            "must be between 0 and 100".to_string(),
        ));
    }

    let buyback_share = decimal_or(env_map, "BUYBACK_SHARE", defaults.buyback_share)?;
    if !buyback_share.is_positive() || buyback_share > Decimal::from(1i64) {
        return Err(ConfigError::InvalidValue(
            "BUYBACK_SHARE".to_string(),
            "must be in (0, 1]".to_string(),
        ));
    }

    Ok(AccountingPolicy {
        initial_supply: decimal_or(env_map, "INITIAL_SUPPLY", defaults.initial_supply)?,
        stake_per_deployer: decimal_or(env_map, "STAKE_PER_DEPLOYER", defaults.stake_per_deployer)?,
        foundation_addresses,
        fdv_foundation_wallet: address_or(
            env_map,
            "FDV_FOUNDATION_WALLET",
            defaults.fdv_foundation_wallet,
        )?,
        assistance_fund_address: address_or(
            env_map,
            "ASSISTANCE_FUND_ADDRESS",
            defaults.assistance_fund_address,
        )?,
        evm_bridge_address: address_or(env_map, "EVM_BRIDGE_ADDRESS", defaults.evm_bridge_address)?,
        min_visible_percent,
        buyback_share,
    })
}

/// `FOUNDATION_ADDRESSES` (comma separated) wins over
/// `FOUNDATION_ADDRESSES_FILE` (one per line). `None` when neither is set.
fn parse_foundation_addresses_from_map(
    env_map: &HashMap<String, String>,
) -> Result<Option<Vec<Address>>, ConfigError> {
    let (key, entries): (&str, Vec<String>) =
        if let Some(list) = env_map.get("FOUNDATION_ADDRESSES") {
            (
                "FOUNDATION_ADDRESSES",
                list.split(',').map(|s| s.trim().to_string()).collect(),
            )
        } else if let Some(file_path) = env_map.get("FOUNDATION_ADDRESSES_FILE") {
            let content = std::fs::read_to_string(file_path).map_err(|_| {
                ConfigError::InvalidValue(
                    "FOUNDATION_ADDRESSES_FILE".to_string(),
                    "file not found or unreadable".to_string(),
                )
            })?;
            (
                "FOUNDATION_ADDRESSES_FILE",
                content.lines().map(|line| line.trim().to_string()).collect(),
            )
        } else {
            return Ok(None);
        };

    entries
        .iter()
        .filter(|s| !s.is_empty() && !s.starts_with('#'))
        .map(|s| parse_address(key, s))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
