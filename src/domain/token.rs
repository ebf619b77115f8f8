//! Token supply snapshot as reported by the info API `tokenDetails` request.

use crate::domain::{Address, Decimal};
use serde::{Deserialize, Serialize};

/// Raw `tokenDetails` payload. Amounts stay as the decimal strings the API sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDetails {
    pub total_supply: String,
    pub circulating_supply: String,
    #[serde(default)]
    pub future_emissions: Option<String>,
    #[serde(default)]
    pub non_circulating_user_balances: Vec<NonCirculatingBalance>,
}

/// One `[address, amount]` pair from `nonCirculatingUserBalances`.
///
/// The amount keeps its wire text; it is parsed at summation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Address, String)", into = "(Address, String)")]
pub struct NonCirculatingBalance {
    pub address: Address,
    pub amount: String,
}

impl NonCirculatingBalance {
    pub fn new(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            address: Address::new(address),
            amount: amount.into(),
        }
    }

    pub fn parsed_amount(&self) -> Option<Decimal> {
        Decimal::parse_amount(&self.amount)
    }
}

impl From<(Address, String)> for NonCirculatingBalance {
    fn from((address, amount): (Address, String)) -> Self {
        Self { address, amount }
    }
}

impl From<NonCirculatingBalance> for (Address, String) {
    fn from(b: NonCirculatingBalance) -> Self {
        (b.address, b.amount)
    }
}

/// Parsed token supply snapshot.
///
/// Supply fields are `None` when the upstream string did not parse; the
/// accountant treats those as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSupplyInfo {
    pub total_supply: Option<Decimal>,
    pub circulating_supply: Option<Decimal>,
    pub future_emissions: Option<Decimal>,
    pub non_circulating_balances: Vec<NonCirculatingBalance>,
}

impl TokenSupplyInfo {
    pub fn new(total_supply: Decimal, circulating_supply: Decimal) -> Self {
        Self {
            total_supply: Some(total_supply),
            circulating_supply: Some(circulating_supply),
            future_emissions: None,
            non_circulating_balances: Vec::new(),
        }
    }

    pub fn with_future_emissions(mut self, future_emissions: Decimal) -> Self {
        self.future_emissions = Some(future_emissions);
        self
    }

    pub fn with_non_circulating(mut self, balance: NonCirculatingBalance) -> Self {
        self.non_circulating_balances.push(balance);
        self
    }

    pub fn total_supply_or_zero(&self) -> Decimal {
        self.total_supply.unwrap_or_default()
    }

    pub fn circulating_supply_or_zero(&self) -> Decimal {
        self.circulating_supply.unwrap_or_default()
    }
}

impl From<TokenDetails> for TokenSupplyInfo {
    fn from(details: TokenDetails) -> Self {
        Self {
            total_supply: Decimal::parse_amount(&details.total_supply),
            circulating_supply: Decimal::parse_amount(&details.circulating_supply),
            future_emissions: details
                .future_emissions
                .as_deref()
                .and_then(Decimal::parse_amount),
            non_circulating_balances: details.non_circulating_user_balances,
        }
    }
}
