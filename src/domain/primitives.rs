//! Domain primitives: Address, Coin.

use serde::{Deserialize, Serialize};

/// Wallet address (hex string).
///
/// Stored as received. Comparisons against policy addresses go through
/// [`Address::matches`], which ignores hex case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Address(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality, as checksummed and lowercase forms both occur.
    pub fn matches(&self, other: &Address) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// True for a `0x`-prefixed, 40-hex-digit string.
    pub fn is_well_formed(&self) -> bool {
        let s = self.0.as_str();
        s.len() == 42
            && s.starts_with("0x")
            && s[2..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spot coin symbol (e.g., "HYPE", "USDC").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coin(pub String);

impl Coin {
    pub fn new(coin: impl Into<String>) -> Self {
        Coin(coin.into())
    }

    pub fn hype() -> Self {
        Coin::new("HYPE")
    }

    pub fn usdc() -> Self {
        Coin::new("USDC")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_matches_ignores_case() {
        let a = Address::new("0x43E9ABEA1910387c4292bca4b94de81462f8a251");
        let b = Address::new("0x43e9abea1910387c4292bca4b94de81462f8a251");
        assert!(a.matches(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_address_well_formed() {
        assert!(Address::new("0xfefefefefefefefefefefefefefefefefefefefe").is_well_formed());
        assert!(!Address::new("0x123").is_well_formed());
        assert!(!Address::new("fefefefefefefefefefefefefefefefefefefefe00").is_well_formed());
    }

    #[test]
    fn test_address_serializes_as_string() {
        let json = serde_json::to_string(&Address::new("0xabc")).unwrap();
        assert_eq!(json, "\"0xabc\"");
    }

    #[test]
    fn test_coin_display() {
        assert_eq!(Coin::hype().to_string(), "HYPE");
    }
}
