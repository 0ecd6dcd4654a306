//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backends send, so they can be used directly in wire types
//! without conversion overhead.

pub mod amount;
pub mod fmt;
pub mod serde_util;

pub use amount::{
    parse_quantity, round2, round8, round_half_up, TokenAmount, ETH_DECIMALS,
    STABLECOIN_DECIMALS,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── ProductCode ─────────────────────────────────────────────────────────────

/// Newtype for catalog product codes (e.g. `"RELIC-SWORD-001"`).
///
/// Listings on the order book are tagged with this code in their sell metadata,
/// and pricing configuration can be scoped per code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProductCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for ProductCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProductCode(s.to_string()))
    }
}

impl Serialize for ProductCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ProductCode(s))
    }
}

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Opaque order-book page cursor. Never inspected, only echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── BuyType ─────────────────────────────────────────────────────────────────

/// The token a buyer pays with, derived from the order's token-type string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuyType {
    Eth,
    Erc20,
    /// Anything else, kept uppercased for logging.
    Other(String),
}

impl BuyType {
    pub fn parse(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        match upper.as_str() {
            "ETH" => Self::Eth,
            "ERC20" => Self::Erc20,
            _ => Self::Other(upper),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Eth => "ETH",
            Self::Erc20 => "ERC20",
            Self::Other(s) => s,
        }
    }

    /// Decimals assumed when the order omits them.
    pub fn default_decimals(&self) -> u32 {
        match self {
            Self::Eth => ETH_DECIMALS,
            _ => STABLECOIN_DECIMALS,
        }
    }
}

impl std::fmt::Display for BuyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for BuyType {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for BuyType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BuyType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(BuyType::parse(&s))
    }
}
