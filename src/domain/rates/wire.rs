//! Wire types for the rate providers.

use crate::shared::serde_util::lenient_decimal;
use rust_decimal::Decimal;
use serde::Deserialize;

/// ETH→USD spot price: `{"ethereum": {"usd": 4713.59}}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EthUsdResponse {
    #[serde(default)]
    pub ethereum: Option<CoinPrice>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CoinPrice {
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub usd: Option<Decimal>,
}

impl EthUsdResponse {
    pub fn price(&self) -> Option<Decimal> {
        self.ethereum.as_ref().and_then(|c| c.usd)
    }
}

/// USD→BRL quote: `{"USDBRL": {"bid": "5.42", "ask": "5.43", ...}}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UsdBrlResponse {
    #[serde(rename = "USDBRL", default)]
    pub usd_brl: Option<FxQuote>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FxQuote {
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub bid: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub ask: Option<Decimal>,
}

impl UsdBrlResponse {
    /// The bid, or the ask when no bid is quoted.
    pub fn price(&self) -> Option<Decimal> {
        self.usd_brl.as_ref().and_then(|q| q.bid.or(q.ask))
    }
}
