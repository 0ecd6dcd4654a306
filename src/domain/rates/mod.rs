//! Rates domain — ETH→USD and USD→BRL spot rates with hardcoded fallbacks.
//!
//! Both rates are multiplied into displayed prices, so a zero, negative or
//! non-numeric value must never get through: each one is independently
//! replaced by its fallback constant.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// 4713.59 USD per ETH.
pub const FALLBACK_ETH_USD: Decimal = Decimal::from_parts(471_359, 0, 0, false, 2);

/// 5.42 BRL per USD.
pub const FALLBACK_USD_BRL: Decimal = Decimal::from_parts(542, 0, 0, false, 2);

/// A usable pair of conversion rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rates {
    /// Price of 1 ETH in USD.
    pub eth_usd: Decimal,
    /// Price of 1 USD in BRL.
    pub usd_brl: Decimal,
}

impl Rates {
    pub const FALLBACK: Rates = Rates {
        eth_usd: FALLBACK_ETH_USD,
        usd_brl: FALLBACK_USD_BRL,
    };

    /// Build from raw values; each non-positive value falls back.
    pub fn new(eth_usd: Decimal, usd_brl: Decimal) -> Self {
        RateQuote::resolve(Some(eth_usd), Some(usd_brl), &Self::FALLBACK).rates
    }

    /// Build from floats; each non-finite or non-positive value falls back.
    pub fn from_f64(eth_usd: f64, usd_brl: f64) -> Self {
        RateQuote::resolve(
            Decimal::from_f64(eth_usd),
            Decimal::from_f64(usd_brl),
            &Self::FALLBACK,
        )
        .rates
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Where a rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Fallback,
}

/// Rates plus the provenance of each one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub rates: Rates,
    pub eth_usd_source: RateSource,
    pub usd_brl_source: RateSource,
    pub resolved_at: DateTime<Utc>,
}

impl RateQuote {
    /// Combine fetched values with fallbacks. `None` means the feed failed.
    pub fn resolve(eth_usd: Option<Decimal>, usd_brl: Option<Decimal>, fallback: &Rates) -> Self {
        let (eth_usd, eth_usd_source) = pick(eth_usd, fallback.eth_usd);
        let (usd_brl, usd_brl_source) = pick(usd_brl, fallback.usd_brl);
        Self {
            rates: Rates { eth_usd, usd_brl },
            eth_usd_source,
            usd_brl_source,
            resolved_at: Utc::now(),
        }
    }

    /// Both feeds answered with usable values.
    pub fn is_live(&self) -> bool {
        self.eth_usd_source == RateSource::Live && self.usd_brl_source == RateSource::Live
    }
}

fn pick(value: Option<Decimal>, fallback: Decimal) -> (Decimal, RateSource) {
    match value {
        Some(v) if v > Decimal::ZERO => (v, RateSource::Live),
        _ => (fallback, RateSource::Fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fallback_constants() {
        assert_eq!(FALLBACK_ETH_USD, dec("4713.59"));
        assert_eq!(FALLBACK_USD_BRL, dec("5.42"));
        assert_eq!(Rates::default(), Rates::FALLBACK);
    }

    #[test]
    fn test_new_keeps_positive_values() {
        let r = Rates::new(dec("3000"), dec("5"));
        assert_eq!(r.eth_usd, dec("3000"));
        assert_eq!(r.usd_brl, dec("5"));
    }

    #[test]
    fn test_new_replaces_zero_and_negative() {
        let r = Rates::new(Decimal::ZERO, dec("-1"));
        assert_eq!(r, Rates::FALLBACK);
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        let r = Rates::from_f64(f64::NAN, f64::INFINITY);
        assert_eq!(r, Rates::FALLBACK);
        let r = Rates::from_f64(2500.5, f64::NAN);
        assert_eq!(r.eth_usd, dec("2500.5"));
        assert_eq!(r.usd_brl, FALLBACK_USD_BRL);
    }

    #[test]
    fn test_resolve_tracks_sources_per_feed() {
        let q = RateQuote::resolve(Some(dec("4000")), None, &Rates::FALLBACK);
        assert_eq!(q.eth_usd_source, RateSource::Live);
        assert_eq!(q.usd_brl_source, RateSource::Fallback);
        assert_eq!(q.rates.usd_brl, FALLBACK_USD_BRL);
        assert!(!q.is_live());

        let q = RateQuote::resolve(Some(dec("4000")), Some(dec("5.1")), &Rates::FALLBACK);
        assert!(q.is_live());
    }
}
