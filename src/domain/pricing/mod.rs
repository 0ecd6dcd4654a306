//! Pricing domain — storefront markup configuration.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::ProductCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use state::TtlCache;

/// Markup applied when no configuration can be fetched: +30%.
pub const DEFAULT_MARKUP_PERCENT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Markup configuration, global or scoped to one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Non-negative percentage, e.g. `30` for +30%.
    pub global_markup_percent: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
    /// `None` for the global configuration.
    pub product_code: Option<ProductCode>,
}

impl PricingConfig {
    pub fn new(global_markup_percent: Decimal) -> Self {
        Self {
            global_markup_percent,
            updated_at: None,
            product_code: None,
        }
    }

    /// `1 + global_markup_percent / 100`
    pub fn markup_multiplier(&self) -> Decimal {
        Decimal::ONE + self.global_markup_percent / Decimal::ONE_HUNDRED
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MARKUP_PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_is_thirty_percent() {
        let config = PricingConfig::default();
        assert_eq!(config.global_markup_percent, Decimal::from(30));
        assert_eq!(config.markup_multiplier(), Decimal::from_str("1.3").unwrap());
        assert!(config.product_code.is_none());
    }

    #[test]
    fn test_markup_multiplier() {
        assert_eq!(PricingConfig::new(Decimal::ZERO).markup_multiplier(), Decimal::ONE);
        assert_eq!(
            PricingConfig::new(Decimal::from_str("12.5").unwrap()).markup_multiplier(),
            Decimal::from_str("1.125").unwrap()
        );
    }
}
