//! Currency display for listing prices.
//!
//! Fiat amounts are always shown with two places; ETH with up to eight and
//! trailing zeros trimmed. BRL uses Brazilian separators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::num::{group_digits, trim_trailing_zeros, Separators};
use crate::shared::amount::{round2, round8};

/// Display currency of a storefront price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eth,
    Usd,
    Brl,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Usd => "USD",
            Self::Brl => "BRL",
        }
    }

    /// Decimal places prices are rounded to.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Self::Eth => 8,
            Self::Usd | Self::Brl => 2,
        }
    }

    pub fn display(&self, value: &Decimal) -> String {
        match self {
            Self::Eth => display_eth(value),
            Self::Usd => display_usd(value),
            Self::Brl => display_brl(value),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `0.091 ETH`
pub fn display_eth(value: &Decimal) -> String {
    let rounded = round8(*value);
    let trimmed = trim_trailing_zeros(&format!("{:.8}", rounded));
    format!("{} ETH", group_digits(&trimmed, Separators::EN))
}

/// `$1,234.56`
pub fn display_usd(value: &Decimal) -> String {
    let rounded = round2(*value);
    format!("${}", group_digits(&format!("{:.2}", rounded), Separators::EN))
}

/// `R$ 1.234,56`
pub fn display_brl(value: &Decimal) -> String {
    let rounded = round2(*value);
    format!(
        "R$ {}",
        group_digits(&format!("{:.2}", rounded), Separators::PT_BR)
    )
}
