//! Pure conversion module for raw order-book quantities.
//!
//! Quantities arrive as decimal strings in the token's smallest unit (wei for
//! ETH, 10^-6 for USD stablecoins) and can exceed 64 bits. They are parsed as
//! `BigUint` and split into whole/fractional parts with integer arithmetic only.
//! No async, no network calls.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::QuantityError;

/// Decimals of native ETH quantities (wei).
pub const ETH_DECIMALS: u32 = 18;

/// Decimals of USD-pegged ERC20 stablecoins.
pub const STABLECOIN_DECIMALS: u32 = 6;

/// Largest scale a `rust_decimal::Decimal` can carry.
const MAX_DECIMALS: u32 = 28;

/// Parse a smallest-unit quantity string into a `BigUint`.
///
/// Only ASCII digits are accepted (surrounding whitespace is trimmed). Signs,
/// separators, exponents and fractional parts are rejected.
pub fn parse_quantity(raw: &str) -> Result<BigUint, QuantityError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::Missing);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QuantityError::NotAnInteger(raw.to_string()));
    }
    BigUint::from_str(trimmed).map_err(|_| QuantityError::NotAnInteger(raw.to_string()))
}

/// An exact token amount: `whole + fraction / 10^decimals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    whole: BigUint,
    fraction: BigUint,
    decimals: u32,
}

impl TokenAmount {
    /// Split a smallest-unit integer at the `decimals`-th digit from the right.
    ///
    /// ```text
    /// 70000000000000000 wei, 18 decimals  →  whole = 0, fraction = 070000000000000000
    /// ```
    ///
    /// `decimals` above 28 is rejected before any arithmetic happens.
    pub fn from_units(units: &BigUint, decimals: u32) -> Result<Self, QuantityError> {
        if decimals > MAX_DECIMALS {
            return Err(QuantityError::UnsupportedDecimals(decimals));
        }
        let scale = BigUint::from(10u32).pow(decimals);
        Ok(Self {
            whole: units / &scale,
            fraction: units % &scale,
            decimals,
        })
    }

    /// Parse and split in one step.
    pub fn parse(raw: &str, decimals: u32) -> Result<Self, QuantityError> {
        Self::from_units(&parse_quantity(raw)?, decimals)
    }

    pub fn whole(&self) -> &BigUint {
        &self.whole
    }

    pub fn fraction(&self) -> &BigUint {
        &self.fraction
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn is_zero(&self) -> bool {
        self.whole.is_zero() && self.fraction.is_zero()
    }

    /// Convert to a `Decimal` for price arithmetic.
    ///
    /// Exact whenever the amount has at most 28 significant digits; longer
    /// fractions are rounded to fit. Fails if the whole part alone overflows.
    pub fn to_decimal(&self) -> Result<Decimal, QuantityError> {
        let whole = Decimal::from_str(&self.whole.to_string())
            .map_err(|_| QuantityError::Overflow(self.to_string()))?;

        let fraction_units = self
            .fraction
            .to_i128()
            .ok_or_else(|| QuantityError::Overflow(self.to_string()))?;
        let fraction = Decimal::try_from_i128_with_scale(fraction_units, self.decimals)
            .map_err(|_| QuantityError::Overflow(self.to_string()))?;

        whole
            .checked_add(fraction)
            .ok_or_else(|| QuantityError::Overflow(self.to_string()))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.whole);
        }
        write!(
            f,
            "{}.{:0>width$}",
            self.whole,
            self.fraction.to_string(),
            width = self.decimals as usize
        )
    }
}

// ─── Rounding ────────────────────────────────────────────────────────────────

/// Round half away from zero. Prices are non-negative, so this is plain
/// half-up rounding (not the banker's rounding `Decimal::round_dp` applies).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Fiat precision (USD, BRL).
pub fn round2(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}

/// ETH display precision.
pub fn round8(value: Decimal) -> Decimal {
    round_half_up(value, 8)
}
