//! The price normalizer: one order + rates + markup → a priced item view.
//!
//! Pure and synchronous. Quantities are split exactly at their decimals (see
//! [`TokenAmount`]) before any decimal arithmetic happens, and every rounding
//! step is half-up:
//!
//! - **ETH** (always split at 18 decimals): `usd = round2(eth * eth_usd)`, `brl = round2(usd * usd_brl)`;
//!   markup is applied to the rounded pre-markup values.
//! - **ERC20 with 6 decimals** (USD stablecoin): `usd = round2(amount)`,
//!   `eth = usd / eth_usd` (unrounded until markup), `brl = round2(usd * usd_brl)`.
//! - **Anything else**: zero prices.
//!
//! [`TokenAmount`]: crate::shared::TokenAmount

use super::{identity_from_properties, ItemPrices, NormalizedItemView};
use crate::domain::order::RawOrder;
use crate::domain::rates::Rates;
use crate::error::QuantityError;
use crate::shared::{round2, round8, BuyType, TokenAmount, ETH_DECIMALS, STABLECOIN_DECIMALS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the prices of a view were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// ETH order priced with the supplied rates.
    Eth,
    /// ETH order whose BRL price was recomputed from the fallback rates.
    EthSanityFallback,
    /// USD stablecoin order.
    Stablecoin,
    /// No purchasable price: unsupported buy type or unreadable quantity.
    Unpriced,
}

/// Tunables of the normalizer.
///
/// The sanity check fires when an ETH order is worth more than
/// `sanity_min_eth` but its pre-markup BRL price comes out below
/// `sanity_min_brl`; BRL is then recomputed from `fallback_rates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    pub fallback_rates: Rates,
    pub sanity_min_eth: Decimal,
    pub sanity_min_brl: Decimal,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            fallback_rates: Rates::FALLBACK,
            // 0.01 ETH
            sanity_min_eth: Decimal::from_parts(1, 0, 0, false, 2),
            // 10.00 BRL
            sanity_min_brl: Decimal::TEN,
        }
    }
}

struct Priced {
    prices: ItemPrices,
    base: ItemPrices,
    basis: PriceBasis,
}

impl Priced {
    fn unpriced() -> Self {
        Self {
            prices: ItemPrices::ZERO,
            base: ItemPrices::ZERO,
            basis: PriceBasis::Unpriced,
        }
    }
}

/// Normalize with the default [`NormalizerConfig`].
pub fn normalize(order: &RawOrder, rates: &Rates, markup_multiplier: Decimal) -> NormalizedItemView {
    normalize_with(order, rates, markup_multiplier, &NormalizerConfig::default())
}

/// Build the display view of `order`.
///
/// Never fails. An order whose quantity cannot be read, or whose amount does
/// not fit decimal arithmetic, gets zero prices and a warning.
pub fn normalize_with(
    order: &RawOrder,
    rates: &Rates,
    markup_multiplier: Decimal,
    config: &NormalizerConfig,
) -> NormalizedItemView {
    let markup = if markup_multiplier.is_sign_negative() {
        tracing::warn!(%markup_multiplier, "Negative markup multiplier, pricing without markup");
        Decimal::ONE
    } else {
        markup_multiplier
    };

    let priced = match price(order, rates, markup, config) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(order_id = ?order.order_id, "Cannot price order: {}", e);
            Priced::unpriced()
        }
    };

    NormalizedItemView {
        order_id: order.order_id.clone(),
        buy_type: order.buy_type.clone(),
        identity: identity_from_properties(&order.sell_properties),
        prices: priced.prices,
        base_prices: priced.base,
        basis: priced.basis,
    }
}

fn price(
    order: &RawOrder,
    rates: &Rates,
    markup: Decimal,
    config: &NormalizerConfig,
) -> Result<Priced, QuantityError> {
    match order.buy_type {
        BuyType::Eth => {
            // wei is always 18 decimals whatever the order book reports
            if order.decimals != ETH_DECIMALS {
                tracing::warn!(
                    order_id = ?order.order_id,
                    decimals = order.decimals,
                    "ETH order reports non-standard decimals, splitting at 18"
                );
            }
            let eth = TokenAmount::from_units(&order.quantity()?, ETH_DECIMALS)?.to_decimal()?;
            price_eth(eth, rates, markup, config)
        }
        BuyType::Erc20 if order.decimals == STABLECOIN_DECIMALS => {
            let usd = order.amount()?.to_decimal()?;
            price_stablecoin(usd, rates, markup)
        }
        _ => Ok(Priced::unpriced()),
    }
}

fn price_eth(
    eth: Decimal,
    rates: &Rates,
    markup: Decimal,
    config: &NormalizerConfig,
) -> Result<Priced, QuantityError> {
    let usd_pre = round2(mul(eth, rates.eth_usd)?);
    let mut brl_pre = round2(mul(usd_pre, rates.usd_brl)?);
    let mut basis = PriceBasis::Eth;

    if eth > config.sanity_min_eth && brl_pre < config.sanity_min_brl {
        let fallback = &config.fallback_rates;
        let fallback_usd = round2(mul(eth, fallback.eth_usd)?);
        let fallback_brl = round2(mul(fallback_usd, fallback.usd_brl)?);
        tracing::warn!(
            %eth,
            %brl_pre,
            %fallback_brl,
            usd_brl = %rates.usd_brl,
            "BRL price implausibly low, recomputing from fallback rates"
        );
        brl_pre = fallback_brl;
        basis = PriceBasis::EthSanityFallback;
    }

    Ok(Priced {
        base: ItemPrices {
            eth: round8(eth),
            usd: usd_pre,
            brl: brl_pre,
        },
        prices: ItemPrices {
            eth: round8(mul(eth, markup)?),
            usd: round2(mul(usd_pre, markup)?),
            brl: round2(mul(brl_pre, markup)?),
        },
        basis,
    })
}

fn price_stablecoin(amount: Decimal, rates: &Rates, markup: Decimal) -> Result<Priced, QuantityError> {
    let usd_pre = round2(amount);
    let eth_pre = usd_pre
        .checked_div(rates.eth_usd)
        .ok_or_else(|| QuantityError::Overflow(format!("{} / {}", usd_pre, rates.eth_usd)))?;
    let brl_pre = round2(mul(usd_pre, rates.usd_brl)?);

    Ok(Priced {
        base: ItemPrices {
            eth: round8(eth_pre),
            usd: usd_pre,
            brl: brl_pre,
        },
        prices: ItemPrices {
            eth: round8(mul(eth_pre, markup)?),
            usd: round2(mul(usd_pre, markup)?),
            brl: round2(mul(brl_pre, markup)?),
        },
        basis: PriceBasis::Stablecoin,
    })
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, QuantityError> {
    a.checked_mul(b)
        .ok_or_else(|| QuantityError::Overflow(format!("{} * {}", a, b)))
}
