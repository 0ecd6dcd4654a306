//! Listing domain — display-ready item views with ETH/USD/BRL prices.
//!
//! A [`NormalizedItemView`] is derived from one [`RawOrder`] and is never
//! stored: every request recomputes it from fresh (or fallback) rates and the
//! current markup.
//!
//! [`RawOrder`]: crate::domain::order::RawOrder

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod normalize;

use crate::shared::fmt::{display_brl, display_eth, display_usd};
use crate::shared::BuyType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use convert::identity_from_properties;
pub use normalize::{normalize, normalize_with, NormalizerConfig, PriceBasis};

// ─── Prices ──────────────────────────────────────────────────────────────────

/// ETH rounded to 8 places, USD and BRL to 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemPrices {
    pub eth: Decimal,
    pub usd: Decimal,
    pub brl: Decimal,
}

impl ItemPrices {
    pub const ZERO: ItemPrices = ItemPrices {
        eth: Decimal::ZERO,
        usd: Decimal::ZERO,
        brl: Decimal::ZERO,
    };

    /// All three zero: the item has no purchasable price.
    pub fn is_zero(&self) -> bool {
        self.eth.is_zero() && self.usd.is_zero() && self.brl.is_zero()
    }

    pub fn display_eth(&self) -> String {
        display_eth(&self.eth)
    }

    pub fn display_usd(&self) -> String {
        display_usd(&self.usd)
    }

    pub fn display_brl(&self) -> String {
        display_brl(&self.brl)
    }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// A trait of the item that has no dedicated identity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttribute {
    pub name: String,
    pub value: String,
}

/// Descriptive fields copied from an order's sell properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemIdentity {
    pub name: Option<String>,
    pub image: Option<String>,
    pub rarity: Option<String>,
    pub item_type: Option<String>,
    pub subtype: Option<String>,
    pub material: Option<String>,
    pub serial_number: Option<String>,
    pub product_code: Option<String>,
    /// Remaining scalar properties, sorted by name.
    pub attributes: Vec<ItemAttribute>,
}

// ─── View ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItemView {
    pub order_id: Option<String>,
    pub buy_type: BuyType,
    #[serde(flatten)]
    pub identity: ItemIdentity,
    /// Final prices, markup included.
    pub prices: ItemPrices,
    /// Prices before markup, at the same precision.
    pub base_prices: ItemPrices,
    pub basis: PriceBasis,
}

impl NormalizedItemView {
    /// Whether the item can be bought through the standard price path.
    pub fn is_priced(&self) -> bool {
        !self.prices.is_zero()
    }
}
