//! Order domain — raw order-book sell orders, paging, best-bid selection.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::error::QuantityError;
use crate::shared::{parse_quantity, BuyType, TokenAmount};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use convert::{parse_page, OrderPage};
pub use state::{Pagination, StopReason};
pub use wire::{extract_next_cursor, extract_orders, Extraction};

/// Trait name → trait value describing the item being sold.
pub type SellProperties = BTreeMap<String, serde_json::Value>;

// ─── RawOrder ────────────────────────────────────────────────────────────────

/// An active sell order as received from the order book.
///
/// `buy_quantity` stays textual: it is the smallest-unit amount (fees included)
/// and is only ever parsed as a big integer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawOrder {
    pub order_id: Option<String>,
    pub buy_type: BuyType,
    pub buy_quantity: Option<String>,
    pub decimals: u32,
    pub sell_properties: SellProperties,
}

impl RawOrder {
    /// An order with the default decimals for its buy type and no properties.
    pub fn new(buy_type: impl Into<BuyType>, buy_quantity: impl Into<String>) -> Self {
        let buy_type = buy_type.into();
        Self {
            order_id: None,
            decimals: buy_type.default_decimals(),
            buy_type,
            buy_quantity: Some(buy_quantity.into()),
            sell_properties: SellProperties::new(),
        }
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_order_id(mut self, id: impl Into<String>) -> Self {
        self.order_id = Some(id.into());
        self
    }

    pub fn with_property(mut self, name: &str, value: impl Into<serde_json::Value>) -> Self {
        self.sell_properties.insert(name.to_string(), value.into());
        self
    }

    /// The buy quantity as a big integer.
    pub fn quantity(&self) -> Result<BigUint, QuantityError> {
        match &self.buy_quantity {
            Some(raw) => parse_quantity(raw),
            None => Err(QuantityError::Missing),
        }
    }

    /// The buy quantity split at `decimals`. Fails for more than 28 decimals.
    pub fn amount(&self) -> Result<TokenAmount, QuantityError> {
        TokenAmount::from_units(&self.quantity()?, self.decimals)
    }
}

// ─── Best bid ────────────────────────────────────────────────────────────────

/// The cheapest valid order of a set, with its parsed quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct BestOrder<'a> {
    pub order: &'a RawOrder,
    pub quantity: BigUint,
}

/// Pick the order whose buyer pays the least.
///
/// Quantities are compared as big integers. Orders with a missing or malformed
/// quantity are skipped. On ties the earliest order wins. Returns `None` when
/// no order has a usable quantity.
pub fn select_best(orders: &[RawOrder]) -> Option<BestOrder<'_>> {
    let mut best: Option<BestOrder<'_>> = None;

    for order in orders {
        let quantity = match order.quantity() {
            Ok(q) => q,
            Err(e) => {
                tracing::debug!(order_id = ?order.order_id, "Skipping order: {}", e);
                continue;
            }
        };

        let cheaper = best.as_ref().map_or(true, |b| quantity < b.quantity);
        if cheaper {
            best = Some(BestOrder { order, quantity });
        }
    }

    best
}
