//! Conversion: order-book page body → `RawOrder`s.

use super::wire::{self, extract_next_cursor, extract_orders};
use super::{RawOrder, SellProperties};
use crate::error::SdkError;
use crate::shared::{BuyType, Cursor};
use serde_json::Value;

/// One parsed page of orders.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPage {
    pub orders: Vec<RawOrder>,
    pub next_cursor: Option<Cursor>,
    /// Entries of the order list that did not deserialize as orders.
    pub skipped: usize,
}

impl From<wire::OrderResponse> for RawOrder {
    fn from(source: wire::OrderResponse) -> Self {
        let (buy_type, buy_quantity, decimals) = match source.buy {
            Some(buy) => {
                let buy_type = BuyType::parse(buy.token_type.as_deref().unwrap_or_default());
                let decimals = buy
                    .data
                    .decimals
                    .unwrap_or_else(|| buy_type.default_decimals());
                let quantity = buy.data.quantity_with_fees.or(buy.data.quantity);
                (buy_type, quantity, decimals)
            }
            None => {
                let buy_type = BuyType::Other(String::new());
                let decimals = buy_type.default_decimals();
                (buy_type, None, decimals)
            }
        };

        let mut sell_properties = SellProperties::new();
        if let Some(sell) = source.sell {
            // metadata first so display properties win on a name clash
            for map in [sell.data.metadata, sell.data.properties].into_iter().flatten() {
                sell_properties.extend(map);
            }
            if let Some(token_id) = sell.data.token_id {
                sell_properties
                    .entry("token_id".to_string())
                    .or_insert(Value::String(token_id));
            }
        }

        RawOrder {
            order_id: source.order_id,
            buy_type,
            buy_quantity,
            decimals,
            sell_properties,
        }
    }
}

/// Parse a page body using the extraction strategies.
///
/// Individual entries that are not orders are counted and skipped. A body
/// with no recognizable order list is a validation error.
pub fn parse_page(body: &Value) -> Result<OrderPage, SdkError> {
    let (strategy, list) = extract_orders(body).ok_or_else(|| {
        SdkError::Validation("order-book page has no recognizable order list".to_string())
    })?;

    let mut orders = Vec::with_capacity(list.len());
    let mut skipped = 0;
    for entry in list {
        match serde_json::from_value::<wire::OrderResponse>(entry.clone()) {
            Ok(order) => orders.push(order.into()),
            Err(e) => {
                skipped += 1;
                tracing::warn!(strategy = strategy.name, "Skipping malformed order entry: {}", e);
            }
        }
    }

    Ok(OrderPage {
        orders,
        next_cursor: extract_next_cursor(body),
        skipped,
    })
}
