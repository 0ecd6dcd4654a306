//! Wire types for the external order book.
//!
//! The order book has shipped several response shapes over its API versions:
//! the order list and the next-page cursor do not always live under the same
//! field. Rather than probing fields ad hoc, each location is an [`Extraction`]
//! and the lists below are tried in order.

use crate::shared::serde_util::{lenient_string, lenient_u32};
use crate::shared::{Cursor, ProductCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Query ───────────────────────────────────────────────────────────────────

/// Sort direction for order-book queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query parameters for one page of active orders of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersQuery {
    pub product_code: ProductCode,
    pub status: String,
    pub order_by: String,
    pub direction: Direction,
    pub page_size: u32,
    pub cursor: Option<Cursor>,
}

impl OrdersQuery {
    pub fn active(product_code: ProductCode, page_size: u32) -> Self {
        Self {
            product_code,
            status: "active".to_string(),
            order_by: "buy_quantity".to_string(),
            direction: Direction::Asc,
            page_size,
            cursor: None,
        }
    }

    pub fn with_cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }

    /// `status=active&sell_metadata=...&order_by=...&direction=...&page_size=...[&cursor=...]`
    ///
    /// `sell_metadata` is a URL-encoded JSON filter: `{"productCode":["<code>"]}`.
    pub fn to_query_string(&self) -> String {
        let sell_metadata = serde_json::json!({ "productCode": [self.product_code.as_str()] });
        let mut query = format!(
            "status={}&sell_metadata={}&order_by={}&direction={}&page_size={}",
            urlencoding::encode(&self.status),
            urlencoding::encode(&sell_metadata.to_string()),
            urlencoding::encode(&self.order_by),
            self.direction.as_str(),
            self.page_size
        );
        if let Some(c) = &self.cursor {
            query = format!("{}&cursor={}", query, urlencoding::encode(c.as_str()));
        }
        query
    }
}

// ─── Orders ──────────────────────────────────────────────────────────────────

/// A single order as sent by the order book.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OrderResponse {
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub buy: Option<TokenSide>,
    #[serde(default)]
    pub sell: Option<TokenSide>,
}

/// One leg (`buy` or `sell`) of an order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokenSide {
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub data: TokenData,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TokenData {
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub quantity_with_fees: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32::deserialize")]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub token_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub token_id: Option<String>,
    /// Display properties (`name`, `image_url`, ...).
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, Value>>,
    /// Item metadata (`rarity`, `material`, `productCode`, ...).
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

// ─── Extraction strategies ───────────────────────────────────────────────────

/// A named location inside a page body, as a JSON pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    pub name: &'static str,
    pub pointer: &'static str,
}

/// Where the order list may live, most recent API version first.
pub const ORDER_LIST_STRATEGIES: &[Extraction] = &[
    Extraction { name: "result", pointer: "/result" },
    Extraction { name: "orders", pointer: "/orders" },
    Extraction { name: "data", pointer: "/data" },
    Extraction { name: "data.orders", pointer: "/data/orders" },
];

/// Where the next-page cursor may live, most recent API version first.
pub const CURSOR_STRATEGIES: &[Extraction] = &[
    Extraction { name: "page.next_cursor", pointer: "/page/next_cursor" },
    Extraction { name: "next_cursor", pointer: "/next_cursor" },
    Extraction { name: "cursor", pointer: "/cursor" },
    Extraction { name: "pagination.next_cursor", pointer: "/pagination/next_cursor" },
    Extraction { name: "meta.next_cursor", pointer: "/meta/next_cursor" },
];

/// The first strategy that yields an array, with the strategy that matched.
pub fn extract_orders(body: &Value) -> Option<(&'static Extraction, &Vec<Value>)> {
    ORDER_LIST_STRATEGIES.iter().find_map(|strategy| {
        body.pointer(strategy.pointer)
            .and_then(Value::as_array)
            .map(|list| (strategy, list))
    })
}

/// The first strategy that yields a non-empty string cursor.
///
/// Older responses carry `remaining: 0` alongside a stale cursor on the last
/// page; that is treated as "no next page".
pub fn extract_next_cursor(body: &Value) -> Option<Cursor> {
    if body.pointer("/remaining").and_then(Value::as_u64) == Some(0) {
        return None;
    }

    CURSOR_STRATEGIES.iter().find_map(|strategy| {
        body.pointer(strategy.pointer)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Cursor::new)
    })
}
