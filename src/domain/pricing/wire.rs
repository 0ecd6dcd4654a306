//! Wire types for the pricing config endpoint.

use crate::shared::serde_util::lenient_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `GET /pricing/config[?product_code=...]`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingConfigResponse {
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub global_markup_percent: Option<Decimal>,
    /// RFC 3339 timestamp; kept textual so a bad value does not fail the body.
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub product_code: Option<String>,
}
