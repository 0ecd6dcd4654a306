//! Conversion: PricingConfigResponse → PricingConfig (TryFrom + validation).

use super::wire::PricingConfigResponse;
use super::PricingConfig;
use crate::error::SdkError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

impl TryFrom<PricingConfigResponse> for PricingConfig {
    type Error = SdkError;

    fn try_from(source: PricingConfigResponse) -> Result<Self, Self::Error> {
        let markup = source.global_markup_percent.ok_or_else(|| {
            SdkError::Validation("pricing config has no usable global_markup_percent".to_string())
        })?;
        if markup < Decimal::ZERO {
            return Err(SdkError::Validation(format!(
                "negative global_markup_percent: {}",
                markup
            )));
        }

        let updated_at = source.updated_at.as_deref().and_then(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
        });

        Ok(PricingConfig {
            global_markup_percent: markup,
            updated_at,
            product_code: source.product_code.filter(|c| !c.is_empty()).map(Into::into),
        })
    }
}
