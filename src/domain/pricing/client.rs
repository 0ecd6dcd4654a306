//! Pricing sub-client — markup config with a TTL cache and default fallback.

use crate::client::StorefrontClient;
use crate::domain::pricing::PricingConfig;
use crate::error::{HttpError, SdkError};
use crate::shared::ProductCode;
use rust_decimal::Decimal;

/// Sub-client for the storefront pricing configuration.
pub struct Pricing<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl<'a> Pricing<'a> {
    /// Markup config for `product_code`, or the global one for `None`.
    ///
    /// Served from the cache while fresh. A product without its own config
    /// inherits the global one. Any failure yields
    /// [`PricingConfig::default`], which is not cached, so the next call
    /// retries the backend.
    pub async fn config(&self, product_code: Option<&ProductCode>) -> PricingConfig {
        let key = product_code.cloned();
        if let Some(config) = self.client.pricing_cache.read().await.get(&key) {
            tracing::debug!(product_code = ?key, "Pricing config cache hit");
            return config;
        }

        match self.fetch_with_inheritance(product_code).await {
            Ok(config) => {
                self.client
                    .pricing_cache
                    .write()
                    .await
                    .insert(key, config.clone());
                config
            }
            Err(e) => {
                tracing::warn!(
                    product_code = ?key,
                    "Pricing config unavailable, using default markup: {}",
                    e
                );
                PricingConfig::default()
            }
        }
    }

    /// `1 + global_markup_percent / 100` for the resolved config.
    pub async fn markup_multiplier(&self, product_code: Option<&ProductCode>) -> Decimal {
        self.config(product_code).await.markup_multiplier()
    }

    pub async fn invalidate(&self, product_code: Option<&ProductCode>) {
        self.client
            .pricing_cache
            .write()
            .await
            .invalidate(&product_code.cloned());
    }

    pub async fn clear_cache(&self) {
        self.client.pricing_cache.write().await.clear();
    }

    async fn fetch_with_inheritance(
        &self,
        product_code: Option<&ProductCode>,
    ) -> Result<PricingConfig, SdkError> {
        match self.fetch(product_code).await {
            Err(SdkError::Http(HttpError::NotFound(_))) if product_code.is_some() => {
                tracing::debug!(
                    product_code = ?product_code,
                    "No product pricing config, falling back to global"
                );
                self.fetch(None).await
            }
            other => other,
        }
    }

    async fn fetch(&self, product_code: Option<&ProductCode>) -> Result<PricingConfig, SdkError> {
        let resp = self.client.http.get_pricing_config(product_code).await?;
        PricingConfig::try_from(resp)
    }
}
