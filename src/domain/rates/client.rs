//! Rates sub-client — concurrent spot-rate fetches with per-feed fallback.

use crate::client::StorefrontClient;
use crate::domain::rates::RateQuote;

/// Sub-client for FX / crypto rates.
pub struct RatesClient<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl<'a> RatesClient<'a> {
    /// Fetch both rates concurrently. Never fails: a feed that errors, times
    /// out or returns an unusable value is replaced by its fallback.
    pub async fn fetch(&self) -> RateQuote {
        let http = &self.client.http;
        let (eth_usd, usd_brl) =
            futures_util::future::join(http.get_eth_usd(), http.get_usd_brl()).await;

        let eth_usd = match eth_usd {
            Ok(resp) => resp.price(),
            Err(e) => {
                tracing::warn!("ETH/USD feed failed: {}", e);
                None
            }
        };
        let usd_brl = match usd_brl {
            Ok(resp) => resp.price(),
            Err(e) => {
                tracing::warn!("USD/BRL feed failed: {}", e);
                None
            }
        };

        let quote = RateQuote::resolve(eth_usd, usd_brl, &self.client.normalizer.fallback_rates);
        if !quote.is_live() {
            tracing::warn!(
                eth_usd = %quote.rates.eth_usd,
                eth_usd_source = ?quote.eth_usd_source,
                usd_brl = %quote.rates.usd_brl,
                usd_brl_source = ?quote.usd_brl_source,
                "Using fallback rates"
            );
        }
        quote
    }
}
