//! Listings sub-client — fan-out of rates, markup and orders, then pricing.

use crate::client::StorefrontClient;
use crate::domain::listing::{normalize_with, NormalizedItemView};
use crate::domain::order::{select_best, RawOrder};
use crate::domain::rates::RateQuote;
use crate::shared::ProductCode;
use rust_decimal::Decimal;

/// Everything `normalize` needs besides the order itself.
struct PricingInputs {
    quote: RateQuote,
    markup: Decimal,
    orders: Vec<RawOrder>,
}

/// Sub-client producing display-ready listings.
pub struct Listings<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl<'a> Listings<'a> {
    /// The cheapest active listing of a product, priced.
    ///
    /// `None` means there are no active listings with a readable quantity.
    /// Rate and markup failures degrade to their fallbacks; an order-book
    /// failure is treated as an empty book.
    pub async fn best(&self, product_code: &ProductCode) -> Option<NormalizedItemView> {
        let inputs = self.inputs(product_code).await;
        let Some(best) = select_best(&inputs.orders) else {
            tracing::debug!(
                product_code = %product_code,
                orders = inputs.orders.len(),
                "No active listings with a usable quantity"
            );
            return None;
        };

        Some(normalize_with(
            best.order,
            &inputs.quote.rates,
            inputs.markup,
            &self.client.normalizer,
        ))
    }

    /// Every active listing of a product with a readable quantity, priced,
    /// cheapest first. Equal quantities keep order-book order.
    pub async fn all(&self, product_code: &ProductCode) -> Vec<NormalizedItemView> {
        let inputs = self.inputs(product_code).await;

        let mut ranked: Vec<_> = inputs
            .orders
            .iter()
            .filter_map(|order| order.quantity().ok().map(|q| (q, order)))
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        ranked
            .into_iter()
            .map(|(_, order)| {
                normalize_with(
                    order,
                    &inputs.quote.rates,
                    inputs.markup,
                    &self.client.normalizer,
                )
            })
            .collect()
    }

    async fn inputs(&self, product_code: &ProductCode) -> PricingInputs {
        let (quote, markup, orders) = futures_util::future::join3(
            self.client.rates().fetch(),
            self.client.pricing().markup_multiplier(Some(product_code)),
            self.client.orders().active(product_code),
        )
        .await;

        let orders = orders.unwrap_or_else(|e| {
            tracing::warn!(
                product_code = %product_code,
                "Order book unavailable, treating as no listings: {}",
                e
            );
            Vec::new()
        });

        PricingInputs {
            quote,
            markup,
            orders,
        }
    }
}
