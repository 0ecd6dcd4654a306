//! Orders sub-client — paged reads of active listings from the order book.

use crate::client::StorefrontClient;
use crate::domain::order::state::{Pagination, StopReason};
use crate::domain::order::wire::OrdersQuery;
use crate::domain::order::{parse_page, OrderPage, RawOrder};
use crate::error::SdkError;
use crate::shared::{Cursor, ProductCode};

/// Sub-client for order-book operations.
pub struct Orders<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl<'a> Orders<'a> {
    /// Fetch a single page of active orders (never cached).
    pub async fn page(
        &self,
        product_code: &ProductCode,
        cursor: Option<&Cursor>,
    ) -> Result<OrderPage, SdkError> {
        let query = OrdersQuery::active(product_code.clone(), self.client.page_size)
            .with_cursor(cursor.cloned());
        let body = self.client.http.get_orders(&query).await?;
        parse_page(&body)
    }

    /// Fetch every page of active orders for a product, sequentially.
    ///
    /// Bounded by the client's `max_pages`. A failure on the first page is
    /// returned as an error; a failure on a later page ends paging and the
    /// orders collected so far are returned.
    pub async fn active(&self, product_code: &ProductCode) -> Result<Vec<RawOrder>, SdkError> {
        let mut pagination = Pagination::new(self.client.max_pages);
        let mut orders = Vec::new();

        while !pagination.is_done() {
            let cursor = pagination.next_cursor().cloned();
            match self.page(product_code, cursor.as_ref()).await {
                Ok(page) => {
                    pagination.record_page(page.orders.len(), page.next_cursor);
                    orders.extend(page.orders);
                }
                Err(e) if pagination.pages_fetched() == 0 => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        product_code = %product_code,
                        pages = pagination.pages_fetched(),
                        "Order-book paging stopped early: {}",
                        e
                    );
                    pagination.abort();
                }
            }
        }

        match pagination.stop_reason() {
            Some(StopReason::CursorLoop) => tracing::warn!(
                product_code = %product_code,
                "Order book returned a repeated cursor; stopped paging"
            ),
            Some(StopReason::MaxPages) => tracing::warn!(
                product_code = %product_code,
                max_pages = self.client.max_pages,
                "Order book has more pages than max_pages; results truncated"
            ),
            _ => {}
        }

        tracing::debug!(
            product_code = %product_code,
            pages = pagination.pages_fetched(),
            orders = orders.len(),
            "Fetched active orders"
        );
        Ok(orders)
    }
}
