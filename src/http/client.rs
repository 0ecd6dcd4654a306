//! Low-level HTTP client — `StorefrontHttp`.
//!
//! One method per upstream endpoint. Returns wire types (conversion to domain
//! types happens at the sub-client boundary). Every request runs under a
//! timeout so an unresponsive upstream can never block a caller indefinitely.

use crate::domain::order::wire::OrdersQuery;
use crate::domain::pricing::wire::PricingConfigResponse;
use crate::domain::rates::wire::{EthUsdResponse, UsdBrlResponse};
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryDecision, RetryPolicy};
use crate::shared::ProductCode;

use futures_util::future::{self, Either};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing;

/// Upstream base URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub api_url: String,
    pub orderbook_url: String,
    pub eth_usd_url: String,
    pub usd_brl_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_url: crate::network::DEFAULT_API_URL.to_string(),
            orderbook_url: crate::network::DEFAULT_ORDERBOOK_URL.to_string(),
            eth_usd_url: crate::network::DEFAULT_ETH_USD_URL.to_string(),
            usd_brl_url: crate::network::DEFAULT_USD_BRL_URL.to_string(),
        }
    }
}

/// Low-level HTTP client for the storefront backend, the order book and the
/// rate feeds.
#[derive(Clone)]
pub struct StorefrontHttp {
    endpoints: Endpoints,
    client: Client,
    timeout: Duration,
}

impl StorefrontHttp {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.pool_max_idle_per_host(10);
        }

        Ok(Self {
            endpoints: Endpoints {
                api_url: endpoints.api_url.trim_end_matches('/').to_string(),
                orderbook_url: endpoints.orderbook_url.trim_end_matches('/').to_string(),
                ..endpoints
            },
            client: builder.build()?,
            timeout,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // ── Order book ───────────────────────────────────────────────────────

    /// One page of orders. The body is returned untyped because the page
    /// shape differs between order-book API versions.
    pub async fn get_orders(&self, query: &OrdersQuery) -> Result<serde_json::Value, HttpError> {
        let url = format!(
            "{}/orders?{}",
            self.endpoints.orderbook_url,
            query.to_query_string()
        );
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Rates ────────────────────────────────────────────────────────────

    pub async fn get_eth_usd(&self) -> Result<EthUsdResponse, HttpError> {
        self.get(&self.endpoints.eth_usd_url, RetryPolicy::None).await
    }

    pub async fn get_usd_brl(&self) -> Result<UsdBrlResponse, HttpError> {
        self.get(&self.endpoints.usd_brl_url, RetryPolicy::None).await
    }

    // ── Pricing config ───────────────────────────────────────────────────

    pub async fn get_pricing_config(
        &self,
        product_code: Option<&ProductCode>,
    ) -> Result<PricingConfigResponse, HttpError> {
        let mut url = format!("{}/pricing/config", self.endpoints.api_url);
        if let Some(code) = product_code {
            url = format!(
                "{}?product_code={}",
                url,
                urlencoding::encode(code.as_str())
            );
        }
        self.get(&url, RetryPolicy::None).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => {
                return self.do_get_with_timeout(url).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_get_with_timeout::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => match config.decide(&e, attempt) {
                    RetryDecision::RetryAfter(delay) => {
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    }
                    RetryDecision::Stop => return Err(e),
                },
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get_with_timeout<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let request = std::pin::pin!(self.do_get::<T>(url));
        let deadline = futures_timer::Delay::new(self.timeout);

        match future::select(request, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                tracing::debug!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Request to {} timed out",
                    url
                );
                Err(HttpError::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}
