//! High-level client — `StorefrontClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::listing::client::Listings;
use crate::domain::listing::NormalizerConfig;
use crate::domain::order::client::Orders;
use crate::domain::pricing::client::Pricing;
use crate::domain::pricing::{PricingConfig, TtlCache};
use crate::domain::rates::client::RatesClient;
use crate::error::SdkError;
use crate::http::{Endpoints, StorefrontHttp};
use crate::shared::ProductCode;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::listing::client::Listings as ListingsClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::pricing::client::Pricing as PricingClient;
pub use crate::domain::rates::client::RatesClient as RatesSubClient;

pub(crate) type PricingCache = TtlCache<Option<ProductCode>, PricingConfig>;

/// The primary entry point for the storefront pricing SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.listings()`, `client.orders()`, etc. Cloning is cheap and clones
/// share the pricing cache.
pub struct StorefrontClient {
    pub(crate) http: StorefrontHttp,
    /// Pricing config cache: product code (`None` = global) → config
    pub(crate) pricing_cache: Arc<RwLock<PricingCache>>,
    pub(crate) normalizer: NormalizerConfig,
    pub(crate) page_size: u32,
    pub(crate) max_pages: u32,
}

impl StorefrontClient {
    pub fn builder() -> StorefrontClientBuilder {
        StorefrontClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn listings(&self) -> Listings<'_> {
        Listings { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn pricing(&self) -> Pricing<'_> {
        Pricing { client: self }
    }

    pub fn rates(&self) -> RatesClient<'_> {
        RatesClient { client: self }
    }

    // ── Configuration ────────────────────────────────────────────────────

    pub fn endpoints(&self) -> &Endpoints {
        self.http.endpoints()
    }

    pub fn normalizer(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.pricing_cache.write().await.clear();
    }
}

impl Clone for StorefrontClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            pricing_cache: self.pricing_cache.clone(),
            normalizer: self.normalizer.clone(),
            page_size: self.page_size,
            max_pages: self.max_pages,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_ORDERBOOK_URL: &str = "STOREFRONT_ORDERBOOK_URL";
pub const ENV_ETH_USD_URL: &str = "STOREFRONT_ETH_USD_URL";
pub const ENV_USD_BRL_URL: &str = "STOREFRONT_USD_BRL_URL";
pub const ENV_PRICING_TTL_MS: &str = "STOREFRONT_PRICING_TTL_MS";

/// Largest page the order book accepts.
const MAX_PAGE_SIZE: u32 = 200;

pub struct StorefrontClientBuilder {
    endpoints: Endpoints,
    pricing_cache_ttl: Duration,
    request_timeout: Duration,
    page_size: u32,
    max_pages: u32,
    normalizer: NormalizerConfig,
}

impl Default for StorefrontClientBuilder {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            pricing_cache_ttl: Duration::from_secs(1),
            request_timeout: Duration::from_secs(5),
            page_size: MAX_PAGE_SIZE,
            max_pages: 50,
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl StorefrontClientBuilder {
    /// Defaults overlaid with the `STOREFRONT_*` environment variables that
    /// are set. An unparsable TTL is ignored with a warning.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            builder = builder.api_url(&url);
        }
        if let Ok(url) = std::env::var(ENV_ORDERBOOK_URL) {
            builder = builder.orderbook_url(&url);
        }
        if let Ok(url) = std::env::var(ENV_ETH_USD_URL) {
            builder = builder.eth_usd_url(&url);
        }
        if let Ok(url) = std::env::var(ENV_USD_BRL_URL) {
            builder = builder.usd_brl_url(&url);
        }
        if let Ok(raw) = std::env::var(ENV_PRICING_TTL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => builder = builder.pricing_cache_ttl(Duration::from_millis(ms)),
                Err(_) => tracing::warn!("Ignoring invalid {}: {:?}", ENV_PRICING_TTL_MS, raw),
            }
        }
        builder
    }

    pub fn api_url(mut self, url: &str) -> Self {
        self.endpoints.api_url = url.to_string();
        self
    }

    pub fn orderbook_url(mut self, url: &str) -> Self {
        self.endpoints.orderbook_url = url.to_string();
        self
    }

    pub fn eth_usd_url(mut self, url: &str) -> Self {
        self.endpoints.eth_usd_url = url.to_string();
        self
    }

    pub fn usd_brl_url(mut self, url: &str) -> Self {
        self.endpoints.usd_brl_url = url.to_string();
        self
    }

    /// How long a fetched pricing config is served from memory. Zero disables
    /// the cache.
    pub fn pricing_cache_ttl(mut self, ttl: Duration) -> Self {
        self.pricing_cache_ttl = ttl;
        self
    }

    /// Per-request timeout for every upstream call.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Upper bound on order-book pages fetched per product.
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn normalizer(mut self, config: NormalizerConfig) -> Self {
        self.normalizer = config;
        self
    }

    pub fn build(self) -> Result<StorefrontClient, SdkError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(SdkError::Validation(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if self.max_pages == 0 {
            return Err(SdkError::Validation("max_pages must be at least 1".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(SdkError::Validation("request_timeout must be non-zero".to_string()));
        }

        Ok(StorefrontClient {
            http: StorefrontHttp::new(self.endpoints, self.request_timeout)?,
            pricing_cache: Arc::new(RwLock::new(TtlCache::new(self.pricing_cache_ttl))),
            normalizer: self.normalizer,
            page_size: self.page_size,
            max_pages: self.max_pages,
        })
    }
}
