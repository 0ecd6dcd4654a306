//! # Storefront Pricing SDK
//!
//! Turns active order-book listings for collectible items into display-ready
//! ETH / USD / BRL prices, for both native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Exact token amounts, rounding, domain models and the price
//!    normalizer (always available, WASM-safe, no I/O)
//! 2. **HTTP API** — `StorefrontHttp` with per-request timeouts and
//!    per-endpoint retry policies
//! 3. **High-Level Client** — `StorefrontClient` with nested sub-clients,
//!    a TTL cache for pricing config and degraded-mode fallbacks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_pricing::prelude::*;
//!
//! let client = StorefrontClient::builder()
//!     .api_url("http://localhost:3001/api")
//!     .build()?;
//!
//! match client.listings().best(&ProductCode::new("RELIC-SWORD-001")).await {
//!     Some(item) => println!("{}", item.prices.display_brl()),
//!     None => println!("no active listings"),
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, token amounts, rounding and formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with timeouts and retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `StorefrontClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes and amounts
    pub use crate::shared::fmt::Currency;
    pub use crate::shared::{BuyType, Cursor, ProductCode, TokenAmount};

    // Domain types — order
    pub use crate::domain::order::{select_best, BestOrder, OrderPage, Pagination, RawOrder};

    // Domain types — rates, pricing
    pub use crate::domain::pricing::{PricingConfig, TtlCache};
    pub use crate::domain::rates::{RateQuote, RateSource, Rates};

    // Domain types — listing
    pub use crate::domain::listing::{
        normalize, normalize_with, ItemAttribute, ItemIdentity, ItemPrices, NormalizedItemView,
        NormalizerConfig, PriceBasis,
    };

    // Errors
    pub use crate::error::{HttpError, QuantityError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        ListingsClient, OrdersClient, PricingClient, RatesSubClient, StorefrontClient,
        StorefrontClientBuilder,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
