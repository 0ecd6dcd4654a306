//! Integration tests for the storefront pricing client.
//!
//! Most tests run against a local stub of the upstreams (order book, rate
//! feeds, pricing config) served by axum on an ephemeral port. Tests that hit
//! the real upstreams are `#[ignore]` because they require network access.
//!
//! Run the live tests with:
//! ```bash
//! cargo test --test pricing_integration -- --ignored
//! ```

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use storefront_pricing::prelude::*;

const PRODUCT: &str = "RELIC-SWORD-001";

// ─── Stub upstream ───────────────────────────────────────────────────────────

/// Canned upstream responses. `None` answers with an error status.
#[derive(Default)]
struct Upstream {
    /// cursor (`""` for the first page) → page body
    pages: HashMap<String, Value>,
    eth_usd: Option<Value>,
    usd_brl: Option<Value>,
    global_config: Option<Value>,
    product_configs: HashMap<String, Value>,
    order_hits: AtomicUsize,
    config_hits: AtomicUsize,
}

impl Upstream {
    fn with_live_rates() -> Self {
        Self {
            eth_usd: Some(json!({ "ethereum": { "usd": 4713.59 } })),
            usd_brl: Some(json!({ "USDBRL": { "bid": "5.42", "ask": "5.43" } })),
            global_config: Some(json!({
                "global_markup_percent": 30,
                "updated_at": "2026-10-01T12:00:00Z"
            })),
            ..Self::default()
        }
    }

    fn page(mut self, cursor: &str, body: Value) -> Self {
        self.pages.insert(cursor.to_string(), body);
        self
    }
}

async fn orders(
    State(up): State<Arc<Upstream>>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    up.order_hits.fetch_add(1, Ordering::SeqCst);
    let cursor = q.get("cursor").cloned().unwrap_or_default();
    match up.pages.get(&cursor) {
        Some(body) => Json(body.clone()).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn eth_usd(State(up): State<Arc<Upstream>>) -> Response {
    match &up.eth_usd {
        Some(body) => Json(body.clone()).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn usd_brl(State(up): State<Arc<Upstream>>) -> Response {
    match &up.usd_brl {
        Some(body) => Json(body.clone()).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn pricing_config(
    State(up): State<Arc<Upstream>>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    up.config_hits.fetch_add(1, Ordering::SeqCst);
    let body = match q.get("product_code") {
        Some(code) => match up.product_configs.get(code) {
            Some(body) => Some(body.clone()),
            None => return StatusCode::NOT_FOUND.into_response(),
        },
        None => up.global_config.clone(),
    };
    match body {
        Some(body) => Json(body).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Serve `upstream` locally and return a builder pointed at it.
async fn serve(upstream: Upstream) -> (StorefrontClientBuilder, Arc<Upstream>) {
    let upstream = Arc::new(upstream);
    let app = Router::new()
        .route("/orders", get(orders))
        .route("/eth-usd", get(eth_usd))
        .route("/usd-brl", get(usd_brl))
        .route("/api/pricing/config", get(pricing_config))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = format!("http://{}", addr);
    let builder = StorefrontClient::builder()
        .api_url(&format!("{}/api", base))
        .orderbook_url(&base)
        .eth_usd_url(&format!("{}/eth-usd", base))
        .usd_brl_url(&format!("{}/usd-brl", base))
        .request_timeout(Duration::from_secs(2));
    (builder, upstream)
}

fn eth_order(id: &str, wei: &str, name: &str) -> Value {
    json!({
        "order_id": id,
        "status": "active",
        "buy": { "type": "ETH", "data": { "quantity_with_fees": wei, "decimals": 18 } },
        "sell": {
            "type": "ERC721",
            "data": {
                "token_id": "7",
                "properties": { "name": name, "rarity": "Epic", "image_url": "https://cdn.example/x.png" },
                "metadata": { "productCode": PRODUCT, "material": "Obsidian" }
            }
        }
    })
}

fn product() -> ProductCode {
    ProductCode::new(PRODUCT)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Two pages: 0.1 ETH + 0.07 ETH, then a malformed order + 0.08 ETH.
fn two_page_book() -> Upstream {
    Upstream::with_live_rates()
        .page(
            "",
            json!({
                "result": [
                    eth_order("a", "100000000000000000", "Ash Blade"),
                    eth_order("b", "70000000000000000", "Obsidian Blade"),
                ],
                "cursor": "page-2",
                "remaining": 1
            }),
        )
        .page(
            "page-2",
            json!({
                "result": [
                    eth_order("c", "abc", "Broken"),
                    eth_order("d", "80000000000000000", "Ember Blade"),
                ],
                "cursor": "",
                "remaining": 0
            }),
        )
}

// ─── Listings ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn best_listing_is_cheapest_across_pages() {
    let (builder, upstream) = serve(two_page_book()).await;
    let client = builder.build().unwrap();

    let item = client.listings().best(&product()).await.expect("a listing");

    assert_eq!(item.order_id.as_deref(), Some("b"));
    assert_eq!(item.identity.name.as_deref(), Some("Obsidian Blade"));
    assert_eq!(item.identity.material.as_deref(), Some("Obsidian"));
    assert_eq!(item.identity.product_code.as_deref(), Some(PRODUCT));
    assert_eq!(item.basis, PriceBasis::Eth);
    assert_eq!(item.prices.eth, dec("0.091"));
    assert_eq!(item.prices.usd, dec("428.94"));
    assert_eq!(item.prices.brl, dec("2324.83"));

    assert_eq!(upstream.order_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn all_listings_are_sorted_and_skip_malformed() {
    let (builder, _upstream) = serve(two_page_book()).await;
    let client = builder.build().unwrap();

    let items = client.listings().all(&product()).await;
    let ids: Vec<_> = items.iter().filter_map(|i| i.order_id.as_deref()).collect();
    assert_eq!(ids, vec!["b", "d", "a"]);
    assert!(items.iter().all(|i| i.is_priced()));
}

#[tokio::test]
async fn empty_book_means_no_listing() {
    let upstream = Upstream::with_live_rates().page("", json!({ "result": [], "remaining": 0 }));
    let (builder, _upstream) = serve(upstream).await;
    let client = builder.build().unwrap();

    assert!(client.listings().best(&product()).await.is_none());
    assert!(client.listings().all(&product()).await.is_empty());
}

#[tokio::test]
async fn only_malformed_orders_means_no_listing() {
    let upstream = Upstream::with_live_rates().page(
        "",
        json!({ "orders": [eth_order("x", "abc", "Broken")] }),
    );
    let (builder, _upstream) = serve(upstream).await;
    let client = builder.build().unwrap();

    assert!(client.listings().best(&product()).await.is_none());
}

#[tokio::test]
async fn order_book_down_degrades_to_no_listing() {
    let (builder, _upstream) = serve(Upstream::with_live_rates()).await;
    let client = builder.build().unwrap();

    assert!(client.orders().active(&product()).await.is_err());
    assert!(client.listings().best(&product()).await.is_none());
}

#[tokio::test]
async fn unsupported_buy_type_is_listed_without_price() {
    let mut order = eth_order("z", "5", "Trade-only Relic");
    order["buy"]["type"] = json!("ERC721");
    let upstream = Upstream::with_live_rates().page("", json!({ "data": { "orders": [order] } }));
    let (builder, _upstream) = serve(upstream).await;
    let client = builder.build().unwrap();

    let item = client.listings().best(&product()).await.expect("a listing");
    assert!(!item.is_priced());
    assert_eq!(item.prices, ItemPrices::ZERO);
}

#[tokio::test]
async fn rate_outage_uses_fallback_rates() {
    let upstream = Upstream {
        eth_usd: None,
        usd_brl: None,
        ..two_page_book()
    };
    let (builder, _upstream) = serve(upstream).await;
    let client = builder.build().unwrap();

    let quote = client.rates().fetch().await;
    assert!(!quote.is_live());
    assert_eq!(quote.rates, Rates::FALLBACK);

    // the fallback constants equal the live stub rates, so prices match
    let item = client.listings().best(&product()).await.expect("a listing");
    assert_eq!(item.prices.brl, dec("2324.83"));
}

// ─── Order-book paging ───────────────────────────────────────────────────────

#[tokio::test]
async fn repeated_cursor_stops_paging() {
    let upstream = Upstream::with_live_rates()
        .page(
            "",
            json!({ "result": [eth_order("a", "1", "A")], "next_cursor": "loop" }),
        )
        .page(
            "loop",
            json!({ "result": [eth_order("b", "2", "B")], "next_cursor": "loop" }),
        );
    let (builder, upstream) = serve(upstream).await;
    let client = builder.build().unwrap();

    let orders = client.orders().active(&product()).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(upstream.order_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn paging_is_bounded_by_max_pages() {
    let mut upstream = Upstream::with_live_rates();
    for i in 0..10 {
        let cursor = if i == 0 { String::new() } else { format!("c{}", i) };
        upstream = upstream.page(
            &cursor,
            json!({
                "result": [eth_order(&format!("o{}", i), "1000", "Relic")],
                "pagination": { "next_cursor": format!("c{}", i + 1) }
            }),
        );
    }
    let (builder, upstream) = serve(upstream).await;
    let client = builder.max_pages(3).build().unwrap();

    let orders = client.orders().active(&product()).await.unwrap();
    assert_eq!(orders.len(), 3);
    assert_eq!(upstream.order_hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn later_page_failure_keeps_earlier_pages() {
    let upstream = Upstream::with_live_rates().page(
        "",
        json!({ "result": [eth_order("a", "1", "A")], "cursor": "missing" }),
    );
    let (builder, _upstream) = serve(upstream).await;
    let client = builder.build().unwrap();

    let orders = client.orders().active(&product()).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id.as_deref(), Some("a"));
}

// ─── Pricing config ──────────────────────────────────────────────────────────

#[tokio::test]
async fn pricing_config_is_cached_until_invalidated() {
    let (builder, upstream) = serve(Upstream::with_live_rates()).await;
    let client = builder
        .pricing_cache_ttl(Duration::from_secs(60))
        .build()
        .unwrap();

    let first = client.pricing().config(None).await;
    let second = client.pricing().config(None).await;
    assert_eq!(first, second);
    assert_eq!(first.global_markup_percent, Decimal::from(30));
    assert!(first.updated_at.is_some());
    assert_eq!(upstream.config_hits.load(Ordering::SeqCst), 1);

    client.pricing().invalidate(None).await;
    client.pricing().config(None).await;
    assert_eq!(upstream.config_hits.load(Ordering::SeqCst), 2);

    client.clear_all_caches().await;
    client.pricing().config(None).await;
    assert_eq!(upstream.config_hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn zero_ttl_disables_pricing_cache() {
    let (builder, upstream) = serve(Upstream::with_live_rates()).await;
    let client = builder.pricing_cache_ttl(Duration::ZERO).build().unwrap();

    client.pricing().config(None).await;
    client.pricing().config(None).await;
    assert_eq!(upstream.config_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn product_config_overrides_global() {
    let mut upstream = Upstream::with_live_rates();
    upstream
        .product_configs
        .insert(PRODUCT.to_string(), json!({ "global_markup_percent": "10" }));
    let (builder, _upstream) = serve(upstream).await;
    let client = builder.build().unwrap();

    let markup = client.pricing().markup_multiplier(Some(&product())).await;
    assert_eq!(markup, dec("1.1"));
}

#[tokio::test]
async fn product_without_config_inherits_global() {
    let (builder, upstream) = serve(Upstream::with_live_rates()).await;
    let client = builder
        .pricing_cache_ttl(Duration::from_secs(60))
        .build()
        .unwrap();

    let markup = client.pricing().markup_multiplier(Some(&product())).await;
    assert_eq!(markup, dec("1.3"));
    // product lookup (404) + global lookup
    assert_eq!(upstream.config_hits.load(Ordering::SeqCst), 2);

    client.pricing().markup_multiplier(Some(&product())).await;
    assert_eq!(upstream.config_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn pricing_failure_uses_default_and_is_not_cached() {
    let upstream = Upstream {
        global_config: None,
        ..Upstream::with_live_rates()
    };
    let (builder, upstream) = serve(upstream).await;
    let client = builder
        .pricing_cache_ttl(Duration::from_secs(60))
        .build()
        .unwrap();

    assert_eq!(client.pricing().config(None).await, PricingConfig::default());
    assert_eq!(client.pricing().config(None).await, PricingConfig::default());
    assert_eq!(upstream.config_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn negative_markup_falls_back_to_default() {
    let upstream = Upstream {
        global_config: Some(json!({ "global_markup_percent": -20 })),
        ..Upstream::with_live_rates()
    };
    let (builder, _upstream) = serve(upstream).await;
    let client = builder.build().unwrap();

    assert_eq!(client.pricing().markup_multiplier(None).await, dec("1.3"));
}

// ─── Exact amounts ───────────────────────────────────────────────────────────

#[test]
fn wei_split_matches_arbitrary_precision_scaling() {
    let samples = [
        "0",
        "1",
        "70000000000000000",
        "999999999999999999",
        "1000000000000000000",
        "123456789012345678901234567890",
        "98765432109876543210987654321098765",
        "100000000000000000000000000000000000000001",
    ];

    for raw in samples {
        let amount = TokenAmount::parse(raw, 18).unwrap();
        let split = BigDecimal::from_str(&amount.to_string()).unwrap();
        let scaled = BigDecimal::new(BigInt::from_str(raw).unwrap(), 18);
        assert_eq!(split, scaled, "{}", raw);
    }
}

// ─── Live upstreams ──────────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn live_rates_are_positive() {
    dotenvy::dotenv().ok();
    let client = StorefrontClientBuilder::from_env().build().unwrap();

    let quote = client.rates().fetch().await;
    println!("{:?}", quote);
    assert!(quote.rates.eth_usd > Decimal::ZERO);
    assert!(quote.rates.usd_brl > Decimal::ZERO);
}

#[tokio::test]
#[ignore]
async fn live_best_listing() {
    dotenvy::dotenv().ok();
    let client = StorefrontClientBuilder::from_env().build().unwrap();
    let code = std::env::var("STOREFRONT_TEST_PRODUCT_CODE").unwrap_or_else(|_| PRODUCT.into());

    match client.listings().best(&ProductCode::new(code)).await {
        Some(item) => println!(
            "{:?}: {} / {} / {}",
            item.identity.name,
            item.prices.display_eth(),
            item.prices.display_usd(),
            item.prices.display_brl()
        ),
        None => println!("no active listings"),
    }
}
