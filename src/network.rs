//! Network URL constants for the storefront SDK.

/// Default storefront backend base URL (pricing config and catalog endpoints).
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Default order-book base URL (external marketplace, v3 orders API).
pub const DEFAULT_ORDERBOOK_URL: &str = "https://api.x.immutable.com/v3";

/// Default ETH→USD spot price feed.
pub const DEFAULT_ETH_USD_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

/// Default USD→BRL spot price feed.
pub const DEFAULT_USD_BRL_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
