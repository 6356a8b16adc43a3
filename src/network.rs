//! Upstream base URL constants.

/// Default market-data provider REST base URL.
pub const DEFAULT_MARKET_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Default marketplace events provider REST base URL.
pub const DEFAULT_MARKETPLACE_API_URL: &str = "https://api.opensea.io/api/v2";

/// Header carrying the optional market-data API key.
pub const MARKET_API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Header carrying the required marketplace API key.
pub const MARKETPLACE_API_KEY_HEADER: &str = "X-API-KEY";
