//! Wire types for market-data provider responses (REST).

use serde::Deserialize;
use std::collections::HashMap;

/// Chart response: three parallel series of `[epoch_ms, value]` pairs.
///
/// Any missing series deserializes to empty rather than failing the whole
/// response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
    #[serde(default)]
    pub market_caps: Vec<(f64, f64)>,
    #[serde(default)]
    pub total_volumes: Vec<(f64, f64)>,
}

/// Coin document, trimmed to the `market_data` block the overlay reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinResponse {
    #[serde(default)]
    pub market_data: Option<CoinMarketData>,
}

/// Per-currency metric maps inside a coin document. Values can be null for
/// thin markets, hence `Option` in the map values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub market_cap: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub total_volume: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinMarketData {
    pub fn usd(map: &HashMap<String, Option<f64>>) -> Option<f64> {
        map.get("usd").copied().flatten().filter(|v| v.is_finite())
    }
}

/// One entry of the `coins/markets` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketsListEntry {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
}
