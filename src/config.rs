//! Overlay configuration.
//!
//! Serde-deserializable with sensible defaults for every field, so a config
//! file only needs to state what differs. Credentials are not part of this —
//! they come from the environment via the client builder.

use crate::shared::{AssetId, ChangeWindow, CollectionSlug};
use serde::Deserialize;

/// Top-level overlay configuration: one block per poller.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    pub market: MarketPollConfig,
    pub sales: SalesPollConfig,
}

/// Configuration for the market metrics poller.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketPollConfig {
    pub asset_id: AssetId,
    pub vs_currency: String,
    pub lookback_days: u32,
    pub poll_interval_secs: u64,
    /// Capacity of the locally observed price buffer.
    pub live_capacity: usize,
    /// Samples forming the short live delta (12 × 5-minute polls ≈ 1H).
    pub live_delta_points: usize,
    pub change_windows: Vec<ChangeWindow>,
    /// Window shown on the change badge.
    pub badge_window: ChangeWindow,
    /// Window for the long sparkline and its high/low pair.
    pub range_window: ChangeWindow,
    /// Assets shown on the multi-coin strip.
    pub watchlist: Vec<AssetId>,
}

impl Default for MarketPollConfig {
    fn default() -> Self {
        Self {
            asset_id: AssetId::from("gunz"),
            vs_currency: "usd".to_string(),
            lookback_days: 7,
            poll_interval_secs: 300,
            live_capacity: 24,
            live_delta_points: 12,
            change_windows: vec![
                ChangeWindow::Hour1,
                ChangeWindow::Hour4,
                ChangeWindow::Hour24,
            ],
            badge_window: ChangeWindow::Hour24,
            range_window: ChangeWindow::Hour24,
            watchlist: vec![
                AssetId::from("bitcoin"),
                AssetId::from("ethereum"),
                AssetId::from("solana"),
                AssetId::from("avalanche-2"),
            ],
        }
    }
}

/// Configuration for the sales feed poller.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SalesPollConfig {
    pub collection: CollectionSlug,
    pub limit: u32,
    pub poll_interval_secs: u64,
    /// Trailing window for the session-high card, in seconds.
    pub session_window_secs: i64,
    /// First-seen animation length per sale card.
    pub animation_ms: i64,
    /// Statically configured all-time-high card; never derived.
    pub all_time_high: Option<AllTimeHighConfig>,
}

impl Default for SalesPollConfig {
    fn default() -> Self {
        Self {
            collection: CollectionSlug::from("off-the-grid"),
            limit: 10,
            poll_interval_secs: 15,
            session_window_secs: 86_400,
            animation_ms: 5_000,
            all_time_high: None,
        }
    }
}

/// The all-time-high reference card, injected as configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AllTimeHighConfig {
    pub amount: f64,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub thumb_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.market.asset_id.as_str(), "gunz");
        assert_eq!(config.market.lookback_days, 7);
        assert_eq!(config.market.live_capacity, 24);
        assert_eq!(config.sales.collection.as_str(), "off-the-grid");
        assert_eq!(config.sales.session_window_secs, 86_400);
        assert!(config.sales.all_time_high.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{
            "market": {"asset_id": "ethereum", "poll_interval_secs": 60},
            "sales": {
                "collection": "some-collection",
                "all_time_high": {
                    "amount": 14444.0,
                    "symbol": "GUN",
                    "name": "Hitori Yubi Mask"
                }
            }
        }"#;
        let config: OverlayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.market.asset_id.as_str(), "ethereum");
        assert_eq!(config.market.poll_interval_secs, 60);
        assert_eq!(config.market.lookback_days, 7);
        let ath = config.sales.all_time_high.unwrap();
        assert_eq!(ath.amount, 14_444.0);
        assert_eq!(ath.timestamp, None);
    }
}
