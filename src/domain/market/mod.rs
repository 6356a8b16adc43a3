//! Market metrics domain: raw time series, derived snapshots, spot quotes.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod metrics;
pub mod state;
pub mod wire;

pub use metrics::{derive, nearest_at_or_after, window_high_low};
pub use state::LiveSampleBuffer;

use crate::shared::{AssetId, ChangeWindow};

/// A single observation in a market time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// Epoch milliseconds, non-decreasing within a series.
    pub ts_ms: i64,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(ts_ms: i64, value: f64) -> Self {
        Self { ts_ms, value }
    }
}

/// Three parallel series as delivered by the market-data provider's chart
/// endpoint: prices, market caps, total volumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketChart {
    pub prices: Vec<SeriesPoint>,
    pub market_caps: Vec<SeriesPoint>,
    pub total_volumes: Vec<SeriesPoint>,
}

impl MarketChart {
    /// Timestamp of the most recent price sample.
    pub fn latest_ts_ms(&self) -> Option<i64> {
        self.prices.last().map(|p| p.ts_ms)
    }

    /// Raw price values in series order, for sparkline rendering.
    pub fn price_values(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p.value).collect()
    }
}

/// Percentage change over one look-back window; `None` when the anchor is
/// missing, zero, or non-finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowChange {
    pub window: ChangeWindow,
    pub pct: Option<f64>,
}

/// Point-in-time metrics derived from a [`MarketChart`]. Ephemeral —
/// recomputed from scratch on every poll cycle.
///
/// Every field is independently nullable: any missing or degenerate upstream
/// value degrades to `None`, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub changes: Vec<WindowChange>,
    /// High over the snapshot's range window.
    pub high_usd: Option<f64>,
    /// Low over the snapshot's range window.
    pub low_usd: Option<f64>,
}

impl MarketSnapshot {
    /// An all-`None` snapshot carrying the requested windows.
    pub fn empty(windows: &[ChangeWindow]) -> Self {
        Self {
            price_usd: None,
            market_cap_usd: None,
            volume_24h_usd: None,
            changes: windows
                .iter()
                .map(|w| WindowChange {
                    window: *w,
                    pct: None,
                })
                .collect(),
            high_usd: None,
            low_usd: None,
        }
    }

    /// Change percentage for one window, if it was requested and derivable.
    pub fn change(&self, window: ChangeWindow) -> Option<f64> {
        self.changes
            .iter()
            .find(|c| c.window == window)
            .and_then(|c| c.pct)
    }
}

/// Spot metrics from the provider's coin document (no history needed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotMetrics {
    pub price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub change_24h_pct: Option<f64>,
}

/// One row of the multi-coin snapshot strip.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinListRow {
    pub id: AssetId,
    pub symbol: String,
    pub price_usd: Option<f64>,
    /// 1H change when the listing carries it, else the 24H change.
    pub change_pct: Option<f64>,
    pub volume_24h_usd: Option<f64>,
}
