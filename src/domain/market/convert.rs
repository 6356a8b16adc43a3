//! Conversions from wire types to market domain types.

use super::wire::{CoinMarketData, CoinResponse, MarketChartResponse, MarketsListEntry};
use super::{CoinListRow, MarketChart, SeriesPoint, SpotMetrics};

fn to_series(pairs: Vec<(f64, f64)>) -> Vec<SeriesPoint> {
    pairs
        .into_iter()
        .filter(|(ts, _)| ts.is_finite())
        .map(|(ts, value)| SeriesPoint {
            ts_ms: ts as i64,
            value,
        })
        .collect()
}

impl From<MarketChartResponse> for MarketChart {
    fn from(resp: MarketChartResponse) -> Self {
        Self {
            prices: to_series(resp.prices),
            market_caps: to_series(resp.market_caps),
            total_volumes: to_series(resp.total_volumes),
        }
    }
}

impl From<CoinResponse> for SpotMetrics {
    fn from(resp: CoinResponse) -> Self {
        let md = match resp.market_data {
            Some(md) => md,
            None => return SpotMetrics::default(),
        };
        SpotMetrics {
            price_usd: CoinMarketData::usd(&md.current_price),
            market_cap_usd: CoinMarketData::usd(&md.market_cap),
            volume_24h_usd: CoinMarketData::usd(&md.total_volume),
            change_24h_pct: md.price_change_percentage_24h.filter(|v| v.is_finite()),
        }
    }
}

impl From<MarketsListEntry> for CoinListRow {
    fn from(entry: MarketsListEntry) -> Self {
        // 1H change when present, else fall back to the 24H figure.
        let change_pct = entry
            .price_change_percentage_1h_in_currency
            .or(entry.price_change_percentage_24h)
            .filter(|v| v.is_finite());
        Self {
            id: entry.id.into(),
            symbol: entry.symbol.to_uppercase(),
            price_usd: entry.current_price.filter(|v| v.is_finite()),
            change_pct,
            volume_24h_usd: entry.total_volume.filter(|v| v.is_finite()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_conversion_preserves_order() {
        let resp = MarketChartResponse {
            prices: vec![(1_000.0, 0.04), (2_000.0, 0.05)],
            market_caps: vec![(1_000.0, 9e6)],
            total_volumes: vec![],
        };
        let chart: MarketChart = resp.into();
        assert_eq!(
            chart.prices,
            vec![SeriesPoint::new(1_000, 0.04), SeriesPoint::new(2_000, 0.05)]
        );
        assert_eq!(chart.market_caps.len(), 1);
        assert!(chart.total_volumes.is_empty());
    }

    #[test]
    fn test_spot_metrics_without_market_data() {
        let spot: SpotMetrics = CoinResponse { market_data: None }.into();
        assert_eq!(spot, SpotMetrics::default());
    }

    #[test]
    fn test_coin_row_change_fallback() {
        let entry = MarketsListEntry {
            id: "solana".to_string(),
            symbol: "sol".to_string(),
            current_price: Some(212.5),
            price_change_percentage_1h_in_currency: None,
            price_change_percentage_24h: Some(-3.1),
            total_volume: Some(4.2e9),
        };
        let row: CoinListRow = entry.into();
        assert_eq!(row.symbol, "SOL");
        assert_eq!(row.change_pct, Some(-3.1));
    }

    #[test]
    fn test_coin_row_prefers_1h_change() {
        let entry = MarketsListEntry {
            id: "bitcoin".to_string(),
            symbol: "btc".to_string(),
            current_price: Some(100_000.0),
            price_change_percentage_1h_in_currency: Some(0.4),
            price_change_percentage_24h: Some(-2.0),
            total_volume: None,
        };
        let row: CoinListRow = entry.into();
        assert_eq!(row.change_pct, Some(0.4));
    }
}
