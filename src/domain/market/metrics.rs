//! Derivation of point-in-time metrics from raw market time series.
//!
//! All functions here are pure and total: degenerate input (empty series,
//! zero anchors, non-finite samples) degrades to `None`, never an error.

use super::{MarketChart, MarketSnapshot, SeriesPoint, WindowChange};
use crate::shared::ChangeWindow;

/// Find the first sample at or after `target_ms`.
///
/// When the target lies beyond the end of the series, the last sample is
/// returned instead — closest available, preferring recency. `None` only for
/// an empty series.
pub fn nearest_at_or_after(series: &[SeriesPoint], target_ms: i64) -> Option<&SeriesPoint> {
    series
        .iter()
        .find(|p| p.ts_ms >= target_ms)
        .or_else(|| series.last())
}

/// Percentage change from `anchor` to `latest`.
///
/// `None` unless the anchor is finite and strictly positive and the latest
/// value is finite.
pub fn change_pct(latest: f64, anchor: f64) -> Option<f64> {
    if !latest.is_finite() || !anchor.is_finite() || anchor <= 0.0 {
        return None;
    }
    Some((latest - anchor) / anchor * 100.0)
}

/// The trailing slice of `series` covering approximately `window`.
///
/// The slice length is the fraction of the series corresponding to the window
/// relative to the total series span (at least 2 points). Equal-interval
/// sampling is assumed, which holds for periodic provider feeds.
pub fn trailing_window(series: &[SeriesPoint], window: ChangeWindow) -> &[SeriesPoint] {
    let len = series.len();
    if len < 2 {
        return series;
    }
    let span_ms = series[len - 1].ts_ms - series[0].ts_ms;
    if span_ms <= 0 || window.millis() >= span_ms {
        return series;
    }
    let fraction = window.millis() as f64 / span_ms as f64;
    let size = ((len as f64 * fraction).floor() as usize).max(2).min(len);
    &series[len - size..]
}

/// High/low over the trailing window, ignoring non-finite samples.
///
/// Requires at least 2 finite values in the slice, else `None`.
pub fn window_high_low(series: &[SeriesPoint], window: ChangeWindow) -> Option<(f64, f64)> {
    let values: Vec<f64> = trailing_window(series, window)
        .iter()
        .map(|p| p.value)
        .filter(|v| v.is_finite())
        .collect();
    if values.len() < 2 {
        return None;
    }
    let high = values.iter().copied().fold(f64::MIN, f64::max);
    let low = values.iter().copied().fold(f64::MAX, f64::min);
    Some((high, low))
}

fn last_finite(series: &[SeriesPoint]) -> Option<f64> {
    series.last().map(|p| p.value).filter(|v| v.is_finite())
}

/// Derive a [`MarketSnapshot`] from a chart at the `now_ms` anchor.
///
/// `change_windows` selects the look-back deltas to compute; `range_window`
/// selects the slice for the high/low pair. An empty price series yields an
/// all-`None` snapshot.
pub fn derive(
    chart: &MarketChart,
    now_ms: i64,
    change_windows: &[ChangeWindow],
    range_window: ChangeWindow,
) -> MarketSnapshot {
    if chart.prices.is_empty() {
        return MarketSnapshot::empty(change_windows);
    }

    let latest_price = last_finite(&chart.prices);

    let changes = change_windows
        .iter()
        .map(|w| {
            let pct = latest_price.and_then(|latest| {
                nearest_at_or_after(&chart.prices, now_ms - w.millis())
                    .and_then(|anchor| change_pct(latest, anchor.value))
            });
            WindowChange { window: *w, pct }
        })
        .collect();

    let range = window_high_low(&chart.prices, range_window);

    MarketSnapshot {
        price_usd: latest_price,
        market_cap_usd: last_finite(&chart.market_caps),
        volume_24h_usd: last_finite(&chart.total_volumes),
        changes,
        high_usd: range.map(|(high, _)| high),
        low_usd: range.map(|(_, low)| low),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 3_600_000;

    fn hourly_series(values: &[f64]) -> Vec<SeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| SeriesPoint::new(i as i64 * HOUR_MS, *v))
            .collect()
    }

    fn chart(prices: &[f64]) -> MarketChart {
        MarketChart {
            prices: hourly_series(prices),
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_returns_first_at_or_after() {
        let series = hourly_series(&[1.0, 2.0, 3.0]);
        let hit = nearest_at_or_after(&series, HOUR_MS).unwrap();
        assert_eq!(hit.value, 2.0);
        let hit = nearest_at_or_after(&series, HOUR_MS - 1).unwrap();
        assert_eq!(hit.value, 2.0);
    }

    #[test]
    fn test_lookup_past_end_returns_last() {
        let series = hourly_series(&[1.0, 2.0, 3.0]);
        let hit = nearest_at_or_after(&series, 100 * HOUR_MS).unwrap();
        assert_eq!(hit.value, 3.0);
    }

    #[test]
    fn test_lookup_empty_is_none() {
        assert!(nearest_at_or_after(&[], 0).is_none());
    }

    #[test]
    fn test_change_pct_basic() {
        assert_eq!(change_pct(110.0, 100.0), Some(10.0));
        assert_eq!(change_pct(90.0, 100.0), Some(-10.0));
    }

    #[test]
    fn test_change_pct_zero_anchor_is_none() {
        assert_eq!(change_pct(5.0, 0.0), None);
        assert_eq!(change_pct(5.0, -1.0), None);
        assert_eq!(change_pct(f64::NAN, 100.0), None);
    }

    #[test]
    fn test_derive_empty_prices_all_none() {
        let snap = derive(
            &MarketChart::default(),
            0,
            &[ChangeWindow::Hour1, ChangeWindow::Hour24],
            ChangeWindow::Hour24,
        );
        assert_eq!(snap, MarketSnapshot::empty(&[ChangeWindow::Hour1, ChangeWindow::Hour24]));
    }

    #[test]
    fn test_derive_one_hour_delta() {
        // prices: 100 at t0, 110 at t0+1h; now = t0+1h; 1H window anchors at t0.
        let c = chart(&[100.0, 110.0]);
        let snap = derive(&c, HOUR_MS, &[ChangeWindow::Hour1], ChangeWindow::Hour24);
        assert_eq!(snap.price_usd, Some(110.0));
        assert_eq!(snap.change(ChangeWindow::Hour1), Some(10.0));
    }

    #[test]
    fn test_derive_zero_anchor_delta_is_none() {
        let c = chart(&[0.0, 5.0]);
        let snap = derive(&c, HOUR_MS, &[ChangeWindow::Hour1], ChangeWindow::Hour24);
        assert_eq!(snap.price_usd, Some(5.0));
        assert_eq!(snap.change(ChangeWindow::Hour1), None);
    }

    #[test]
    fn test_trailing_window_fraction() {
        // 168 hourly points ≈ 7 days; a 24H window is the last 1/7th (24 pts).
        let values: Vec<f64> = (0..168).map(|i| i as f64).collect();
        let series = hourly_series(&values);
        let slice = trailing_window(&series, ChangeWindow::Hour24);
        assert_eq!(slice.len(), 24);
        assert_eq!(slice[0].value, 144.0);
    }

    #[test]
    fn test_trailing_window_wider_than_span() {
        let series = hourly_series(&[1.0, 2.0, 3.0]);
        assert_eq!(trailing_window(&series, ChangeWindow::Day7).len(), 3);
    }

    #[test]
    fn test_window_high_low_ignores_non_finite() {
        let mut series = hourly_series(&[1.0, 9.0, 4.0]);
        series.push(SeriesPoint::new(3 * HOUR_MS, f64::NAN));
        let (high, low) = window_high_low(&series, ChangeWindow::Day7).unwrap();
        assert_eq!(high, 9.0);
        assert_eq!(low, 1.0);
    }

    #[test]
    fn test_window_high_low_needs_two_finite() {
        let series = vec![
            SeriesPoint::new(0, 1.0),
            SeriesPoint::new(HOUR_MS, f64::NAN),
        ];
        assert!(window_high_low(&series, ChangeWindow::Hour24).is_none());
    }
}
