//! Display view models.
//!
//! The pollers assemble these; a thin display layer turns them into DOM
//! updates. Text that ends up inside markup is escaped at construction, so
//! a consumer can splice fields into HTML directly.

use crate::config::AllTimeHighConfig;
use crate::domain::market::{metrics, CoinListRow, LiveSampleBuffer, MarketChart, MarketSnapshot};
use crate::domain::rarity::RarityInfo;
use crate::domain::sales::SaleEvent;
use crate::render::sparkline::{render_sparkline, SparklineOptions};
use crate::render::sanitize;
use crate::shared::{fmt, ChangeWindow, Trend};

/// Shown in the sales list when no events are available.
pub const EMPTY_SALES_MESSAGE: &str = "No recent sales. Waiting for activity…";

/// Everything the price widget needs for one repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsView {
    pub price: String,
    /// True when the displayed price differs from the previous repaint —
    /// drives the flip animation.
    pub price_flipped: bool,
    pub change_label: String,
    pub change_window: ChangeWindow,
    pub trend: Trend,
    pub market_cap: String,
    pub volume_24h: String,
    /// SVG markup for the short live window, when drawable.
    pub live_sparkline: Option<String>,
    /// SVG markup for the long trailing window, when drawable.
    pub range_sparkline: Option<String>,
    pub live_delta_label: String,
    pub range_stat_lines: Vec<String>,
    pub error: Option<String>,
}

impl MetricsView {
    /// Assemble the price widget view from one poll cycle's outputs.
    ///
    /// `previous_price` is the price string of the prior repaint, used only
    /// to detect a flip. `show_end_dot` marks the live sparkline's newest
    /// point (set on fresh data).
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        snapshot: &MarketSnapshot,
        chart: &MarketChart,
        live: &LiveSampleBuffer,
        badge_window: ChangeWindow,
        range_window: ChangeWindow,
        live_delta_points: usize,
        show_end_dot: bool,
        previous_price: Option<&str>,
    ) -> Self {
        let price = fmt::format_price(snapshot.price_usd);
        let price_flipped = previous_price.is_some_and(|prev| prev != price);

        let badge_change = snapshot.change(badge_window);
        let trend = Trend::from_change(badge_change);

        let live_values = live.snapshot();
        let live_sparkline = render_sparkline(
            &live_values,
            trend,
            &SparklineOptions {
                show_end_dot,
                ..Default::default()
            },
        );

        let range_values: Vec<f64> = metrics::trailing_window(&chart.prices, range_window)
            .iter()
            .map(|p| p.value)
            .collect();
        let range_sparkline = render_sparkline(
            &range_values,
            trend,
            &SparklineOptions {
                as_area: true,
                show_zero_line: true,
                percent_normalized: true,
                ..Default::default()
            },
        );

        let live_delta = live.change_pct_over_last(live_delta_points);
        let live_delta_label = format!("Δ1H: {}", fmt::format_pct(live_delta));

        let range_label = range_window.as_str().to_uppercase();
        let mut range_stat_lines = vec![format!(
            "Δ{}: {}",
            range_label,
            fmt::format_pct(snapshot.change(range_window))
        )];
        if let Some(high) = snapshot.high_usd {
            range_stat_lines.push(format!("High: {}", fmt::format_price(Some(high))));
        }
        if let Some(low) = snapshot.low_usd {
            range_stat_lines.push(format!("Low: {}", fmt::format_price(Some(low))));
        }

        Self {
            price,
            price_flipped,
            change_label: fmt::format_pct(badge_change),
            change_window: badge_window,
            trend,
            market_cap: fmt::format_usd_short(snapshot.market_cap_usd),
            volume_24h: fmt::format_usd_short(snapshot.volume_24h_usd),
            live_sparkline,
            range_sparkline,
            live_delta_label,
            range_stat_lines,
            error: None,
        }
    }

    /// The "no data" rendition shown after a degraded cycle.
    pub fn degraded(
        badge_window: ChangeWindow,
        range_window: ChangeWindow,
        error: impl Into<String>,
    ) -> Self {
        let snapshot = MarketSnapshot::empty(&[badge_window, range_window]);
        let mut view = Self::build(
            &snapshot,
            &MarketChart::default(),
            &LiveSampleBuffer::new(1),
            badge_window,
            range_window,
            2,
            false,
            None,
        );
        view.error = Some(error.into());
        view
    }
}

/// One row of the multi-coin strip.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinRowView {
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub trend: Trend,
    /// Rough per-hour volume, scaled down from the 24H figure.
    pub volume_1h: String,
}

impl CoinRowView {
    pub fn build(row: &CoinListRow) -> Self {
        Self {
            symbol: sanitize(&row.symbol),
            price: fmt::format_usd(row.price_usd),
            change: fmt::format_pct(row.change_pct),
            trend: Trend::from_change(row.change_pct),
            volume_1h: fmt::format_compact(row.volume_24h_usd.map(|v| v / 24.0)),
        }
    }
}

/// A "session high" / "all-time high" card.
#[derive(Debug, Clone, PartialEq)]
pub struct HighCard {
    pub label: String,
    pub name: String,
    pub price: String,
    pub thumb_url: Option<String>,
}

impl HighCard {
    pub const SESSION_LABEL: &'static str = "SESSION HIGH 24H";
    pub const ALL_TIME_LABEL: &'static str = "ALL-TIME HIGH";

    /// The em-dash card shown when nothing qualifies.
    pub fn placeholder(label: &str) -> Self {
        Self {
            label: label.to_string(),
            name: fmt::MISSING.to_string(),
            price: String::new(),
            thumb_url: None,
        }
    }

    /// Card for the highest sale in the current window.
    pub fn from_sale(label: &str, event: &SaleEvent) -> Self {
        Self {
            label: label.to_string(),
            name: sanitize(&event.nft.display_name()),
            price: event
                .payment
                .as_ref()
                .and_then(|p| p.price_label())
                .map(|p| sanitize(&p))
                .unwrap_or_default(),
            thumb_url: event.nft.image_url.clone(),
        }
    }

    /// Card for the statically configured all-time high.
    pub fn from_all_time_high(config: &AllTimeHighConfig) -> Self {
        if config.name.is_empty() || config.symbol.is_empty() {
            return Self::placeholder(Self::ALL_TIME_LABEL);
        }
        Self {
            label: Self::ALL_TIME_LABEL.to_string(),
            name: sanitize(&config.name),
            price: sanitize(&format!("{:.2} {}", config.amount, config.symbol)),
            thumb_url: config.thumb_url.clone(),
        }
    }
}

/// One entry of the sales list.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleCard {
    pub name: String,
    pub event_type: String,
    pub rarity_label: Option<String>,
    /// CSS rarity class; `"other"` when no rarity resolved.
    pub rarity_class: String,
    pub price: Option<String>,
    pub date_line: String,
    pub time_line: String,
    pub direction: Option<String>,
    pub thumb_url: Option<String>,
    /// True while the card's first-seen animation window is open.
    pub animating: bool,
}

impl SaleCard {
    pub fn build(event: &SaleEvent, rarity: Option<&RarityInfo>, animating: bool) -> Self {
        let (date_line, time_line) = match event.timestamp {
            Some(ts) => (fmt::format_date_line(ts), fmt::format_time(ts)),
            None => (String::new(), String::new()),
        };

        let seller = fmt::format_address(event.seller.as_deref());
        let buyer = fmt::format_address(event.buyer.as_deref());
        let direction = if !seller.is_empty() && !buyer.is_empty() {
            Some(format!("{} → {}", seller, buyer))
        } else {
            None
        };

        Self {
            name: sanitize(&event.nft.display_name()),
            event_type: sanitize(&event.event_type),
            rarity_label: rarity.map(|r| sanitize(&r.label)),
            rarity_class: rarity
                .map(|r| r.class.as_str().to_string())
                .unwrap_or_else(|| "other".to_string()),
            price: event
                .payment
                .as_ref()
                .and_then(|p| p.price_label())
                .map(|p| sanitize(&p)),
            date_line,
            time_line,
            direction,
            thumb_url: event.nft.image_url.clone(),
            animating,
        }
    }
}

/// Everything the sales widget needs for one repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesView {
    pub cards: Vec<SaleCard>,
    pub session_high: HighCard,
    pub all_time_high: HighCard,
    /// Set when there are no cards to show.
    pub placeholder: Option<String>,
    pub error: Option<String>,
}

impl SalesView {
    pub fn new(
        cards: Vec<SaleCard>,
        session_high: HighCard,
        all_time_high: HighCard,
    ) -> Self {
        let placeholder = if cards.is_empty() {
            Some(EMPTY_SALES_MESSAGE.to_string())
        } else {
            None
        };
        Self {
            cards,
            session_high,
            all_time_high,
            placeholder,
            error: None,
        }
    }

    /// The "no data" rendition shown after a degraded cycle.
    pub fn degraded(all_time_high: HighCard, error: impl Into<String>) -> Self {
        let mut view = Self::new(
            Vec::new(),
            HighCard::placeholder(HighCard::SESSION_LABEL),
            all_time_high,
        );
        view.error = Some(error.into());
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::SeriesPoint;
    use crate::domain::rarity::RarityClass;
    use crate::domain::sales::{NftAsset, Payment};

    fn sample_chart() -> MarketChart {
        let prices = (0..168)
            .map(|i| SeriesPoint::new(i * 3_600_000, 0.04 + (i % 7) as f64 * 0.001))
            .collect();
        MarketChart {
            prices,
            market_caps: vec![SeriesPoint::new(601_200_000, 40_000_000.0)],
            total_volumes: vec![SeriesPoint::new(601_200_000, 2_000_000.0)],
        }
    }

    fn sample_sale() -> SaleEvent {
        SaleEvent {
            id: "evt".to_string(),
            event_type: "sale".to_string(),
            nft: NftAsset {
                name: Some("Mask <rare>".to_string()),
                image_url: Some("https://img.example/1.png".to_string()),
                ..Default::default()
            },
            payment: Some(Payment {
                quantity_raw: "2500000000000000000".to_string(),
                decimals: 18,
                symbol: "GUN".to_string(),
            }),
            seller: Some("0xSellerAddressAAAA".to_string()),
            buyer: Some("0xBuyerAddressBBBB".to_string()),
            timestamp: Some(1_764_263_173),
            timestamp_raw: Some("1764263173".to_string()),
        }
    }

    #[test]
    fn test_metrics_view_happy_path() {
        let chart = sample_chart();
        let now_ms = chart.latest_ts_ms().unwrap();
        let snapshot = metrics::derive(
            &chart,
            now_ms,
            &[ChangeWindow::Hour4, ChangeWindow::Hour24],
            ChangeWindow::Hour24,
        );
        let mut live = LiveSampleBuffer::new(24);
        live.push(0.042);
        live.push(0.044);

        let view = MetricsView::build(
            &snapshot,
            &chart,
            &live,
            ChangeWindow::Hour24,
            ChangeWindow::Hour24,
            12,
            true,
            Some("$0.0410"),
        );

        assert!(view.price.starts_with('$'));
        assert!(view.price_flipped);
        assert!(view.live_sparkline.is_some());
        assert!(view.range_sparkline.is_some());
        assert!(view.live_delta_label.starts_with("Δ1H:"));
        assert!(view.range_stat_lines[0].starts_with("Δ24H:"));
        // High/Low lines present for a well-populated chart.
        assert_eq!(view.range_stat_lines.len(), 3);
        assert!(view.error.is_none());
    }

    #[test]
    fn test_metrics_view_degraded_is_all_placeholders() {
        let view = MetricsView::degraded(
            ChangeWindow::Hour24,
            ChangeWindow::Hour24,
            "market data unavailable",
        );
        assert_eq!(view.price, fmt::MISSING);
        assert_eq!(view.market_cap, fmt::MISSING);
        assert!(view.live_sparkline.is_none());
        assert!(view.range_sparkline.is_none());
        assert!(!view.price_flipped);
        assert_eq!(view.error.as_deref(), Some("market data unavailable"));
    }

    #[test]
    fn test_sale_card_escapes_and_formats() {
        let rarity = RarityInfo {
            label: "Epic".to_string(),
            class: RarityClass::Epic,
        };
        let card = SaleCard::build(&sample_sale(), Some(&rarity), true);
        assert_eq!(card.name, "Mask &lt;rare&gt;");
        assert_eq!(card.rarity_class, "epic");
        assert_eq!(card.price.as_deref(), Some("2.50 GUN"));
        assert_eq!(card.direction.as_deref(), Some("…aaaa → …bbbb"));
        assert!(card.animating);
        assert!(!card.date_line.is_empty());
    }

    #[test]
    fn test_sale_card_without_rarity_is_other() {
        let card = SaleCard::build(&sample_sale(), None, false);
        assert_eq!(card.rarity_class, "other");
        assert_eq!(card.rarity_label, None);
    }

    #[test]
    fn test_high_card_from_sale_and_placeholder() {
        let card = HighCard::from_sale(HighCard::SESSION_LABEL, &sample_sale());
        assert_eq!(card.price, "2.50 GUN");
        let empty = HighCard::placeholder(HighCard::SESSION_LABEL);
        assert_eq!(empty.name, fmt::MISSING);
    }

    #[test]
    fn test_coin_row_view() {
        let row = CoinListRow {
            id: "solana".into(),
            symbol: "SOL".to_string(),
            price_usd: Some(212.5),
            change_pct: Some(-1.5),
            volume_24h_usd: Some(4.8e9),
        };
        let view = CoinRowView::build(&row);
        assert_eq!(view.price, "$212.50");
        assert_eq!(view.change, "-1.50%");
        assert_eq!(view.trend, Trend::Negative);
        assert_eq!(view.volume_1h, "200.0M");
    }

    #[test]
    fn test_sales_view_placeholder_when_empty() {
        let view = SalesView::new(
            Vec::new(),
            HighCard::placeholder(HighCard::SESSION_LABEL),
            HighCard::placeholder(HighCard::ALL_TIME_LABEL),
        );
        assert_eq!(view.placeholder.as_deref(), Some(EMPTY_SALES_MESSAGE));
    }
}
