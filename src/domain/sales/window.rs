//! Trailing-window filtering and highest-sale selection.

use super::SaleEvent;
use rust_decimal::Decimal;

/// Events whose timestamp falls inside the trailing window ending at
/// `now_unix`. Events without a parseable timestamp are dropped.
pub fn filter_window(
    events: &[SaleEvent],
    now_unix: i64,
    window_secs: i64,
) -> Vec<&SaleEvent> {
    let cutoff = now_unix - window_secs;
    events
        .iter()
        .filter(|ev| matches!(ev.timestamp, Some(ts) if ts >= cutoff))
        .collect()
}

/// The event with the strictly greatest normalized price.
///
/// Ties keep the first-seen event; events without a usable price are
/// excluded; empty input yields `None`.
pub fn max_by_price<'a, I>(events: I) -> Option<&'a SaleEvent>
where
    I: IntoIterator<Item = &'a SaleEvent>,
{
    let mut best: Option<(&SaleEvent, Decimal)> = None;
    for ev in events {
        let Some(amount) = ev.normalized_price() else {
            continue;
        };
        match &best {
            Some((_, best_amount)) if amount <= *best_amount => {}
            _ => best = Some((ev, amount)),
        }
    }
    best.map(|(ev, _)| ev)
}

/// The highest-priced sale inside the trailing window — the "session high".
pub fn session_high(
    events: &[SaleEvent],
    now_unix: i64,
    window_secs: i64,
) -> Option<&SaleEvent> {
    max_by_price(filter_window(events, now_unix, window_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::Payment;

    const DAY_SECS: i64 = 86_400;

    fn sale(id: &str, ts: Option<i64>, qty: &str) -> SaleEvent {
        SaleEvent {
            id: id.to_string(),
            payment: Some(Payment {
                quantity_raw: qty.to_string(),
                decimals: 18,
                symbol: "GUN".to_string(),
            }),
            timestamp: ts,
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_window_cutoff() {
        let now = 1_764_263_173;
        let events = vec![
            sale("in", Some(now - 100), "1"),
            sale("edge", Some(now - DAY_SECS), "1"),
            sale("out", Some(now - DAY_SECS - 1), "1"),
        ];
        let kept = filter_window(&events, now, DAY_SECS);
        let ids: Vec<_> = kept.iter().map(|ev| ev.id.as_str()).collect();
        assert_eq!(ids, ["in", "edge"]);
    }

    #[test]
    fn test_filter_window_drops_unparseable_timestamp() {
        let events = vec![sale("no-ts", None, "1")];
        assert!(filter_window(&events, 1_764_263_173, DAY_SECS).is_empty());
    }

    #[test]
    fn test_max_by_price_picks_greatest() {
        let events = vec![
            sale("one", Some(0), "1000000000000000000"),
            sale("two", Some(0), "2000000000000000000"),
        ];
        assert_eq!(max_by_price(&events).unwrap().id, "two");
    }

    #[test]
    fn test_max_by_price_tie_keeps_first() {
        let events = vec![
            sale("first", Some(0), "5000000000000000000"),
            sale("second", Some(0), "5000000000000000000"),
        ];
        assert_eq!(max_by_price(&events).unwrap().id, "first");
    }

    #[test]
    fn test_max_by_price_skips_unpriced() {
        let mut no_payment = sale("bare", Some(0), "0");
        no_payment.payment = None;
        let events = vec![no_payment, sale("zero", Some(0), "0")];
        assert!(max_by_price(&events).is_none());
    }

    #[test]
    fn test_session_high_composes() {
        let now = 1_764_263_173;
        let events = vec![
            // Biggest sale, but outside the window.
            sale("stale", Some(now - 2 * DAY_SECS), "9000000000000000000"),
            sale("recent", Some(now - 60), "2000000000000000000"),
        ];
        assert_eq!(session_high(&events, now, DAY_SECS).unwrap().id, "recent");
    }
}
