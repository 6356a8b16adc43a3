//! Display formatting for overlay widgets.
//!
//! All formatting happens at render time. Derived statistics are stored as
//! plain floating point and never mutated here; a missing value always
//! formats as an em dash.

use chrono::{DateTime, Datelike, Utc};

/// Placeholder shown wherever a value is unavailable.
pub const MISSING: &str = "—";

fn valid(n: Option<f64>) -> Option<f64> {
    n.filter(|v| v.is_finite())
}

/// Format a token price in USD. Sub-dollar prices get an extra decimal.
pub fn format_price(n: Option<f64>) -> String {
    match valid(n) {
        Some(v) if v < 1.0 => format!("${:.4}", v),
        Some(v) => format!("${:.3}", v),
        None => MISSING.to_string(),
    }
}

/// Format a spot quote in USD with decimals scaled to magnitude.
pub fn format_usd(n: Option<f64>) -> String {
    match valid(n) {
        Some(v) if v < 0.01 => format!("${:.6}", v),
        Some(v) if v < 1.0 => format!("${:.4}", v),
        Some(v) => format!("${:.2}", v),
        None => MISSING.to_string(),
    }
}

/// Compact USD notation for large aggregates: `$1.23B`, `$45.10M`, `$9.99K`.
pub fn format_usd_short(n: Option<f64>) -> String {
    let v = match valid(n) {
        Some(v) => v,
        None => return MISSING.to_string(),
    };
    let abs = v.abs();
    if abs >= 1e9 {
        format!("${:.2}B", v / 1e9)
    } else if abs >= 1e6 {
        format!("${:.2}M", v / 1e6)
    } else if abs >= 1e3 {
        format!("${:.2}K", v / 1e3)
    } else {
        format!("${:.2}", v)
    }
}

/// Compact plain-number notation: `1.2B`, `3.4M`, `5.6K`, else integral.
pub fn format_compact(n: Option<f64>) -> String {
    let v = match valid(n) {
        Some(v) => v,
        None => return MISSING.to_string(),
    };
    let abs = v.abs();
    if abs >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        format!("{:.0}", v)
    }
}

/// Signed percentage with two decimals: `+1.23%` / `-0.45%`.
pub fn format_pct(n: Option<f64>) -> String {
    match valid(n) {
        Some(v) if v > 0.0 => format!("+{:.2}%", v),
        Some(v) => format!("{:.2}%", v),
        None => MISSING.to_string(),
    }
}

/// Truncate a wallet address to its last four characters: `…f00d`.
pub fn format_address(addr: Option<&str>) -> String {
    let addr = match addr {
        Some(a) if !a.is_empty() => a.to_lowercase(),
        _ => return String::new(),
    };
    let tail: String = addr
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("…{}", tail)
}

/// `HH:MM` clock time from unix seconds; empty on out-of-range input.
pub fn format_time(unix_secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(unix_secs, 0) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => String::new(),
    }
}

/// `Weekday, Month Nth` date line from unix seconds; empty on out-of-range
/// input.
pub fn format_date_line(unix_secs: i64) -> String {
    let dt = match DateTime::<Utc>::from_timestamp(unix_secs, 0) {
        Some(dt) => dt,
        None => return String::new(),
    };
    let day = dt.day();
    format!(
        "{}, {} {}{}",
        dt.format("%A"),
        dt.format("%B"),
        day,
        ordinal_suffix(day)
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
