//! Custom serde helpers for upstream wire formats.

use serde::{Deserialize, Serialize};

/// A timestamp as the marketplace provider actually sends it: sometimes unix
/// seconds as a JSON number, sometimes an RFC 3339 string, occasionally a
/// float. Parsed lazily — an unparseable value stays around as raw text and
/// resolves to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlexibleTimestamp {
    Seconds(i64),
    Float(f64),
    Text(String),
}

impl FlexibleTimestamp {
    /// Resolve to unix seconds, or `None` when the raw value is unparseable.
    pub fn to_unix_seconds(&self) -> Option<i64> {
        match self {
            FlexibleTimestamp::Seconds(s) => Some(*s),
            FlexibleTimestamp::Float(f) if f.is_finite() => Some(f.floor() as i64),
            FlexibleTimestamp::Float(_) => None,
            FlexibleTimestamp::Text(s) => chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.timestamp()),
        }
    }

    /// The raw wire value as a string, for identity keys.
    pub fn raw_string(&self) -> String {
        match self {
            FlexibleTimestamp::Seconds(s) => s.to_string(),
            FlexibleTimestamp::Float(f) => f.to_string(),
            FlexibleTimestamp::Text(s) => s.clone(),
        }
    }
}
