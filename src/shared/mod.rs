//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the upstream providers send, so they can be
//! used directly in wire types without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use std::time::Duration;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Newtype for market-data provider asset identifiers (e.g. `"gunz"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for AssetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetId(s.to_string()))
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId(s))
    }
}

// ─── CollectionSlug ──────────────────────────────────────────────────────────

/// Newtype for marketplace collection slugs (e.g. `"off-the-grid"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionSlug(String);

impl CollectionSlug {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CollectionSlug {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CollectionSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for CollectionSlug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CollectionSlug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CollectionSlug(s))
    }
}

// ─── ChangeWindow ────────────────────────────────────────────────────────────

/// Look-back window for derived change statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeWindow {
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[default]
    #[serde(rename = "24h")]
    Hour24,
    #[serde(rename = "7d")]
    Day7,
}

impl ChangeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour1 => "1h",
            Self::Hour4 => "4h",
            Self::Hour24 => "24h",
            Self::Day7 => "7d",
        }
    }

    /// Window length in seconds.
    pub fn seconds(&self) -> u64 {
        match self {
            Self::Hour1 => 3_600,
            Self::Hour4 => 14_400,
            Self::Hour24 => 86_400,
            Self::Day7 => 604_800,
        }
    }

    /// Window length in milliseconds.
    pub fn millis(&self) -> i64 {
        self.seconds() as i64 * 1_000
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.seconds())
    }
}

impl std::fmt::Display for ChangeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Trend ───────────────────────────────────────────────────────────────────

/// Direction of a change statistic, used by the display layer to pick a color
/// class. Derived from a change percentage, never recomputed from a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Trend {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Trend {
    /// Map an optional change percentage onto a trend sign.
    ///
    /// `None` and exact zero are both neutral.
    pub fn from_change(change_pct: Option<f64>) -> Self {
        match change_pct {
            Some(v) if v > 0.0 => Trend::Positive,
            Some(v) if v < 0.0 => Trend::Negative,
            _ => Trend::Neutral,
        }
    }

    /// CSS modifier class for the display layer; empty for neutral.
    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
            Trend::Neutral => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_serde() {
        let id = AssetId::from("gunz");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gunz\"");
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_collection_slug_serde() {
        let slug = CollectionSlug::from("off-the-grid");
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"off-the-grid\"");
    }

    #[test]
    fn test_change_window_serde() {
        let w: ChangeWindow = serde_json::from_str("\"4h\"").unwrap();
        assert_eq!(w, ChangeWindow::Hour4);
        assert_eq!(w.seconds(), 14_400);
        assert_eq!(ChangeWindow::Day7.millis(), 604_800_000);
    }

    #[test]
    fn test_trend_from_change() {
        assert_eq!(Trend::from_change(Some(1.5)), Trend::Positive);
        assert_eq!(Trend::from_change(Some(-0.2)), Trend::Negative);
        assert_eq!(Trend::from_change(Some(0.0)), Trend::Neutral);
        assert_eq!(Trend::from_change(None), Trend::Neutral);
    }

    #[test]
    fn test_trend_css_class() {
        assert_eq!(Trend::Positive.css_class(), "positive");
        assert_eq!(Trend::Neutral.css_class(), "");
    }
}
