//! Wire types for marketplace event responses (REST).
//!
//! The provider has shipped several envelope and nesting variants over time
//! (`asset_events` vs `events`, `nft` vs `asset`, four timestamp fields, ids
//! as numbers or strings). Everything optional here; canonicalization to one
//! internal shape happens in `convert`.

use crate::shared::serde_util::FlexibleTimestamp;
use serde::Deserialize;

/// An id that arrives as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Num(u64),
    Text(String),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Num(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// A token quantity that arrives as a string, integer, or float.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Int(u64),
    Float(f64),
    Text(String),
}

impl RawQuantity {
    pub fn into_string(self) -> String {
        match self {
            RawQuantity::Int(n) => n.to_string(),
            RawQuantity::Float(f) => f.to_string(),
            RawQuantity::Text(s) => s,
        }
    }
}

/// Response envelope; one of the two event arrays is populated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsEnvelope {
    #[serde(default)]
    pub asset_events: Vec<RawSaleEvent>,
    #[serde(default)]
    pub events: Vec<RawSaleEvent>,
    #[serde(default)]
    pub next: Option<String>,
}

impl EventsEnvelope {
    /// The populated event array, whichever spelling the provider used.
    pub fn into_events(self) -> Vec<RawSaleEvent> {
        if !self.asset_events.is_empty() {
            self.asset_events
        } else {
            self.events
        }
    }
}

/// One raw sale event, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSaleEvent {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub event_id: Option<RawId>,
    #[serde(default)]
    pub order_hash: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub nft: Option<RawNft>,
    #[serde(default)]
    pub asset: Option<RawNft>,
    #[serde(default)]
    pub payment: Option<RawPayment>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub event_timestamp: Option<FlexibleTimestamp>,
    #[serde(default)]
    pub closing_date: Option<FlexibleTimestamp>,
    #[serde(default)]
    pub created_date: Option<FlexibleTimestamp>,
    #[serde(default)]
    pub occurred_at: Option<FlexibleTimestamp>,
}

/// Raw NFT object under `nft` or `asset`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub identifier: Option<RawId>,
    #[serde(default)]
    pub token_id: Option<RawId>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub asset_contract_address: Option<String>,
    #[serde(default)]
    pub display_image_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub metadata_url: Option<String>,
}

/// Raw payment leg.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayment {
    #[serde(default)]
    pub quantity: Option<RawQuantity>,
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_prefers_asset_events() {
        let json = r#"{"asset_events": [{"id": 1}], "events": [{"id": 2}, {"id": 3}]}"#;
        let envelope: EventsEnvelope = serde_json::from_str(json).unwrap();
        let events = envelope.into_events();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_envelope_falls_back_to_events() {
        let json = r#"{"events": [{"id": "abc"}]}"#;
        let envelope: EventsEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.into_events().len(), 1);
    }

    #[test]
    fn test_raw_id_number_or_string() {
        let n: RawId = serde_json::from_str("42").unwrap();
        assert_eq!(n.into_string(), "42");
        let s: RawId = serde_json::from_str("\"0xdeadbeef\"").unwrap();
        assert_eq!(s.into_string(), "0xdeadbeef");
    }

    #[test]
    fn test_full_event_parses() {
        let json = r#"{
            "event_type": "sale",
            "order_hash": "0xorder",
            "nft": {
                "identifier": "6312",
                "name": "Hitori Yubi Mask",
                "collection": "off-the-grid",
                "contract": "0x9ed9",
                "display_image_url": "https://img.example/6312.png",
                "metadata_url": "https://meta.example/6312"
            },
            "payment": {"quantity": "1000000000000000000", "decimals": 18, "symbol": "GUN"},
            "seller": "0xSeller",
            "buyer": "0xBuyer",
            "event_timestamp": 1764263173
        }"#;
        let ev: RawSaleEvent = serde_json::from_str(json).unwrap();
        assert_eq!(ev.event_type.as_deref(), Some("sale"));
        assert!(ev.nft.is_some());
        assert_eq!(
            ev.event_timestamp.unwrap().to_unix_seconds(),
            Some(1_764_263_173)
        );
    }
}
