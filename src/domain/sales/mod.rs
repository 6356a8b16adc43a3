//! Marketplace sales domain: canonical sale events, windowing, session highs.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod state;
pub mod window;
pub mod wire;

pub use state::SaleAnimationTracker;
pub use window::{filter_window, max_by_price, session_high};

use rust_decimal::Decimal;
use std::str::FromStr;

/// The NFT side of a sale, canonicalized from the provider's duck-typed
/// shapes (`nft` vs `asset`, several contract/token-id field spellings).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NftAsset {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub collection: Option<String>,
    pub contract: Option<String>,
    pub image_url: Option<String>,
    pub metadata_url: Option<String>,
}

impl NftAsset {
    /// Display name: the item name, else `#<token id>`, else `#?`.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match self.identifier.as_deref().filter(|i| !i.is_empty()) {
            Some(id) => format!("#{}", id),
            None => "#?".to_string(),
        }
    }
}

/// Payment leg of a sale. `quantity_raw` is the integer token amount as
/// delivered; the human-scale amount is `quantity_raw / 10^decimals`.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub quantity_raw: String,
    pub decimals: u32,
    pub symbol: String,
}

impl Payment {
    /// Exact normalized amount, or `None` for non-numeric or zero quantity.
    pub fn normalized_amount(&self) -> Option<Decimal> {
        let qty = Decimal::from_str(self.quantity_raw.trim()).ok()?;
        if qty.is_zero() {
            return None;
        }
        // Decimal carries at most 28 fractional digits.
        if self.decimals > 28 {
            return None;
        }
        Some(qty * Decimal::new(1, self.decimals))
    }

    /// `"12.50 GUN"`-style label, or `None` when the amount is undefined.
    pub fn price_label(&self) -> Option<String> {
        let amount = self.normalized_amount()?;
        Some(format!("{:.2} {}", amount, self.symbol).trim().to_string())
    }
}

/// One canonical marketplace sale event, immutable once converted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleEvent {
    /// First available upstream identity (event id, order hash, or tx hash).
    pub id: String,
    pub event_type: String,
    pub nft: NftAsset,
    pub payment: Option<Payment>,
    pub seller: Option<String>,
    pub buyer: Option<String>,
    /// Unix seconds, `None` when every upstream timestamp was unparseable.
    pub timestamp: Option<i64>,
    /// The raw wire timestamp, kept for identity keys.
    pub timestamp_raw: Option<String>,
}

impl SaleEvent {
    /// Normalized sale price, when the payment leg allows one.
    pub fn normalized_price(&self) -> Option<Decimal> {
        self.payment.as_ref().and_then(Payment::normalized_amount)
    }

    /// Stable identity for first-seen bookkeeping: pipe-joined non-empty
    /// parts of id / contract / token id / raw timestamp.
    pub fn dedup_key(&self) -> String {
        let parts = [
            Some(self.id.as_str()),
            self.nft.contract.as_deref(),
            self.nft.identifier.as_deref(),
            self.timestamp_raw.as_deref(),
        ];
        parts
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(qty: &str, decimals: u32) -> Payment {
        Payment {
            quantity_raw: qty.to_string(),
            decimals,
            symbol: "GUN".to_string(),
        }
    }

    #[test]
    fn test_normalized_amount_scales_by_decimals() {
        let amount = payment("1000000000000000000", 18).normalized_amount().unwrap();
        assert_eq!(amount, Decimal::ONE);
    }

    #[test]
    fn test_normalized_amount_rejects_zero_and_junk() {
        assert_eq!(payment("0", 18).normalized_amount(), None);
        assert_eq!(payment("garbage", 18).normalized_amount(), None);
        assert_eq!(payment("", 18).normalized_amount(), None);
    }

    #[test]
    fn test_price_label() {
        assert_eq!(
            payment("2500000000000000000", 18).price_label(),
            Some("2.50 GUN".to_string())
        );
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut nft = NftAsset {
            name: Some("Hitori Yubi Mask".to_string()),
            identifier: Some("6312".to_string()),
            ..Default::default()
        };
        assert_eq!(nft.display_name(), "Hitori Yubi Mask");
        nft.name = None;
        assert_eq!(nft.display_name(), "#6312");
        nft.identifier = None;
        assert_eq!(nft.display_name(), "#?");
    }

    #[test]
    fn test_dedup_key_drops_empty_parts() {
        let ev = SaleEvent {
            id: "evt1".to_string(),
            nft: NftAsset {
                contract: Some("0xabc".to_string()),
                identifier: None,
                ..Default::default()
            },
            timestamp_raw: Some("1764263173".to_string()),
            ..Default::default()
        };
        assert_eq!(ev.dedup_key(), "evt1|0xabc|1764263173");
    }
}
