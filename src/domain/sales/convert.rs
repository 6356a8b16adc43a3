//! Canonicalization of raw marketplace events into [`SaleEvent`].

use super::wire::{RawNft, RawPayment, RawSaleEvent};
use super::{NftAsset, Payment, SaleEvent};

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

impl From<RawNft> for NftAsset {
    fn from(raw: RawNft) -> Self {
        Self {
            name: non_empty(raw.name),
            identifier: raw
                .identifier
                .or(raw.token_id)
                .map(|id| id.into_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) }),
            collection: non_empty(raw.collection),
            contract: non_empty(raw.contract)
                .or_else(|| non_empty(raw.contract_address.clone()))
                .or_else(|| non_empty(raw.asset_contract_address.clone())),
            image_url: non_empty(raw.display_image_url).or_else(|| non_empty(raw.image_url.clone())),
            metadata_url: non_empty(raw.metadata_url),
        }
    }
}

impl From<RawPayment> for Payment {
    fn from(raw: RawPayment) -> Self {
        Self {
            quantity_raw: raw
                .quantity
                .map(|q| q.into_string())
                .unwrap_or_default(),
            decimals: raw.decimals.unwrap_or(18),
            symbol: raw.symbol.unwrap_or_default(),
        }
    }
}

impl From<RawSaleEvent> for SaleEvent {
    fn from(raw: RawSaleEvent) -> Self {
        let id = raw
            .id
            .map(|i| i.into_string())
            .or_else(|| raw.event_id.clone().map(|i| i.into_string()))
            .or(raw.order_hash.clone())
            .or(raw.transaction_hash.clone())
            .or(raw.tx_hash.clone())
            .unwrap_or_default();

        // First *present* timestamp field wins, parseable or not; an
        // unparseable value keeps its raw form but resolves to no instant.
        let ts = raw
            .event_timestamp
            .or(raw.closing_date)
            .or(raw.created_date)
            .or(raw.occurred_at);

        Self {
            id,
            event_type: raw.event_type.unwrap_or_else(|| "sale".to_string()),
            nft: raw.nft.or(raw.asset).map(NftAsset::from).unwrap_or_default(),
            payment: raw.payment.map(Payment::from),
            seller: non_empty(raw.seller),
            buyer: non_empty(raw.buyer),
            timestamp: ts.as_ref().and_then(|t| t.to_unix_seconds()),
            timestamp_raw: ts.map(|t| t.raw_string()),
        }
    }
}
