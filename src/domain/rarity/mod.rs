//! NFT rarity domain: trait extraction, tier classification, cached lookup.

pub mod wire;

#[cfg(feature = "http")]
pub mod resolver;

#[cfg(feature = "http")]
pub use resolver::RarityResolver;

use crate::domain::sales::NftAsset;
use wire::MetadataDocument;

/// Rarity tier, as a CSS-friendly class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RarityClass {
    Common,
    Uncommon,
    Rare,
    Epic,
    #[default]
    Other,
}

impl RarityClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RarityClass::Common => "common",
            RarityClass::Uncommon => "uncommon",
            RarityClass::Rare => "rare",
            RarityClass::Epic => "epic",
            RarityClass::Other => "other",
        }
    }
}

impl std::fmt::Display for RarityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved rarity trait: the verbatim label plus its tier class.
#[derive(Debug, Clone, PartialEq)]
pub struct RarityInfo {
    pub label: String,
    pub class: RarityClass,
}

/// Classify a raw trait value into a tier by case-insensitive substring.
///
/// The checks run in this exact order and a later match overrides an earlier
/// one, so a multi-word label lands on the last tier it mentions ("Uncommon
/// Epic Skin" is epic). Card colors depend on this order; keep it as is.
pub fn classify(raw: &str) -> RarityClass {
    let lower = raw.to_lowercase();
    let mut class = RarityClass::Other;
    if lower.contains("common") && !lower.contains("uncommon") {
        class = RarityClass::Common;
    }
    if lower.contains("uncommon") {
        class = RarityClass::Uncommon;
    }
    if lower.contains("epic") {
        class = RarityClass::Epic;
    }
    if lower.contains("rare") {
        class = RarityClass::Rare;
    }
    class
}

const RARITY_KEY_HINTS: [&str; 4] = ["rarity", "tier", "grade", "quality"];

/// Extract a rarity trait from a metadata document.
///
/// The first attribute (in document order) whose key mentions one of the
/// rarity hints wins; its value becomes the label.
pub fn rarity_from_document(doc: &MetadataDocument) -> Option<RarityInfo> {
    let attr = doc
        .attribute_list()
        .iter()
        .find(|attr| {
            let key = attr.key();
            RARITY_KEY_HINTS.iter().any(|hint| key.contains(hint))
        })?
        .clone();

    let label = attr.value_string()?;
    let class = classify(&label);
    Some(RarityInfo { label, class })
}

/// Cache identity for an NFT: the metadata URL when present, else
/// `collection:identifier`. `None` means the item is uncacheable.
pub fn cache_key(nft: &NftAsset) -> Option<String> {
    if let Some(url) = nft.metadata_url.as_deref() {
        return Some(url.to_string());
    }
    match (nft.collection.as_deref(), nft.identifier.as_deref()) {
        (Some(collection), Some(identifier)) => Some(format!("{}:{}", collection, identifier)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_single_tiers() {
        assert_eq!(classify("Common"), RarityClass::Common);
        assert_eq!(classify("Uncommon"), RarityClass::Uncommon);
        assert_eq!(classify("Rare"), RarityClass::Rare);
        assert_eq!(classify("EPIC"), RarityClass::Epic);
    }

    #[test]
    fn test_classify_unknown_is_other() {
        assert_eq!(classify("Legendary"), RarityClass::Other);
        assert_eq!(classify(""), RarityClass::Other);
    }

    #[test]
    fn test_classify_multi_word_last_match_wins() {
        assert_eq!(classify("Uncommon Epic Skin"), RarityClass::Epic);
        assert_eq!(classify("Epic Rare"), RarityClass::Rare);
    }

    #[test]
    fn test_rarity_from_document_first_hint_wins() {
        let json = r#"{
            "attributes": [
                {"trait_type": "Background", "value": "Night"},
                {"trait_type": "Rarity Tier", "value": "Epic"},
                {"trait_type": "Quality", "value": "Common"}
            ]
        }"#;
        let doc: wire::MetadataDocument = serde_json::from_str(json).unwrap();
        let info = rarity_from_document(&doc).unwrap();
        assert_eq!(info.label, "Epic");
        assert_eq!(info.class, RarityClass::Epic);
    }

    #[test]
    fn test_rarity_from_document_no_hit() {
        let json = r#"{"attributes": [{"trait_type": "Background", "value": "Night"}]}"#;
        let doc: wire::MetadataDocument = serde_json::from_str(json).unwrap();
        assert!(rarity_from_document(&doc).is_none());
    }

    #[test]
    fn test_cache_key_prefers_metadata_url() {
        let nft = NftAsset {
            metadata_url: Some("https://meta.example/1".to_string()),
            collection: Some("off-the-grid".to_string()),
            identifier: Some("1".to_string()),
            ..Default::default()
        };
        assert_eq!(cache_key(&nft).as_deref(), Some("https://meta.example/1"));
    }

    #[test]
    fn test_cache_key_collection_fallback_and_none() {
        let nft = NftAsset {
            collection: Some("off-the-grid".to_string()),
            identifier: Some("42".to_string()),
            ..Default::default()
        };
        assert_eq!(cache_key(&nft).as_deref(), Some("off-the-grid:42"));
        assert_eq!(cache_key(&NftAsset::default()), None);
    }
}
