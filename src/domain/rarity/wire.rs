//! Wire types for NFT metadata documents.
//!
//! Metadata lives off-marketplace and follows no single schema; attribute
//! lists appear under `attributes`, `traits`, or `properties.attributes`,
//! and values can be strings, numbers, or booleans.

use serde::Deserialize;

/// An NFT metadata document, reduced to its attribute lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataDocument {
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
    #[serde(default)]
    pub traits: Vec<RawAttribute>,
    #[serde(default)]
    pub properties: Option<MetadataProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataProperties {
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

impl MetadataDocument {
    /// The first populated attribute list, in schema preference order.
    pub fn attribute_list(&self) -> &[RawAttribute] {
        if !self.attributes.is_empty() {
            return &self.attributes;
        }
        if !self.traits.is_empty() {
            return &self.traits;
        }
        match &self.properties {
            Some(props) => &props.attributes,
            None => &[],
        }
    }
}

/// One attribute, with the key under any of three field spellings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAttribute {
    #[serde(default)]
    pub trait_type: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl RawAttribute {
    /// Lowercased attribute key, first spelling that is present.
    pub fn key(&self) -> String {
        self.trait_type
            .as_deref()
            .or(self.kind.as_deref())
            .or(self.name.as_deref())
            .unwrap_or_default()
            .to_lowercase()
    }

    /// The attribute value as trimmed text, falling back to the key fields;
    /// `None` when nothing usable remains.
    pub fn value_string(&self) -> Option<String> {
        let raw = match &self.value {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        };
        let text = raw
            .or_else(|| self.trait_type.clone())
            .or_else(|| self.name.clone())?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_list_preference_order() {
        let json = r#"{
            "traits": [{"name": "Tier", "value": "Rare"}],
            "properties": {"attributes": [{"name": "Tier", "value": "Common"}]}
        }"#;
        let doc: MetadataDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.attribute_list().len(), 1);
        assert_eq!(doc.attribute_list()[0].value_string().as_deref(), Some("Rare"));
    }

    #[test]
    fn test_attribute_list_nested_properties() {
        let json = r#"{"properties": {"attributes": [{"type": "grade", "value": "S"}]}}"#;
        let doc: MetadataDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.attribute_list()[0].key(), "grade");
    }

    #[test]
    fn test_value_string_numeric_and_fallback() {
        let attr: RawAttribute =
            serde_json::from_str(r#"{"trait_type": "Tier", "value": 3}"#).unwrap();
        assert_eq!(attr.value_string().as_deref(), Some("3"));

        let attr: RawAttribute = serde_json::from_str(r#"{"trait_type": "Rarity"}"#).unwrap();
        assert_eq!(attr.value_string().as_deref(), Some("Rarity"));

        let attr: RawAttribute = serde_json::from_str(r#"{"value": "   "}"#).unwrap();
        assert_eq!(attr.value_string(), None);
    }
}
