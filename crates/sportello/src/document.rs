//! Document model.
//!
//! Documents are externally authored JSON with no enforced schema: a single
//! record may carry venue fields (hours, address, catalog), municipality
//! fields (city, festivities, open data), or both. Everything is optional
//! and defaults to empty, so a partially populated document never fails to
//! deserialize; handlers probe capabilities instead of trusting a shape tag.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub config: Option<VenueConfig>,
    #[serde(default)]
    pub catalog: Vec<Category>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub faq: HashMap<String, String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub cta: Vec<Cta>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub pilot: Option<Pilot>,
    #[serde(default)]
    pub festivities: Vec<Festivity>,
    #[serde(default, alias = "openData")]
    pub open_data: Option<OpenData>,
    #[serde(default)]
    pub social: Option<Social>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueConfig {
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default, alias = "mapUrl")]
    pub map_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Best-seller flag; curated documents use either spelling.
    #[serde(default, alias = "bestSeller", alias = "best_seller")]
    pub favorite: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cta {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pilot {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Festivity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenData {
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Social {
    #[serde(default)]
    pub website: Option<String>,
}

impl Document {
    /// Parse a document from raw JSON. Unknown fields are ignored and
    /// missing fields default, so curated documents of any vintage load.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn has_venue_config(&self) -> bool {
        self.config.is_some()
    }

    /// True when the document carries at least one catalog category.
    pub fn has_catalog(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// Category labels in curation order, empty names skipped.
    pub fn category_names(&self, limit: usize) -> Vec<&str> {
        self.catalog
            .iter()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_deserializes() {
        let doc = Document::from_json("{}").unwrap();
        assert!(!doc.has_venue_config());
        assert!(!doc.has_catalog());
        assert!(doc.faq.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let doc = Document::from_json(r#"{"theme": "dark", "name": "Da Mario"}"#).unwrap();
        assert_eq!(doc.name.as_deref(), Some("Da Mario"));
    }

    #[test]
    fn test_favorite_flag_aliases() {
        let a: Item = serde_json::from_value(serde_json::json!({
            "name": "Margherita", "favorite": true
        }))
        .unwrap();
        let b: Item = serde_json::from_value(serde_json::json!({
            "name": "Diavola", "bestSeller": true
        }))
        .unwrap();
        assert!(a.favorite);
        assert!(b.favorite);
    }

    #[test]
    fn test_camel_case_aliases() {
        let doc = Document::from_json(
            r#"{
                "config": {"mapUrl": "https://maps.example/x"},
                "openData": {"json": "https://example.test/d.json"}
            }"#,
        )
        .unwrap();
        assert!(doc.config.unwrap().map_url.is_some());
        assert!(doc.open_data.unwrap().json.is_some());
    }

    #[test]
    fn test_category_names_skips_blanks() {
        let doc = Document::from_json(
            r#"{"catalog": [{"name": "Pizze"}, {"name": ""}, {"name": "Dolci"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.category_names(5), vec!["Pizze", "Dolci"]);
        assert_eq!(doc.category_names(1), vec!["Pizze"]);
    }
}
