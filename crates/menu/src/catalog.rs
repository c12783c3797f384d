use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid menu document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Menu document: `{"menuItems": [{"category": ..., "items": [{"name": ..., ...}]}]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDocument {
    #[serde(default)]
    pub menu_items: Vec<MenuCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuCategory {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A menu entry. Only `name` is interpreted; everything else is kept verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl MenuDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Loads the document, or an empty one when it is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(document) => {
                log::info!(
                    "Loaded {} menu categories from {}",
                    document.menu_items.len(),
                    path.display()
                );
                document
            }
            Err(err) => {
                log::warn!("Falling back to keyword category inference: {err}");
                Self::default()
            }
        }
    }

    /// Iterates `(category, item)` pairs in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MenuItem)> {
        self.menu_items.iter().flat_map(|category| {
            category
                .items
                .iter()
                .map(move |item| (category.category.as_str(), item))
        })
    }
}

/// Immutable lowercase item name -> lowercase category map.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    categories: HashMap<String, String>,
}

impl CatalogIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_document(document: &MenuDocument) -> Self {
        let mut categories = HashMap::new();
        for (category, item) in document.entries() {
            let Some(name) = item.name.as_deref().filter(|name| !name.is_empty()) else {
                continue;
            };
            categories.insert(name.to_lowercase(), category.trim().to_lowercase());
        }
        Self { categories }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_document(&MenuDocument::load(path)?))
    }

    /// Loads the catalog, or returns an empty index (keyword inference only) on failure.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::from_document(&MenuDocument::load_or_default(path))
    }

    /// Category for `item_name` (case-insensitive exact match), or `""` when unknown.
    pub fn lookup(&self, item_name: &str) -> &str {
        self.categories
            .get(&item_name.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn sample_document() -> MenuDocument {
        serde_json::from_value(serde_json::json!({
            "menuItems": [
                {
                    "category": " Signature Lattes ",
                    "items": [
                        {"name": "Caramel Craze Latte", "sizes": ["small", "medium"]},
                        {"description": "nameless entry"}
                    ]
                },
                {
                    "category": "Donuts & Bakery",
                    "items": [{"name": "Glazed Donut", "description": "Classic"}]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let index = CatalogIndex::from_document(&sample_document());

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("caramel craze LATTE"), "signature lattes");
        assert_eq!(index.lookup("Glazed Donut"), "donuts & bakery");
        assert_eq!(index.lookup("Boston Kreme"), "");
    }

    #[test]
    fn unknown_item_fields_are_preserved() {
        let document = sample_document();
        let (_, donut) = document.entries().nth(2).unwrap();
        assert_eq!(donut.fields["description"], "Classic");
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            serde_json::to_string(&sample_document()).unwrap()
        )
        .unwrap();

        let index = CatalogIndex::load(file.path()).unwrap();
        assert_eq!(index.lookup("glazed donut"), "donuts & bakery");
    }

    #[test]
    fn missing_or_broken_document_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("menuItems.json");
        assert!(CatalogIndex::load_or_empty(&missing).is_empty());

        std::fs::write(&missing, "{not json").unwrap();
        assert!(matches!(
            CatalogIndex::load(&missing),
            Err(CatalogError::Parse(_))
        ));
        assert!(CatalogIndex::load_or_empty(&missing).is_empty());
    }
}
