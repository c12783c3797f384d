use crate::catalog::CatalogIndex;

pub const SIGNATURE_LATTES: &str = "signature lattes";
pub const COLD_BEVERAGES: &str = "cold beverages";
pub const DONUTS_AND_BAKERY: &str = "donuts & bakery";
pub const BREAKFAST_SANDWICHES: &str = "breakfast sandwiches";

/// Something that can name the menu category of an item.
pub trait CategorySource: Send + Sync {
    /// Lowercase category for `item_name`, or `None` when this source has no opinion.
    fn category_of(&self, item_name: &str) -> Option<String>;
}

impl CategorySource for CatalogIndex {
    fn category_of(&self, item_name: &str) -> Option<String> {
        let category = self.lookup(item_name);
        (!category.is_empty()).then(|| category.to_string())
    }
}

/// Keyword heuristics for items the catalog does not know. Rules are checked in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSource;

const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (&["latte"], SIGNATURE_LATTES),
    (&["cold brew", "refresher", "cold"], COLD_BEVERAGES),
    (&["donut", "bagel", "munchkins"], DONUTS_AND_BAKERY),
    (&["sandwich", "wrap", "croissant"], BREAKFAST_SANDWICHES),
];

impl CategorySource for KeywordSource {
    fn category_of(&self, item_name: &str) -> Option<String> {
        let normalized = item_name.to_lowercase();
        KEYWORD_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|kw| normalized.contains(kw)))
            .map(|(_, category)| category.to_string())
    }
}

/// Asks `primary` first and falls back to `secondary`.
#[derive(Debug, Clone, Default)]
pub struct FallbackSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: CategorySource, S: CategorySource> CategorySource for FallbackSource<P, S> {
    fn category_of(&self, item_name: &str) -> Option<String> {
        self.primary
            .category_of(item_name)
            .or_else(|| self.secondary.category_of(item_name))
    }
}

/// Catalog-backed lookup with keyword fallback.
pub type MenuCategories = FallbackSource<CatalogIndex, KeywordSource>;

impl MenuCategories {
    pub fn with_catalog(catalog: CatalogIndex) -> Self {
        FallbackSource::new(catalog, KeywordSource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MenuDocument;

    fn catalog() -> CatalogIndex {
        let document: MenuDocument = serde_json::from_value(serde_json::json!({
            "menuItems": [
                {"category": "Cold Beverages", "items": [{"name": "Frozen Chocolate"}]},
                {"category": "Hot Coffee", "items": [{"name": "Iced Latte Special"}]}
            ]
        }))
        .unwrap();
        CatalogIndex::from_document(&document)
    }

    #[test]
    fn keywords_follow_rule_order() {
        let keywords = KeywordSource;
        assert_eq!(
            keywords.category_of("Caramel Craze Latte").as_deref(),
            Some(SIGNATURE_LATTES)
        );
        // "latte" wins over "cold".
        assert_eq!(
            keywords.category_of("Cold Foam Latte").as_deref(),
            Some(SIGNATURE_LATTES)
        );
        assert_eq!(
            keywords.category_of("Original Cold Brew").as_deref(),
            Some(COLD_BEVERAGES)
        );
        assert_eq!(
            keywords.category_of("Munchkins Donut Hole Treats").as_deref(),
            Some(DONUTS_AND_BAKERY)
        );
        assert_eq!(
            keywords
                .category_of("Bacon Egg & Cheese on Croissant")
                .as_deref(),
            Some(BREAKFAST_SANDWICHES)
        );
        assert_eq!(keywords.category_of("Hot Chocolate"), None);
    }

    #[test]
    fn catalog_answer_beats_keywords() {
        let categories = MenuCategories::with_catalog(catalog());

        assert_eq!(
            categories.category_of("iced latte special").as_deref(),
            Some("hot coffee")
        );
        assert_eq!(
            categories.category_of("Frozen Chocolate").as_deref(),
            Some(COLD_BEVERAGES)
        );
        assert_eq!(
            categories.category_of("Sourdough Breakfast Sandwich").as_deref(),
            Some(BREAKFAST_SANDWICHES)
        );
    }

    #[test]
    fn empty_catalog_is_keywords_only() {
        let categories = MenuCategories::with_catalog(CatalogIndex::empty());
        assert_eq!(
            categories.category_of("Blueberry Refresher").as_deref(),
            Some(COLD_BEVERAGES)
        );
        assert_eq!(categories.category_of("Hash Browns"), None);
    }
}
