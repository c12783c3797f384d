use std::env;
use std::path::PathBuf;

use order_search::SearchConfig;

const DEFAULT_MENU_PATH: &str = "data/menuItems.json";

/// Process configuration, read once at startup from `ORDER_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfig {
    pub menu_path: PathBuf,
    pub search: SearchConfig,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            menu_path: PathBuf::from(DEFAULT_MENU_PATH),
            search: SearchConfig::default(),
        }
    }
}

impl OrderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, fallback: String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(fallback)
        };

        let config = Self {
            menu_path: lookup("ORDER_MENU_PATH")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.menu_path),
            search: SearchConfig {
                semantic_configuration: text(
                    "ORDER_SEARCH_SEMANTIC_CONFIGURATION",
                    defaults.search.semantic_configuration,
                ),
                identifier_field: text(
                    "ORDER_SEARCH_IDENTIFIER_FIELD",
                    defaults.search.identifier_field,
                ),
                content_field: text("ORDER_SEARCH_CONTENT_FIELD", defaults.search.content_field),
                embedding_field: text(
                    "ORDER_SEARCH_EMBEDDING_FIELD",
                    defaults.search.embedding_field,
                ),
                use_vector_query: lookup("ORDER_SEARCH_USE_VECTOR_QUERY")
                    .map(|value| parse_bool(&value))
                    .unwrap_or(defaults.search.use_vector_query),
            },
        };
        log::debug!("Resolved configuration: {config:?}");
        config
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> OrderConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OrderConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(config_from(&[]), OrderConfig::default());
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("ORDER_MENU_PATH", " /srv/menu.json "),
            ("ORDER_SEARCH_CONTENT_FIELD", "content"),
            ("ORDER_SEARCH_USE_VECTOR_QUERY", "Off"),
            ("ORDER_SEARCH_IDENTIFIER_FIELD", "   "),
        ]);

        assert_eq!(config.menu_path, PathBuf::from("/srv/menu.json"));
        assert_eq!(config.search.content_field, "content");
        assert_eq!(config.search.identifier_field, "id");
        assert!(!config.search.use_vector_query);
    }

    #[test]
    fn bool_parsing_accepts_common_truthy_values() {
        for value in ["1", "true", "YES", " on "] {
            assert!(parse_bool(value), "{value}");
        }
        for value in ["0", "false", "no", ""] {
            assert!(!parse_bool(value), "{value}");
        }
    }
}
