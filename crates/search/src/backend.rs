use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Vector sub-query vectorized by the index from `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorQuery {
    pub text: String,
    pub k_nearest_neighbors: usize,
    pub fields: String,
}

/// One hybrid (text + optional vector) query with semantic ranking and a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    pub vector: Option<VectorQuery>,
    pub semantic_configuration: String,
    pub select: Vec<String>,
    pub top: usize,
}

/// A search hit: whatever projected fields the index returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchRecord {
    fields: Map<String, Value>,
}

impl SearchRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    /// Field rendered for a result line: strings verbatim, string lists comma-joined.
    pub fn text(&self, field: &str) -> Option<String> {
        let value = self.get(field)?;
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Array(values) => values
                .iter()
                .map(|value| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        };
        (!rendered.is_empty()).then_some(rendered)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

pub type RecordStream = BoxStream<'static, Result<SearchRecord>>;

/// The hybrid search service behind the `search` tool.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<RecordStream>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_strings_lists_and_numbers() {
        let record: SearchRecord = serde_json::from_value(serde_json::json!({
            "name": "Glazed Donut",
            "sizes": ["single", "half dozen"],
            "popularity": 9,
            "origin": null,
            "description": "",
        }))
        .unwrap();

        assert_eq!(record.text("name").as_deref(), Some("Glazed Donut"));
        assert_eq!(record.text("sizes").as_deref(), Some("single, half dozen"));
        assert_eq!(record.text("popularity").as_deref(), Some("9"));
        assert_eq!(record.text("origin"), None);
        assert_eq!(record.text("description"), None);
        assert_eq!(record.text("category"), None);
    }
}
