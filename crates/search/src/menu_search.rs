use std::sync::Arc;

use futures::StreamExt;

use crate::backend::{SearchBackend, SearchQuery, SearchRecord, VectorQuery};
use crate::error::{Result, SearchError};

pub const NO_MATCHES_NOTICE: &str = "No matching menu entries found.";
pub const UNAVAILABLE_NOTICE: &str = "I'm sorry, I can't reach our menu data right now.";

const RESULT_SEPARATOR: &str = "\n-----\n";
const TOP_RESULTS: usize = 5;
const VECTOR_NEIGHBORS: usize = 50;

/// Fields projected in addition to the configured identifier and content fields.
const MENU_FIELDS: &[&str] = &[
    "category",
    "name",
    "description",
    "longDescription",
    "origin",
    "caffeineContent",
    "brewingMethod",
    "popularity",
    "sizes",
];

/// Index field names and ranking settings for menu search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub semantic_configuration: String,
    pub identifier_field: String,
    pub content_field: String,
    pub embedding_field: String,
    pub use_vector_query: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            semantic_configuration: "menuSemanticConfig".to_string(),
            identifier_field: "id".to_string(),
            content_field: "description".to_string(),
            embedding_field: "embedding".to_string(),
            use_vector_query: true,
        }
    }
}

impl SearchConfig {
    fn identifier_field(&self) -> &str {
        non_empty_or(&self.identifier_field, "id")
    }

    fn full_projection(&self) -> Vec<String> {
        let mut fields = vec![
            self.identifier_field(),
            non_empty_or(&self.content_field, "content"),
        ];
        fields.extend_from_slice(MENU_FIELDS);

        let mut select: Vec<String> = Vec::new();
        for field in fields {
            if !select.iter().any(|existing| existing == field) {
                select.push(field.to_string());
            }
        }
        select
    }

    fn minimal_projection(&self) -> Vec<String> {
        vec![
            self.identifier_field().to_string(),
            non_empty_or(&self.content_field, "description").to_string(),
        ]
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// The `search` tool: hybrid query, one projection fallback, text rendering.
#[derive(Clone)]
pub struct MenuSearch {
    backend: Arc<dyn SearchBackend>,
    config: SearchConfig,
}

impl MenuSearch {
    pub fn new(backend: Arc<dyn SearchBackend>, config: SearchConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn build_query(&self, text: &str, select: Vec<String>) -> SearchQuery {
        let vector = (self.config.use_vector_query && !self.config.embedding_field.is_empty())
            .then(|| VectorQuery {
                text: text.to_string(),
                k_nearest_neighbors: VECTOR_NEIGHBORS,
                fields: self.config.embedding_field.clone(),
            });
        SearchQuery {
            text: text.to_string(),
            vector,
            semantic_configuration: self.config.semantic_configuration.clone(),
            select,
            top: TOP_RESULTS,
        }
    }

    /// Runs the query and renders results. Never fails: problems become a notice the
    /// assistant can relay.
    pub async fn search(&self, text: &str) -> String {
        log::info!("Knowledge search requested for query '{text}'");
        if text.trim().is_empty() {
            return NO_MATCHES_NOTICE.to_string();
        }

        match self.collect(text).await {
            Ok(records) => {
                log::debug!("Search results returned {} documents", records.len());
                let lines: Vec<String> = records
                    .iter()
                    .map(|record| self.render(record))
                    .collect();
                if lines.is_empty() {
                    NO_MATCHES_NOTICE.to_string()
                } else {
                    lines.join(RESULT_SEPARATOR)
                }
            }
            Err(err) => {
                log::error!("Menu search request failed: {err}");
                UNAVAILABLE_NOTICE.to_string()
            }
        }
    }

    async fn collect(&self, text: &str) -> Result<Vec<SearchRecord>> {
        let query = self.build_query(text, self.config.full_projection());
        let mut stream = match self.backend.search(&query).await {
            Ok(stream) => stream,
            Err(err @ SearchError::FieldMismatch(_)) => {
                log::warn!("Retrying search with minimal fields after select mismatch: {err}");
                let fallback = self.build_query(text, self.config.minimal_projection());
                self.backend.search(&fallback).await?
            }
            Err(err) => return Err(err),
        };

        let mut records = Vec::new();
        while let Some(record) = stream.next().await {
            records.push(record?);
        }
        Ok(records)
    }

    fn render(&self, record: &SearchRecord) -> String {
        let field = |name: &str| record.text(name).unwrap_or_else(|| "N/A".to_string());
        let identifier = record
            .text(self.config.identifier_field())
            .or_else(|| record.text("id"))
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "[{identifier}]: Name: {}, Category: {}, Description: {}, Sizes: {}",
            field("name"),
            field("category"),
            field("description"),
            field("sizes"),
        )
    }
}
