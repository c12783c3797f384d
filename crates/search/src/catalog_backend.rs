use std::collections::BTreeSet;

use async_trait::async_trait;
use futures::StreamExt;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32String};
use order_menu::MenuDocument;
use serde_json::{Map, Value};

use crate::backend::{RecordStream, SearchBackend, SearchQuery, SearchRecord};
use crate::error::{Result, SearchError};

/// Fields every menu index exposes, whether or not a given document fills them.
const INDEX_FIELDS: &[&str] = &[
    "id",
    "name",
    "category",
    "description",
    "longDescription",
    "origin",
    "caffeineContent",
    "brewingMethod",
    "popularity",
    "sizes",
    "embedding",
];

/// Offline [`SearchBackend`] over the menu document, fuzzy-matched with nucleo.
///
/// Vector sub-queries and semantic ranking are ignored; results are ranked by the best
/// fuzzy score over name, category and description.
pub struct CatalogSearchBackend {
    records: Vec<Map<String, Value>>,
    schema: BTreeSet<String>,
}

impl CatalogSearchBackend {
    pub fn from_document(document: &MenuDocument) -> Self {
        let mut schema: BTreeSet<String> = INDEX_FIELDS.iter().map(|f| f.to_string()).collect();
        let mut records = Vec::new();

        for (category, item) in document.entries() {
            let Some(name) = item.name.as_deref().filter(|name| !name.is_empty()) else {
                continue;
            };
            let mut fields = item.fields.clone();
            fields.insert("name".to_string(), Value::String(name.to_string()));
            fields
                .entry("category".to_string())
                .or_insert_with(|| Value::String(category.trim().to_string()));
            fields
                .entry("id".to_string())
                .or_insert_with(|| Value::String(slug(name)));
            schema.extend(fields.keys().cloned());
            records.push(fields);
        }

        Self { records, schema }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn score(
        &self,
        pattern: &Pattern,
        matcher: &mut Matcher,
        record: &Map<String, Value>,
    ) -> Option<u32> {
        ["name", "category", "description"]
            .into_iter()
            .filter_map(|field| record.get(field).and_then(Value::as_str))
            .filter_map(|text| {
                let haystack = Utf32String::from(text);
                pattern.score(haystack.slice(..), matcher)
            })
            .max()
    }
}

fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[async_trait]
impl SearchBackend for CatalogSearchBackend {
    async fn search(&self, query: &SearchQuery) -> Result<RecordStream> {
        if let Some(unknown) = query.select.iter().find(|field| !self.schema.contains(*field)) {
            return Err(SearchError::FieldMismatch(unknown.clone()));
        }

        let pattern = Pattern::parse(&query.text, CaseMatching::Ignore, Normalization::Smart);
        let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

        let mut scored: Vec<(usize, u32)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| Some((idx, self.score(&pattern, &mut matcher, record)?)))
            .collect();
        // Stable sort keeps document order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(query.top);

        let hits: Vec<Result<SearchRecord>> = scored
            .into_iter()
            .map(|(idx, _)| {
                let record = &self.records[idx];
                let projected: Map<String, Value> = query
                    .select
                    .iter()
                    .filter_map(|field| Some((field.clone(), record.get(field)?.clone())))
                    .collect();
                Ok(SearchRecord::new(projected))
            })
            .collect();

        Ok(futures::stream::iter(hits).boxed())
    }
}
