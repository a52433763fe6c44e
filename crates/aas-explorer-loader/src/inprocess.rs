//! In-process fetcher backed by a fixed document map.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::{FetchError, RecordFetcher};

/// Serves documents from memory, keyed by the full joined URL. Used by tests
/// and demos in place of [`HttpFetcher`](crate::HttpFetcher).
#[derive(Debug, Clone, Default)]
pub struct InProcessFetcher {
    documents: HashMap<String, Value>,
}

impl InProcessFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, document: Value) {
        self.documents.insert(url.into(), document);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_document(mut self, url: impl Into<String>, document: Value) -> Self {
        self.insert(url, document);
        self
    }
}

#[async_trait]
impl RecordFetcher for InProcessFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                path: url.to_string(),
            })
    }
}
