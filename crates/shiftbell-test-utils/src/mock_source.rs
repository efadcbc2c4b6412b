// SPDX-FileCopyrightText: 2026 Shiftbell Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document source.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shiftbell_core::{
    AdapterType, DocumentRef, DocumentSource, HealthStatus, PluginAdapter, ShiftbellError,
};

/// Serves documents inserted with [`MockSource::insert`]; anything else is
/// reported as not found.
#[derive(Default)]
pub struct MockSource {
    documents: Mutex<HashMap<DocumentRef, Vec<u8>>>,
    fetches: Mutex<Vec<DocumentRef>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, doc: DocumentRef, contents: impl Into<Vec<u8>>) {
        self.documents.lock().await.insert(doc, contents.into());
    }

    /// Every reference passed to `fetch()`, in call order.
    pub async fn fetches(&self) -> Vec<DocumentRef> {
        self.fetches.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockSource {
    fn name(&self) -> &str {
        "mock-source"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Source
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftbellError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), ShiftbellError> {
        Ok(())
    }
}

#[async_trait]
impl DocumentSource for MockSource {
    async fn fetch(&self, doc: &DocumentRef) -> Result<Vec<u8>, ShiftbellError> {
        self.fetches.lock().await.push(doc.clone());
        self.documents
            .lock()
            .await
            .get(doc)
            .cloned()
            .ok_or_else(|| ShiftbellError::Retrieval {
                message: format!("document `{doc}` not found"),
                source: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_inserted_documents_only() {
        let source = MockSource::new();
        let doc = DocumentRef::new("shifts", "a.json");
        source.insert(doc.clone(), "{}").await;

        assert_eq!(source.fetch(&doc).await.unwrap(), b"{}");
        let err = source
            .fetch(&DocumentRef::new("shifts", "b.json"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "retrieval");
        assert_eq!(source.fetches().await.len(), 2);
    }
}
