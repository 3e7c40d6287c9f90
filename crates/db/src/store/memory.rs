use std::collections::HashMap;

use async_trait::async_trait;
use quizbank_core::types::DocId;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentStore, Filter, WriteOutcome};
use crate::error::DbError;

/// Process-local store backed by ordered vectors per collection.
///
/// Used when no database is configured and throughout the test suites.
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc`.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(DocId, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, id: DocId, doc: Value) -> Result<(), DbError> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push((id, doc));
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: DocId) -> Result<Option<Value>, DbError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| *doc_id == id))
            .map(|(_, doc)| doc.clone()))
    }

    async fn find_all(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, DbError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| filter.matches(doc))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace(&self, collection: &str, id: DocId, doc: Value) -> Result<bool, DbError> {
        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| *doc_id == id));
        match slot {
            Some((_, stored)) => {
                *stored = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_unique(
        &self,
        collection: &str,
        id: DocId,
        doc: Value,
        unique: &Filter,
    ) -> Result<WriteOutcome, DbError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|(_, existing)| unique.matches(existing)) {
            return Ok(WriteOutcome::Duplicate);
        }
        docs.push((id, doc));
        Ok(WriteOutcome::Written)
    }

    async fn replace_unique(
        &self,
        collection: &str,
        id: DocId,
        doc: Value,
        unique: &Filter,
    ) -> Result<WriteOutcome, DbError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(WriteOutcome::Missing);
        };
        if docs
            .iter()
            .any(|(doc_id, existing)| *doc_id != id && unique.matches(existing))
        {
            return Ok(WriteOutcome::Duplicate);
        }
        match docs.iter_mut().find(|(doc_id, _)| *doc_id == id) {
            Some((_, stored)) => {
                *stored = doc;
                Ok(WriteOutcome::Written)
            }
            None => Ok(WriteOutcome::Missing),
        }
    }

    async fn delete(&self, collection: &str, id: DocId) -> Result<bool, DbError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|(doc_id, _)| *doc_id != id);
        Ok(docs.len() < before)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
