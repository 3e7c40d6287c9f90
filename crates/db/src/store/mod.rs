//! Document persistence.
//!
//! A [`DocumentStore`] keeps JSON documents grouped in named collections and
//! keyed by [`DocId`]. It knows nothing about records or users; the
//! repositories layer typed semantics on top.

mod memory;
mod postgres;

use async_trait::async_trait;
use quizbank_core::types::DocId;
use serde_json::{Map, Value};

use crate::error::DbError;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Minimal document-store contract.
///
/// Writes are whole-document: [`replace`](Self::replace) overwrites the
/// stored body, so concurrent writers resolve as last-write-wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document under `id`.
    async fn insert(&self, collection: &str, id: DocId, doc: Value) -> Result<(), DbError>;

    async fn find_by_id(&self, collection: &str, id: DocId) -> Result<Option<Value>, DbError>;

    /// All documents of `collection` matching `filter`, in insertion order.
    async fn find_all(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, DbError>;

    /// Overwrite the document. Returns `false` if `id` is absent.
    async fn replace(&self, collection: &str, id: DocId, doc: Value) -> Result<bool, DbError>;

    /// Store a new document unless another document of `collection` matches
    /// `unique`. The check and the insert are atomic.
    ///
    /// Backends with their own constraints (the PostgreSQL unique index on
    /// usernames) also report a violation as [`WriteOutcome::Duplicate`].
    async fn insert_unique(
        &self,
        collection: &str,
        id: DocId,
        doc: Value,
        unique: &Filter,
    ) -> Result<WriteOutcome, DbError>;

    /// Overwrite the document unless a document with a different id matches
    /// `unique`. The check and the write are atomic.
    async fn replace_unique(
        &self,
        collection: &str,
        id: DocId,
        doc: Value,
        unique: &Filter,
    ) -> Result<WriteOutcome, DbError>;

    /// Remove the document. Returns `false` if `id` is absent.
    async fn delete(&self, collection: &str, id: DocId) -> Result<bool, DbError>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), DbError>;
}

/// Result of a write guarded by a uniqueness filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// No document with that id (replace only).
    Missing,
    /// Another document already matches the uniqueness filter.
    Duplicate,
}

/// Conjunction of top-level field equalities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Map<String, Value>,
}

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }

    /// The filter as a JSON object, suitable for JSONB containment (`@>`).
    pub fn to_json(&self) -> Value {
        Value::Object(self.conditions.clone())
    }
}
