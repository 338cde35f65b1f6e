use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::document::Document;
use crate::query::Query;
use crate::subscription::Subscription;

/// Document store operation error.
///
/// These are **transport/infrastructure** failures as reported by the
/// backend. There is no local retry or backoff policy: callers either
/// surface the error or record it and keep their prior state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },
}

impl StoreError {
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

/// Collection-based document store (the hosted backend boundary).
///
/// ## Read semantics
///
/// `get_all` is a **snapshot read**: a one-time fetch of the documents
/// matching the query at the moment of the call. `watch` is a **live
/// subscription**: the store delivers a fresh matching snapshot on every
/// change to the collection (including one delivery for the state at
/// subscribe time, so subscribers need no separate initial fetch).
///
/// ## Write semantics
///
/// `update_fields` is a partial update: the given fields are merged into
/// the existing document, other fields are untouched. There are no
/// transactions — concurrent writers to the same document race and the
/// backend's last write wins.
///
/// ## Thread safety
///
/// The trait requires `Send + Sync`; the dashboard itself mutates its state
/// from a single task, but store handles are shared.
pub trait DocumentStore: Send + Sync {
    /// Snapshot of all documents matching `query`.
    fn get_all(&self, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Point read of one document.
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Create or replace a document.
    fn set(&self, collection: &str, id: &str, data: JsonValue) -> Result<(), StoreError>;

    /// Merge `fields` into an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] when the document does not exist.
    fn update_fields(&self, collection: &str, id: &str, fields: JsonValue)
    -> Result<(), StoreError>;

    /// Subscribe to `query`; each delivery is a full matching snapshot.
    ///
    /// Dropping the returned subscription cancels it.
    fn watch(&self, query: &Query) -> Subscription<Vec<Document>>;
}

impl<S> DocumentStore for &S
where
    S: DocumentStore + ?Sized,
{
    fn get_all(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        (**self).get_all(query)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        (**self).get(collection, id)
    }

    fn set(&self, collection: &str, id: &str, data: JsonValue) -> Result<(), StoreError> {
        (**self).set(collection, id, data)
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: JsonValue,
    ) -> Result<(), StoreError> {
        (**self).update_fields(collection, id, fields)
    }

    fn watch(&self, query: &Query) -> Subscription<Vec<Document>> {
        (**self).watch(query)
    }
}

impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    fn get_all(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        (**self).get_all(query)
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        (**self).get(collection, id)
    }

    fn set(&self, collection: &str, id: &str, data: JsonValue) -> Result<(), StoreError> {
        (**self).set(collection, id, data)
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: JsonValue,
    ) -> Result<(), StoreError> {
        (**self).update_fields(collection, id, fields)
    }

    fn watch(&self, query: &Query) -> Subscription<Vec<Document>> {
        (**self).watch(query)
    }
}
