//! Store abstraction traits
//!
//! `DocumentStore` is the interface to the external document database.
//! Documents are schemaless JSON values keyed by collection and id; typed
//! repositories sit on top of this trait.

use async_trait::async_trait;
use catalyseed_core::AppError;
use serde_json::{Map, Value};
use thiserror::Error;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid store key: {0}")]
    InvalidKey(String),

    #[error("Corrupt document: {0}")]
    Corrupt(String),

    #[error("Field {field} is not a counter")]
    NotACounter { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(what),
            StoreError::UploadFailed(msg) => AppError::AssetUpload(msg),
            other => AppError::StoreWrite(other.to_string()),
        }
    }
}

/// Document store abstraction
///
/// Every call is a suspension point; nothing here blocks the caller
/// synchronously. Status filtering happens client-side on top of
/// `query_all`, mirroring how the production store is consumed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document, or `None` if absent.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Create or replace a document.
    async fn set(&self, collection: &str, id: &str, document: Value) -> StoreResult<()>;

    /// Merge the given fields into an existing document.
    ///
    /// Fails with `NotFound` if the document does not exist; partial fields
    /// never create a document implicitly.
    async fn update(&self, collection: &str, id: &str, fields: Map<String, Value>)
        -> StoreResult<()>;

    /// Apply a commutative delta to a numeric field and return the new value.
    ///
    /// This is the only way counters are mutated; it is atomic with respect
    /// to concurrent increments on the same field.
    async fn atomic_increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> StoreResult<i64>;

    /// All documents in a collection, unfiltered.
    async fn query_all(&self, collection: &str) -> StoreResult<Vec<Value>>;
}

/// Apply a delta to a JSON document field, treating a missing field as 0.
///
/// Shared by the store implementations so they agree on counter semantics.
pub(crate) fn increment_field(
    document: &mut Value,
    field: &str,
    delta: i64,
) -> StoreResult<i64> {
    let object = document
        .as_object_mut()
        .ok_or_else(|| StoreError::Corrupt("document is not an object".to_string()))?;
    let current = match object.get(field) {
        None | Some(Value::Null) => 0,
        Some(value) => value.as_i64().ok_or_else(|| StoreError::NotACounter {
            field: field.to_string(),
        })?,
    };
    let next = current + delta;
    object.insert(field.to_string(), Value::from(next));
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn increment_treats_missing_field_as_zero() {
        let mut doc = json!({"title": "x"});
        assert_eq!(increment_field(&mut doc, "likes", 1).unwrap(), 1);
        assert_eq!(doc["likes"], 1);
    }

    #[test]
    fn increment_applies_negative_delta() {
        let mut doc = json!({"likes": 3});
        assert_eq!(increment_field(&mut doc, "likes", -1).unwrap(), 2);
    }

    #[test]
    fn increment_rejects_non_numeric_field() {
        let mut doc = json!({"likes": "three"});
        assert!(matches!(
            increment_field(&mut doc, "likes", 1),
            Err(StoreError::NotACounter { .. })
        ));
    }

    #[test]
    fn store_errors_map_to_app_taxonomy() {
        let err: AppError = StoreError::UploadFailed("disk full".into()).into();
        assert!(matches!(err, AppError::AssetUpload(_)));
        let err: AppError = StoreError::WriteFailed("timeout".into()).into();
        assert!(matches!(err, AppError::StoreWrite(_)));
        let err: AppError = StoreError::NotFound("users/x".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
