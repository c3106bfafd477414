use std::marker::PhantomData;
use std::sync::Arc;

use catalyseed_core::constants::{HACKATHONS_COLLECTION, STORIES_COLLECTION};
use catalyseed_core::models::{Hackathon, SuccessStory};
use catalyseed_core::AppError;
use catalyseed_store::DocumentStore;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;
use tracing::warn;

/// A typed document living in a named store collection.
pub trait ContentDocument: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn doc_id(&self) -> String;
    fn is_published(&self) -> bool;

    /// Repair invariants on a freshly deserialized document. Runs on
    /// every read path, so callers never see values an older or external
    /// writer left out of range.
    fn hydrated(self) -> Self
    where
        Self: Sized,
    {
        self
    }
}

impl ContentDocument for SuccessStory {
    const COLLECTION: &'static str = STORIES_COLLECTION;

    fn doc_id(&self) -> String {
        self.id.to_string()
    }

    fn is_published(&self) -> bool {
        SuccessStory::is_published(self)
    }

    fn hydrated(mut self) -> Self {
        self.scorecard = self.scorecard.normalized();
        self.total_score = self.scorecard.total();
        self
    }
}

impl ContentDocument for Hackathon {
    const COLLECTION: &'static str = HACKATHONS_COLLECTION;

    fn doc_id(&self) -> String {
        self.id.to_string()
    }

    fn is_published(&self) -> bool {
        Hackathon::is_published(self)
    }
}

/// Typed view over one collection of the document store.
///
/// Reads tolerate individual corrupt documents: a document that fails to
/// deserialize is logged and skipped on list, and surfaced as an
/// internal error on a direct get.
pub struct ContentRepository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ContentDocument> ContentRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>, AppError> {
        let Some(value) = self.store.get(T::COLLECTION, id).await? else {
            return Ok(None);
        };
        let doc: T = serde_json::from_value(value).map_err(|e| {
            AppError::Internal(format!("corrupt document {}/{id}: {e}", T::COLLECTION))
        })?;
        Ok(Some(doc.hydrated()))
    }

    /// All published documents in the collection. Status filtering is
    /// client-side on top of `query_all`.
    pub async fn list_published(&self) -> Result<Vec<T>, AppError> {
        let values = self.store.query_all(T::COLLECTION).await?;
        let mut docs = Vec::with_capacity(values.len());
        for value in values {
            match serde_json::from_value::<T>(value) {
                Ok(doc) if doc.is_published() => docs.push(doc.hydrated()),
                Ok(_) => {}
                Err(error) => {
                    warn!(collection = T::COLLECTION, %error, "skipping corrupt document");
                }
            }
        }
        Ok(docs)
    }

    /// Create or replace the full document.
    pub async fn upsert(&self, doc: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(doc)
            .map_err(|e| AppError::Internal(format!("serialize failed: {e}")))?;
        self.store.set(T::COLLECTION, &doc.doc_id(), value).await?;
        Ok(())
    }

    /// Atomically adjust the like counter and return the new value.
    pub async fn increment_likes(&self, id: &str, delta: i64) -> Result<i64, AppError> {
        let likes = self
            .store
            .atomic_increment(T::COLLECTION, id, "likes", delta)
            .await?;
        Ok(likes)
    }

    /// Bump the share counter and stamp `lastShared`. The counter moves
    /// first; a stale timestamp under concurrency is acceptable.
    pub async fn record_share(&self, id: &str) -> Result<i64, AppError> {
        let count = self
            .store
            .atomic_increment(T::COLLECTION, id, "shareCount", 1)
            .await?;
        let mut fields = Map::new();
        fields.insert(
            "lastShared".to_string(),
            serde_json::to_value(Utc::now()).map_err(|e| AppError::Internal(e.to_string()))?,
        );
        self.store.update(T::COLLECTION, id, fields).await?;
        Ok(count)
    }
}
