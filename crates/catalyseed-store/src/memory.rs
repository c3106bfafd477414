//! In-memory document store, used in tests and local development.

use crate::traits::{increment_field, DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

/// In-memory document store.
///
/// Collections are maps of id to JSON document. Increments run under the
/// write lock, so they are atomic with respect to each other.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, document: Value) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
        let object = doc
            .as_object_mut()
            .ok_or_else(|| StoreError::Corrupt(format!("{}/{}", collection, id)))?;
        for (key, value) in fields {
            object.insert(key, value);
        }
        Ok(())
    }

    async fn atomic_increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> StoreResult<i64> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
        increment_field(doc, field, delta)
    }

    async fn query_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn set_get_roundtrip() {
        let store = MemoryDocumentStore::new();
        store
            .set("successStories", "a", json!({"likes": 0}))
            .await
            .unwrap();
        let doc = store.get("successStories", "a").await.unwrap().unwrap();
        assert_eq!(doc["likes"], 0);
        assert!(store.get("successStories", "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_without_dropping_fields() {
        let store = MemoryDocumentStore::new();
        store
            .set("users", "u", json!({"name": "Asha", "profileCompleted": false}))
            .await
            .unwrap();
        let mut fields = Map::new();
        fields.insert("profileCompleted".into(), Value::Bool(true));
        store.update("users", "u", fields).await.unwrap();
        let doc = store.get("users", "u").await.unwrap().unwrap();
        assert_eq!(doc["name"], "Asha");
        assert_eq!(doc["profileCompleted"], true);
    }

    #[tokio::test]
    async fn update_missing_document_fails() {
        let store = MemoryDocumentStore::new();
        let result = store.update("users", "ghost", Map::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn concurrent_increments_converge() {
        let store = Arc::new(MemoryDocumentStore::new());
        store
            .set("successStories", "s", json!({"shareCount": 0}))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .atomic_increment("successStories", "s", "shareCount", 1)
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let doc = store.get("successStories", "s").await.unwrap().unwrap();
        assert_eq!(doc["shareCount"], 50);
    }

    #[tokio::test]
    async fn like_unlike_returns_to_baseline_amid_other_increments() {
        let store = MemoryDocumentStore::new();
        store
            .set("successStories", "s", json!({"likes": 7}))
            .await
            .unwrap();

        // Our like, someone else's like, our unlike: deltas commute.
        store
            .atomic_increment("successStories", "s", "likes", 1)
            .await
            .unwrap();
        store
            .atomic_increment("successStories", "s", "likes", 1)
            .await
            .unwrap();
        store
            .atomic_increment("successStories", "s", "likes", -1)
            .await
            .unwrap();

        let doc = store.get("successStories", "s").await.unwrap().unwrap();
        assert_eq!(doc["likes"], 8);
    }
}
