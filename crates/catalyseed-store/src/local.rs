//! Local filesystem document store.
//!
//! One JSON file per document under `{base}/{collection}/{id}.json`. Writes
//! and increments serialize behind a single mutex, which is what makes
//! `atomic_increment` atomic for this backend.

use crate::traits::{increment_field, DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Local filesystem document store implementation
pub struct LocalDocumentStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalDocumentStore {
    /// Create a new LocalDocumentStore rooted at `base_path`.
    pub async fn new(base_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StoreError::ConfigError(format!(
                "Failed to create store directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalDocumentStore {
            base_path,
            write_lock: Mutex::new(()),
        })
    }

    /// Validate a collection or id path segment.
    ///
    /// Segments become file names, so traversal sequences and separators
    /// must never reach the filesystem layer.
    fn validate_segment(segment: &str) -> StoreResult<()> {
        if segment.is_empty()
            || segment.contains("..")
            || segment.contains('/')
            || segment.contains('\\')
        {
            return Err(StoreError::InvalidKey(segment.to_string()));
        }
        Ok(())
    }

    fn document_path(&self, collection: &str, id: &str) -> StoreResult<PathBuf> {
        Self::validate_segment(collection)?;
        Self::validate_segment(id)?;
        Ok(self
            .base_path
            .join(collection)
            .join(format!("{}.json", id)))
    }

    async fn read_document(&self, path: &Path) -> StoreResult<Option<Value>> {
        match fs::read(path).await {
            Ok(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))?;
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(format!("{}: {}", path.display(), e))),
        }
    }

    async fn write_document(&self, path: &Path, document: &Value) -> StoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let mut file = fs::File::create(path).await.map_err(|e| {
            StoreError::WriteFailed(format!("Failed to create {}: {}", path.display(), e))
        })?;
        file.write_all(&bytes).await.map_err(|e| {
            StoreError::WriteFailed(format!("Failed to write {}: {}", path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StoreError::WriteFailed(format!("Failed to sync {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let path = self.document_path(collection, id)?;
        self.read_document(&path).await
    }

    async fn set(&self, collection: &str, id: &str, document: Value) -> StoreResult<()> {
        let path = self.document_path(collection, id)?;
        let _guard = self.write_lock.lock().await;
        self.write_document(&path, &document).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        let path = self.document_path(collection, id)?;
        let _guard = self.write_lock.lock().await;
        let mut document = self
            .read_document(&path)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
        let object = document
            .as_object_mut()
            .ok_or_else(|| StoreError::Corrupt(format!("{}/{}", collection, id)))?;
        for (key, value) in fields {
            object.insert(key, value);
        }
        self.write_document(&path, &document).await
    }

    async fn atomic_increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> StoreResult<i64> {
        let path = self.document_path(collection, id)?;
        // The read-modify-write runs entirely under the store mutex; callers
        // see the same atomic-delta semantics as the managed backend.
        let _guard = self.write_lock.lock().await;
        let mut document = self
            .read_document(&path)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
        let next = increment_field(&mut document, field, delta)?;
        self.write_document(&path, &document).await?;
        Ok(next)
    }

    async fn query_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        Self::validate_segment(collection)?;
        let dir = self.base_path.join(collection);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::ReadFailed(format!("{}: {}", dir.display(), e))),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read_document(&path).await? {
                Some(document) => documents.push(document),
                None => continue,
            }
        }
        Ok(documents)
    }
}
