//! Blob storage abstraction
//!
//! Uploaded photos land here before their public URLs are written into
//! content documents. Keys are prefixed per feature, e.g.
//! `success-stories/inventor-photos/{timestamp}_{filename}`.

use crate::traits::{StoreError, StoreResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Blob storage abstraction
///
/// Upload a file, get back the publicly accessible URL to store in a
/// document. No other operations are needed by this core; deletion is an
/// external concern.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn upload(&self, key: &str, data: Vec<u8>) -> StoreResult<String>;
}

/// Build a collision-resistant blob key under a feature prefix.
///
/// Mirrors the store layout the platform launched with:
/// `{prefix}/{millis}_{filename}`.
pub fn blob_key(prefix: &str, filename: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{}/{}_{}", prefix.trim_matches('/'), millis, filename)
}

/// Local filesystem blob storage implementation
#[derive(Clone)]
pub struct LocalBlobStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalBlobStorage {
    /// Create a new LocalBlobStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for blob storage
    /// * `base_url` - Base URL under which blobs are served
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StoreResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StoreError::ConfigError(format!(
                "Failed to create blob directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStorage {
            base_path,
            base_url,
        })
    }

    /// Convert a blob key to a filesystem path, rejecting traversal.
    fn key_to_path(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn upload(&self, key: &str, data: Vec<u8>) -> StoreResult<String> {
        let path = self.key_to_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::UploadFailed(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to create {}: {}", path.display(), e))
        })?;
        file.write_all(&data).await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to write {}: {}", path.display(), e))
        })?;
        file.sync_all().await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to sync {}: {}", path.display(), e))
        })?;

        tracing::debug!(key = %key, bytes = data.len(), "Blob uploaded");
        Ok(self.public_url(key))
    }
}
