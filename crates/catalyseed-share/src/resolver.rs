use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use catalyseed_core::AppError;

/// Fetches the raw bytes behind an asset reference.
///
/// The renderer resolves every asset through this trait before it starts
/// drawing, so the drawing pass itself stays synchronous.
#[async_trait]
pub trait AssetResolver: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError>;
}

/// Resolver for production use: `http(s)` URLs go through reqwest, any
/// other reference is treated as a local file path.
pub struct HttpAssetResolver {
    client: reqwest::Client,
}

impl HttpAssetResolver {
    pub fn new(timeout_secs: u64) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("http client init failed: {e}")))?;
        Ok(Self { client })
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ImageRender(format!("asset fetch failed for {url}: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::ImageRender(format!(
                "asset fetch for {url} returned {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ImageRender(format!("asset body read failed for {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AssetResolver for HttpAssetResolver {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            self.fetch_http(url).await
        } else {
            tokio::fs::read(url)
                .await
                .map_err(|e| AppError::ImageRender(format!("asset read failed for {url}: {e}")))
        }
    }
}

/// In-memory resolver keyed by URL. Used in tests and for offline
/// rendering of pre-fetched assets.
#[derive(Default)]
pub struct StaticAssetResolver {
    assets: HashMap<String, Vec<u8>>,
}

impl StaticAssetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.assets.insert(url.into(), bytes);
        self
    }
}

#[async_trait]
impl AssetResolver for StaticAssetResolver {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::ImageRender(format!("no asset registered for {url}")))
    }
}
