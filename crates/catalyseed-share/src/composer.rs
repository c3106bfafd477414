use std::collections::HashSet;
use std::sync::Arc;

use catalyseed_core::AppError;
use catalyseed_store::DocumentStore;
use chrono::Utc;
use serde_json::Map;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::platform::SharePlatform;
use crate::target::Shareable;
use crate::url::ShareUrlBuilder;

/// Opens a platform share intent. Production code logs or launches a
/// browser; tests record the URL.
pub trait IntentLauncher: Send + Sync {
    fn open(&self, url: &str);
}

/// Result of a like toggle: new state plus the store's counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub liked: bool,
    pub likes: i64,
}

/// Drives the share flow: canonical URL, platform intent, and the
/// share/like counters on the backing document.
///
/// Likes are tracked per composer instance in a session-local set; there
/// is no per-user like record in the store, so a fresh session can like
/// again. The set is only mutated after the store increment succeeds.
pub struct ShareComposer {
    store: Arc<dyn DocumentStore>,
    urls: ShareUrlBuilder,
    launcher: Arc<dyn IntentLauncher>,
    liked: Mutex<HashSet<String>>,
}

impl ShareComposer {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        urls: ShareUrlBuilder,
        launcher: Arc<dyn IntentLauncher>,
    ) -> Self {
        Self {
            store,
            urls,
            launcher,
            liked: Mutex::new(HashSet::new()),
        }
    }

    /// Canonical share URL for an item.
    pub fn share_url<T: Shareable>(&self, item: &T) -> String {
        self.urls.build(&item.share_target())
    }

    /// Opens the platform's share dialog and records the share.
    ///
    /// An unknown platform name is a no-op: nothing opens and no counter
    /// moves. Returns the platform that was actually used.
    pub async fn share_to_platform<T: Shareable>(
        &self,
        item: &T,
        platform: &str,
    ) -> Result<Option<SharePlatform>, AppError> {
        let Some(platform) = SharePlatform::parse(platform) else {
            warn!(%platform, "unknown share platform, ignoring");
            return Ok(None);
        };
        let target = item.share_target();
        let share_url = self.urls.build(&target);
        let intent = platform.intent_url(&target, &share_url);
        self.launcher.open(&intent);
        self.record_share(item).await?;
        Ok(Some(platform))
    }

    /// Bumps the share counter and stamps `lastShared`.
    ///
    /// The counter moves first via an atomic increment; the timestamp is
    /// a separate merge. A timestamp that lags a concurrent share is
    /// acceptable, a lost count is not.
    pub async fn record_share<T: Shareable>(&self, item: &T) -> Result<i64, AppError> {
        let collection = item.collection();
        let id = item.share_id();
        let count = self
            .store
            .atomic_increment(collection, &id, "shareCount", 1)
            .await?;
        let mut fields = Map::new();
        fields.insert(
            "lastShared".to_string(),
            serde_json::to_value(Utc::now()).map_err(|e| AppError::Internal(e.to_string()))?,
        );
        self.store.update(collection, &id, fields).await?;
        info!(collection, %id, count, "share recorded");
        Ok(count)
    }

    /// Toggles this session's like for an item.
    ///
    /// The delta is chosen from the session-local set, sent as an atomic
    /// increment, and the set is updated only once the store confirms.
    pub async fn toggle_like<T: Shareable>(&self, item: &T) -> Result<LikeOutcome, AppError> {
        let collection = item.collection();
        let id = item.share_id();
        let was_liked = self.liked.lock().await.contains(&id);
        let delta = if was_liked { -1 } else { 1 };
        let likes = self
            .store
            .atomic_increment(collection, &id, "likes", delta)
            .await?;
        let mut liked = self.liked.lock().await;
        if was_liked {
            liked.remove(&id);
        } else {
            liked.insert(id);
        }
        Ok(LikeOutcome {
            liked: !was_liked,
            likes,
        })
    }

    /// Whether this session has liked the item.
    pub async fn is_liked<T: Shareable>(&self, item: &T) -> bool {
        self.liked.lock().await.contains(&item.share_id())
    }
}
