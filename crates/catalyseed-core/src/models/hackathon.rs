use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ContentStatus;

/// Hackathon document. Shares the content-store counter semantics with
/// success stories and flows through the same share composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub organizer: String,
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub prize_pool: Option<String>,
    #[serde(default)]
    pub participants: i64,
    #[serde(default)]
    pub max_participants: i64,
    #[serde(default)]
    pub registration_deadline: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub share_count: i64,
    #[serde(default)]
    pub last_shared: Option<DateTime<Utc>>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
}

impl Hackathon {
    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }
}
