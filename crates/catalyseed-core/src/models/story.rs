use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Scorecard;

/// Categorical tag for a story's innovation area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InnovationCategory {
    EdTech,
    FinTech,
    AgriTech,
    DeepTech,
    Robotics,
    #[serde(rename = "Waste Management")]
    WasteManagement,
    #[serde(rename = "Pink Zone")]
    PinkZone,
    #[serde(rename = "Campus Startups")]
    CampusStartups,
    Other,
}

impl InnovationCategory {
    pub fn label(self) -> &'static str {
        match self {
            InnovationCategory::EdTech => "EdTech",
            InnovationCategory::FinTech => "FinTech",
            InnovationCategory::AgriTech => "AgriTech",
            InnovationCategory::DeepTech => "DeepTech",
            InnovationCategory::Robotics => "Robotics",
            InnovationCategory::WasteManagement => "Waste Management",
            InnovationCategory::PinkZone => "Pink Zone",
            InnovationCategory::CampusStartups => "Campus Startups",
            InnovationCategory::Other => "Other",
        }
    }

    /// Label with whitespace removed, suitable for a hashtag.
    pub fn hashtag(self) -> String {
        self.label().split_whitespace().collect()
    }
}

impl fmt::Display for InnovationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visibility gate for content documents. All read paths filter to
/// `Published`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Published,
    Pending,
    Rejected,
}

/// Success story document as persisted in the store.
///
/// Invariant: `total_score` always equals `scorecard.total()`. Persist paths
/// recompute it in the same update; it is never edited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStory {
    pub id: Uuid,
    pub innovator_name: String,
    pub mobile: String,
    pub email: String,
    #[serde(default)]
    pub web_address: Option<String>,
    #[serde(default)]
    pub linkedin_profile: Option<String>,
    pub innovation_category: InnovationCategory,
    pub year_of_innovation: String,
    #[serde(default)]
    pub edited_by: Option<String>,
    #[serde(default)]
    pub ai_verdict: Option<String>,
    #[serde(default)]
    pub inventor_photo: Option<String>,
    #[serde(default)]
    pub product_service_pictures: Vec<String>,
    pub about_startup: String,
    pub current_stage: String,
    #[serde(default)]
    pub fund_raised_details: Option<String>,
    #[serde(default)]
    pub team_details: String,
    pub student_alumni_of: String,
    pub year_or_batch: String,
    pub business_address: String,
    pub company_startup_name: String,
    pub product_service_name: String,
    #[serde(default)]
    pub customer_segment: Option<String>,
    #[serde(default)]
    pub looking_for_investor: bool,
    #[serde(default)]
    pub investment_range: Option<String>,
    #[serde(default)]
    pub mentor_connect: bool,
    #[serde(default)]
    pub mentor_domain_details: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub scorecard: Scorecard,
    pub total_score: u8,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub share_count: i64,
    #[serde(default)]
    pub last_shared: Option<DateTime<Utc>>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl SuccessStory {
    /// Whether the document is visible to public read paths.
    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }
}
