use catalyseed_core::constants::{HACKATHONS_COLLECTION, STORIES_COLLECTION};
use catalyseed_core::models::{Hackathon, SuccessStory};

use crate::slug::slug_or;

/// A label/value pair rendered in the stats block of a share card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

impl StatLine {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// A flattened, already-defaulted view of a piece of content for sharing.
///
/// Building a target fills in every fallback ("Unknown Location" and
/// friends) once, so the URL builder, blurb formatter and renderer never
/// have to handle missing fields themselves.
#[derive(Debug, Clone)]
pub struct ShareTarget {
    pub id: String,
    /// Path segment under the site base URL, e.g. `success-stories`.
    pub url_path: &'static str,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub stats: Vec<StatLine>,
    pub thumbnail_url: Option<String>,
    pub hashtags: Vec<String>,
    pub slug: String,
    pub(crate) file_stem: &'static str,
}

impl ShareTarget {
    /// Suggested download name for the rendered card.
    pub fn image_file_name(&self) -> String {
        format!("{}-{}.png", self.file_stem, self.slug)
    }
}

/// Content that can be turned into a share card and counted against.
pub trait Shareable {
    fn collection(&self) -> &'static str;
    fn share_id(&self) -> String;
    fn share_target(&self) -> ShareTarget;
}

fn non_empty(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn non_empty_opt(value: Option<&str>, fallback: &str) -> String {
    non_empty(value.unwrap_or(""), fallback)
}

impl Shareable for SuccessStory {
    fn collection(&self) -> &'static str {
        STORIES_COLLECTION
    }

    fn share_id(&self) -> String {
        self.id.to_string()
    }

    fn share_target(&self) -> ShareTarget {
        let title = non_empty(&self.company_startup_name, "Untitled Startup");
        let innovator = non_empty(&self.innovator_name, "Unknown");
        let institute = non_empty(&self.student_alumni_of, "Unknown Institute");
        let location = self
            .business_address
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown Location")
            .to_string();
        let thumbnail_url = self
            .product_service_pictures
            .iter()
            .chain(self.inventor_photo.iter())
            .find(|u| !u.trim().is_empty())
            .cloned();

        ShareTarget {
            id: self.id.to_string(),
            url_path: "success-stories",
            subtitle: format!("by {innovator} | {institute}"),
            description: non_empty(&self.about_startup, "No description available"),
            stats: vec![
                StatLine::new("Location", location),
                StatLine::new("Category", self.innovation_category.label()),
                StatLine::new("Stage", non_empty(&self.current_stage, "Unknown Stage")),
                StatLine::new("Founded", non_empty(&self.year_of_innovation, "Unknown")),
            ],
            thumbnail_url,
            hashtags: vec![
                "TamilNaduStartups".to_string(),
                "Innovation".to_string(),
                "Entrepreneurship".to_string(),
                self.innovation_category.hashtag(),
            ],
            slug: slug_or(&title, "story"),
            file_stem: "catalyseed-story",
            title,
        }
    }
}

impl Shareable for Hackathon {
    fn collection(&self) -> &'static str {
        HACKATHONS_COLLECTION
    }

    fn share_id(&self) -> String {
        self.id.to_string()
    }

    fn share_target(&self) -> ShareTarget {
        let title = non_empty(&self.title, "Untitled Event");
        let organizer = non_empty(&self.organizer, "Unknown Organizer");
        let location = non_empty(&self.location, "Unknown Location");

        ShareTarget {
            id: self.id.to_string(),
            url_path: "hackathons",
            subtitle: format!("by {organizer} | {location}"),
            description: non_empty(&self.description, "No description available"),
            stats: vec![
                StatLine::new("Date", non_empty(&self.date, "TBA")),
                StatLine::new("Location", location.clone()),
                StatLine::new(
                    "Prize Pool",
                    non_empty_opt(self.prize_pool.as_deref(), "TBA"),
                ),
                StatLine::new("Participants", self.participants.to_string()),
            ],
            thumbnail_url: self.image.clone().filter(|u| !u.trim().is_empty()),
            hashtags: vec![
                "TamilNaduHackathon".to_string(),
                "Innovation".to_string(),
                "TechEvent".to_string(),
            ],
            slug: slug_or(&title, "event"),
            file_stem: "catalyseed-hackathon",
            title,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use catalyseed_core::models::{
        ContentStatus, Hackathon, InnovationCategory, Scorecard, SuccessStory,
    };
    use chrono::Utc;
    use uuid::Uuid;

    pub fn story() -> SuccessStory {
        let author = Uuid::new_v4();
        SuccessStory {
            id: Uuid::new_v4(),
            innovator_name: "Asha Raman".to_string(),
            mobile: "9840000000".to_string(),
            email: "asha@greencell.example".to_string(),
            web_address: None,
            linkedin_profile: None,
            innovation_category: InnovationCategory::AgriTech,
            year_of_innovation: "2021".to_string(),
            edited_by: None,
            ai_verdict: None,
            inventor_photo: None,
            product_service_pictures: Vec::new(),
            about_startup: "Solar microgrids for rural farms.".to_string(),
            current_stage: "Seed".to_string(),
            fund_raised_details: None,
            team_details: "Four co-founders".to_string(),
            student_alumni_of: "Anna University".to_string(),
            year_or_batch: "2019".to_string(),
            business_address: "Chennai, Tamil Nadu, India".to_string(),
            company_startup_name: "GreenCell Energy".to_string(),
            product_service_name: "GreenCell Grid".to_string(),
            customer_segment: None,
            looking_for_investor: false,
            investment_range: None,
            mentor_connect: false,
            mentor_domain_details: None,
            tags: Vec::new(),
            scorecard: Scorecard::default(),
            total_score: 0,
            likes: 0,
            share_count: 0,
            last_shared: None,
            status: ContentStatus::Published,
            created_at: Utc::now(),
            created_by: author,
            updated_at: Utc::now(),
            updated_by: author,
        }
    }

    pub fn hackathon() -> Hackathon {
        Hackathon {
            id: Uuid::new_v4(),
            title: "Code for Chennai".to_string(),
            description: "48h civic hackathon.".to_string(),
            organizer: "IIT Madras".to_string(),
            date: "2026-09-12".to_string(),
            location: "Chennai".to_string(),
            prize_pool: None,
            participants: 240,
            max_participants: 400,
            registration_deadline: None,
            image: None,
            tags: Vec::new(),
            likes: 0,
            share_count: 0,
            last_shared: None,
            status: ContentStatus::Published,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{hackathon, story};
    use super::*;

    #[test]
    fn story_target_fills_fields() {
        let target = story().share_target();
        assert_eq!(target.title, "GreenCell Energy");
        assert_eq!(target.subtitle, "by Asha Raman | Anna University");
        assert_eq!(target.slug, "greencell-energy");
        assert_eq!(target.stats[0], StatLine::new("Location", "Chennai"));
        assert_eq!(
            target.image_file_name(),
            "catalyseed-story-greencell-energy.png"
        );
    }

    #[test]
    fn story_target_defaults_missing_fields() {
        let mut s = story();
        s.company_startup_name = String::new();
        s.about_startup = "   ".to_string();
        s.business_address = String::new();
        let target = s.share_target();
        assert_eq!(target.title, "Untitled Startup");
        assert_eq!(target.description, "No description available");
        assert_eq!(target.stats[0].value, "Unknown Location");
        assert_eq!(target.slug, "untitled-startup");
        assert!(target.thumbnail_url.is_none());
    }

    #[test]
    fn story_thumbnail_prefers_product_pictures() {
        let mut s = story();
        s.inventor_photo = Some("https://img.example/photo.jpg".to_string());
        s.product_service_pictures = vec!["https://img.example/product.jpg".to_string()];
        let target = s.share_target();
        assert_eq!(
            target.thumbnail_url.as_deref(),
            Some("https://img.example/product.jpg")
        );
    }

    #[test]
    fn story_hashtags_include_category() {
        let target = story().share_target();
        assert_eq!(
            target.hashtags,
            vec!["TamilNaduStartups", "Innovation", "Entrepreneurship", "AgriTech"]
        );
    }

    #[test]
    fn hackathon_target() {
        let target = hackathon().share_target();
        assert_eq!(target.url_path, "hackathons");
        assert_eq!(target.slug, "code-for-chennai");
        assert_eq!(target.stats[2], StatLine::new("Prize Pool", "TBA"));
        assert_eq!(
            target.image_file_name(),
            "catalyseed-hackathon-code-for-chennai.png"
        );
    }
}
