use std::sync::Arc;

use catalyseed_core::models::{ContentStatus, SuccessStory};
use catalyseed_core::AppError;
use catalyseed_store::{blob_key, BlobStorage, DocumentStore};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::draft::StoryDraft;
use crate::repository::ContentRepository;

/// Blob prefix for story photos.
const PHOTO_PREFIX: &str = "success-stories";

/// A photo picked in the form but not yet uploaded.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Drives the admin story form: validation, photo upload, and the final
/// document write.
pub struct StoryAdmin {
    repo: ContentRepository<SuccessStory>,
    blobs: Arc<dyn BlobStorage>,
}

impl StoryAdmin {
    pub fn new(store: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStorage>) -> Self {
        Self {
            repo: ContentRepository::new(store),
            blobs,
        }
    }

    pub fn repository(&self) -> &ContentRepository<SuccessStory> {
        &self.repo
    }

    /// Validates and persists a draft, uploading any new photos first.
    ///
    /// Uploads happen before the document write so a failed upload never
    /// leaves a document pointing at a missing asset. On edit, likes,
    /// share count, last-shared and creation metadata are carried over
    /// from the stored document; the form never overwrites them. Both
    /// create and edit persist with `published` status, and the total
    /// score is rederived from the clamped scorecard in the same write.
    pub async fn submit(
        &self,
        draft: StoryDraft,
        new_pictures: Vec<PhotoUpload>,
        new_inventor_photo: Option<PhotoUpload>,
        editor: Uuid,
    ) -> Result<SuccessStory, AppError> {
        draft.ensure_valid()?;

        let mut pictures = draft.retained_pictures.clone();
        for upload in new_pictures {
            pictures.push(self.upload_photo(upload).await?);
        }
        let inventor_photo = match new_inventor_photo {
            Some(upload) => Some(self.upload_photo(upload).await?),
            None => draft.inventor_photo.clone(),
        };

        let existing = match draft.id {
            Some(id) => Some(self.repo.get(&id.to_string()).await?.ok_or_else(|| {
                AppError::NotFound(format!("successStories/{id}"))
            })?),
            None => None,
        };

        let now = Utc::now();
        let scorecard = draft.scorecard();
        let story = SuccessStory {
            id: draft.id.unwrap_or_else(Uuid::new_v4),
            innovator_name: draft.innovator_name,
            mobile: draft.mobile,
            email: draft.email,
            web_address: draft.web_address,
            linkedin_profile: draft.linkedin_profile,
            innovation_category: draft.innovation_category,
            year_of_innovation: draft.year_of_innovation,
            edited_by: existing.as_ref().and_then(|e| e.edited_by.clone()),
            ai_verdict: draft.ai_verdict,
            inventor_photo,
            product_service_pictures: pictures,
            about_startup: draft.about_startup,
            current_stage: draft.current_stage,
            fund_raised_details: draft.fund_raised_details,
            team_details: draft.team_details,
            student_alumni_of: draft.student_alumni_of,
            year_or_batch: draft.year_or_batch,
            business_address: draft.business_address,
            company_startup_name: draft.company_startup_name,
            product_service_name: draft.product_service_name,
            customer_segment: draft.customer_segment,
            looking_for_investor: draft.looking_for_investor,
            investment_range: draft.investment_range,
            mentor_connect: draft.mentor_connect,
            mentor_domain_details: draft.mentor_domain_details,
            tags: draft.tags,
            total_score: scorecard.total(),
            scorecard,
            likes: existing.as_ref().map_or(0, |e| e.likes),
            share_count: existing.as_ref().map_or(0, |e| e.share_count),
            last_shared: existing.as_ref().and_then(|e| e.last_shared),
            status: ContentStatus::Published,
            created_at: existing.as_ref().map_or(now, |e| e.created_at),
            created_by: existing.as_ref().map_or(editor, |e| e.created_by),
            updated_at: now,
            updated_by: editor,
        };

        self.repo.upsert(&story).await?;
        info!(
            id = %story.id,
            total_score = story.total_score,
            edit = existing.is_some(),
            "story saved"
        );
        Ok(story)
    }

    async fn upload_photo(&self, upload: PhotoUpload) -> Result<String, AppError> {
        let key = blob_key(PHOTO_PREFIX, &upload.filename);
        let url = self.blobs.upload(&key, upload.bytes).await?;
        Ok(url)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalyseed_core::models::Scorecard;
    use catalyseed_store::{MemoryDocumentStore, StoreError, StoreResult};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Builds a story directly from a draft, bypassing persistence.
    pub(crate) fn story_from(draft: &StoryDraft, scorecard: Scorecard) -> SuccessStory {
        let author = Uuid::new_v4();
        let now = Utc::now();
        SuccessStory {
            id: draft.id.unwrap_or_else(Uuid::new_v4),
            innovator_name: draft.innovator_name.clone(),
            mobile: draft.mobile.clone(),
            email: draft.email.clone(),
            web_address: draft.web_address.clone(),
            linkedin_profile: draft.linkedin_profile.clone(),
            innovation_category: draft.innovation_category,
            year_of_innovation: draft.year_of_innovation.clone(),
            edited_by: None,
            ai_verdict: draft.ai_verdict.clone(),
            inventor_photo: draft.inventor_photo.clone(),
            product_service_pictures: draft.retained_pictures.clone(),
            about_startup: draft.about_startup.clone(),
            current_stage: draft.current_stage.clone(),
            fund_raised_details: draft.fund_raised_details.clone(),
            team_details: draft.team_details.clone(),
            student_alumni_of: draft.student_alumni_of.clone(),
            year_or_batch: draft.year_or_batch.clone(),
            business_address: draft.business_address.clone(),
            company_startup_name: draft.company_startup_name.clone(),
            product_service_name: draft.product_service_name.clone(),
            customer_segment: draft.customer_segment.clone(),
            looking_for_investor: draft.looking_for_investor,
            investment_range: draft.investment_range.clone(),
            mentor_connect: draft.mentor_connect,
            mentor_domain_details: draft.mentor_domain_details.clone(),
            tags: draft.tags.clone(),
            total_score: scorecard.total(),
            scorecard,
            likes: 0,
            share_count: 0,
            last_shared: None,
            status: ContentStatus::Published,
            created_at: now,
            created_by: author,
            updated_at: now,
            updated_by: author,
        }
    }

    struct MemoryBlobs {
        uploads: Mutex<Vec<String>>,
        fail: AtomicBool,
    }

    impl MemoryBlobs {
        fn new() -> Self {
            Self {
                uploads: Mutex::new(Vec::new()),
                fail: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl BlobStorage for MemoryBlobs {
        async fn upload(&self, key: &str, _data: Vec<u8>) -> StoreResult<String> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::UploadFailed("injected failure".to_string()));
            }
            self.uploads.lock().unwrap().push(key.to_string());
            Ok(format!("https://blobs.example/{key}"))
        }
    }

    fn filled_draft() -> StoryDraft {
        StoryDraft {
            innovator_name: "Asha Raman".to_string(),
            mobile: "9840000000".to_string(),
            email: "asha@greencell.example".to_string(),
            innovation_category: catalyseed_core::models::InnovationCategory::AgriTech,
            year_of_innovation: "2021".to_string(),
            about_startup: "Solar microgrids for rural farms.".to_string(),
            current_stage: "Seed".to_string(),
            student_alumni_of: "Anna University".to_string(),
            year_or_batch: "2019".to_string(),
            business_address: "Chennai, Tamil Nadu".to_string(),
            company_startup_name: "GreenCell Energy".to_string(),
            product_service_name: "GreenCell Grid".to_string(),
            team_details: "Four co-founders".to_string(),
            scores: [5, 4, 3, 5, 2, 3, 4, 4],
            ..StoryDraft::new()
        }
    }

    struct Fixture {
        admin: StoryAdmin,
        store: Arc<MemoryDocumentStore>,
        blobs: Arc<MemoryBlobs>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryDocumentStore::new());
        let blobs = Arc::new(MemoryBlobs::new());
        Fixture {
            admin: StoryAdmin::new(store.clone(), blobs.clone()),
            store,
            blobs,
        }
    }

    #[tokio::test]
    async fn create_derives_score_and_publishes() {
        let f = fixture();
        let story = f
            .admin
            .submit(filled_draft(), Vec::new(), None, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(story.total_score, 30);
        assert_eq!(story.scorecard.percent(), 75);
        assert_eq!(story.status, ContentStatus::Published);
        assert_eq!(story.likes, 0);
        assert_eq!(story.share_count, 0);

        let doc = f
            .store
            .get("successStories", &story.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["totalScore"], json!(30));
        assert_eq!(doc["status"], json!("published"));
    }

    #[tokio::test]
    async fn invalid_draft_writes_nothing() {
        let f = fixture();
        let err = f
            .admin
            .submit(StoryDraft::new(), Vec::new(), None, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.field_errors().is_some());
        assert!(f
            .store
            .query_all("successStories")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn edit_preserves_counters_and_creation_metadata() {
        let f = fixture();
        let author = Uuid::new_v4();
        let created = f
            .admin
            .submit(filled_draft(), Vec::new(), None, author)
            .await
            .unwrap();

        // Engagement happens between create and edit.
        f.admin.repository().increment_likes(&created.id.to_string(), 7).await.unwrap();
        f.admin.repository().record_share(&created.id.to_string()).await.unwrap();

        let mut draft = StoryDraft::from_story(&created);
        draft.about_startup = "Updated description.".to_string();
        draft.scores = [5; 8];
        let editor = Uuid::new_v4();
        let edited = f.admin.submit(draft, Vec::new(), None, editor).await.unwrap();

        assert_eq!(edited.id, created.id);
        assert_eq!(edited.likes, 7);
        assert_eq!(edited.share_count, 1);
        assert!(edited.last_shared.is_some());
        assert_eq!(edited.created_at, created.created_at);
        assert_eq!(edited.created_by, author);
        assert_eq!(edited.updated_by, editor);
        assert_eq!(edited.total_score, 40);
        assert_eq!(edited.status, ContentStatus::Published);
    }

    #[tokio::test]
    async fn new_photos_upload_before_the_write_and_append() {
        let f = fixture();
        let mut draft = filled_draft();
        draft.retained_pictures = vec!["https://blobs.example/old.jpg".to_string()];
        let story = f
            .admin
            .submit(
                draft,
                vec![PhotoUpload {
                    filename: "grid.jpg".to_string(),
                    bytes: vec![1, 2, 3],
                }],
                None,
                Uuid::new_v4(),
            )
            .await
            .unwrap();

        assert_eq!(story.product_service_pictures.len(), 2);
        assert_eq!(story.product_service_pictures[0], "https://blobs.example/old.jpg");
        assert!(story.product_service_pictures[1].contains("success-stories/"));
        assert!(story.product_service_pictures[1].ends_with("_grid.jpg"));

        let keys = f.blobs.uploads.lock().unwrap().clone();
        assert_eq!(keys.len(), 1);
    }

    #[tokio::test]
    async fn failed_upload_aborts_the_submit() {
        let f = fixture();
        f.blobs.fail.store(true, Ordering::SeqCst);
        let err = f
            .admin
            .submit(
                filled_draft(),
                vec![PhotoUpload {
                    filename: "grid.jpg".to_string(),
                    bytes: vec![1],
                }],
                None,
                Uuid::new_v4(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AssetUpload(_)));
        assert!(f
            .store
            .query_all("successStories")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn edit_of_missing_story_is_not_found() {
        let f = fixture();
        let mut draft = filled_draft();
        draft.id = Some(Uuid::new_v4());
        let err = f
            .admin
            .submit(draft, Vec::new(), None, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
