//! User repository over the document store.

use catalyseed_core::constants::USERS_COLLECTION;
use catalyseed_core::models::{RoleProfile, User};
use catalyseed_core::AppError;
use catalyseed_store::DocumentStore;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Typed access to user documents.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let value = self.store.get(USERS_COLLECTION, &id.to_string()).await?;
        match value {
            Some(value) => {
                let user = serde_json::from_value(value).map_err(|e| {
                    AppError::Internal(format!("corrupt user document {}: {}", id, e))
                })?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    pub async fn create(&self, user: &User) -> Result<(), AppError> {
        let value = serde_json::to_value(user)
            .map_err(|e| AppError::Internal(format!("serialize user: {}", e)))?;
        self.store
            .set(USERS_COLLECTION, &user.id.to_string(), value)
            .await?;
        Ok(())
    }

    /// Persist a completed profile: the whole profile object is replaced and
    /// `profileCompleted` flips in the same update (last-writer-wins).
    pub async fn complete_profile(
        &self,
        id: Uuid,
        profile: &RoleProfile,
    ) -> Result<(), AppError> {
        let mut fields = Map::new();
        fields.insert(
            "profile".to_string(),
            serde_json::to_value(profile)
                .map_err(|e| AppError::Internal(format!("serialize profile: {}", e)))?,
        );
        fields.insert("profileCompleted".to_string(), Value::Bool(true));
        fields.insert(
            "updatedAt".to_string(),
            serde_json::to_value(Utc::now())
                .map_err(|e| AppError::Internal(e.to_string()))?,
        );
        self.store
            .update(USERS_COLLECTION, &id.to_string(), fields)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalyseed_core::models::{GeneralProfile, StartupProfile, UserRole, UserStatus};
    use catalyseed_store::MemoryDocumentStore;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: UserRole::Startup,
            status: UserStatus::Pending,
            profile_completed: false,
            profile: RoleProfile::Startup(StartupProfile::default()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let repo = UserRepository::new(Arc::new(MemoryDocumentStore::new()));
        let user = sample_user();
        repo.create(&user).await.unwrap();
        let loaded = repo.get(user.id).await.unwrap().unwrap();
        assert_eq!(loaded, user);
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn complete_profile_replaces_profile_and_flips_flag() {
        let repo = UserRepository::new(Arc::new(MemoryDocumentStore::new()));
        let user = sample_user();
        repo.create(&user).await.unwrap();

        let profile = RoleProfile::Startup(StartupProfile {
            company: Some("Bright Ideas".into()),
            funding_stage: Some("Seed".into()),
            ..Default::default()
        });
        repo.complete_profile(user.id, &profile).await.unwrap();

        let loaded = repo.get(user.id).await.unwrap().unwrap();
        assert!(loaded.profile_completed);
        assert_eq!(loaded.profile, profile);
        // Untouched fields survive the partial update.
        assert_eq!(loaded.name, "Asha");
    }

    #[tokio::test]
    async fn complete_profile_requires_existing_document() {
        let repo = UserRepository::new(Arc::new(MemoryDocumentStore::new()));
        let err = repo
            .complete_profile(
                Uuid::new_v4(),
                &RoleProfile::General(GeneralProfile::default()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
