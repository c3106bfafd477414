//! Auth session manager
//!
//! Owns exactly one authenticated session or none, and gates access to
//! profile-dependent features. The session context is injected where needed
//! with an explicit lifecycle: `init` subscribes to identity-provider
//! session changes, `teardown` unsubscribes.

use crate::provider::IdentityProvider;
use crate::users::UserRepository;
use catalyseed_core::models::{RoleProfile, SignupData, User, UserRole, UserStatus};
use catalyseed_core::AppError;
use chrono::Utc;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 6;

/// Current session state.
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticated {
        user: User,
        /// Whether the profile-completion prompt is active. The user may
        /// dismiss it without completing; they stay incomplete but are not
        /// blocked from using the app.
        profile_prompt: bool,
    },
}

/// Result of a successful signup.
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    pub user: User,
    pub needs_profile_completion: bool,
}

/// Session manager.
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    users: UserRepository,
    admin_code: String,
    state: RwLock<SessionState>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl AuthSession {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        users: UserRepository,
        admin_code: String,
    ) -> Arc<Self> {
        Arc::new(Self {
            provider,
            users,
            admin_code,
            state: RwLock::new(SessionState::Anonymous),
            listener: Mutex::new(None),
        })
    }

    /// Subscribe to provider session changes. An externally ended session
    /// (e.g. token expiry) forces the state back to anonymous; a restored
    /// identity is hydrated from the user document.
    pub async fn init(self: &Arc<Self>) {
        let mut listener = self.listener.lock().await;
        if listener.is_some() {
            return;
        }

        let this = Arc::clone(self);
        let mut rx = self.provider.watch_session();
        *listener = Some(tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let identity = rx.borrow_and_update().clone();
                match identity {
                    Some(identity) => match this.users.get(identity.id).await {
                        Ok(Some(user)) => {
                            let prompt = !user.profile_completed
                                && user.role.requires_profile_completion();
                            *this.state.write().await = SessionState::Authenticated {
                                user,
                                profile_prompt: prompt,
                            };
                        }
                        // No document yet: signup is still writing it and
                        // will set the state itself once the write lands.
                        Ok(None) => {
                            tracing::debug!(id = %identity.id, "session identity has no user document");
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to hydrate user for session");
                        }
                    },
                    None => {
                        *this.state.write().await = SessionState::Anonymous;
                    }
                }
            }
        }));
    }

    /// Stop listening for provider session changes.
    pub async fn teardown(&self) {
        if let Some(handle) = self.listener.lock().await.take() {
            handle.abort();
        }
    }

    /// Register a new account and establish a session.
    ///
    /// All-or-nothing: validation failures (bad admin code, weak input)
    /// happen before any provider or store call, so no partial user record
    /// can exist after a rejected signup.
    pub async fn signup(
        &self,
        data: SignupData,
        admin_code: Option<&str>,
    ) -> Result<SignupOutcome, AppError> {
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if !data.email.contains('@') {
            return Err(AppError::Validation("A valid email is required".to_string()));
        }
        if data.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if data.role == UserRole::Admin {
            let supplied = admin_code.unwrap_or("");
            let matches: bool = supplied
                .as_bytes()
                .ct_eq(self.admin_code.as_bytes())
                .into();
            if !matches {
                return Err(AppError::Validation("Invalid admin code".to_string()));
            }
        }

        // General users may bring their profile along at signup; every other
        // role starts empty and fills it in through the completion flow.
        let profile = match (data.role, data.profile) {
            (UserRole::General, Some(profile)) => {
                if profile.role() != UserRole::General {
                    return Err(AppError::Validation(
                        "Profile does not match the selected role".to_string(),
                    ));
                }
                profile
            }
            (role, _) => RoleProfile::empty_for(role),
        };

        let identity = self
            .provider
            .create_account(&data.email, &data.password)
            .await?;

        let now = Utc::now();
        let user = User {
            id: identity.id,
            name: data.name.trim().to_string(),
            email: identity.email.clone(),
            role: data.role,
            status: if data.role == UserRole::Admin {
                UserStatus::Verified
            } else {
                UserStatus::Pending
            },
            profile_completed: data.role == UserRole::General,
            profile,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.users.create(&user).await {
            // Roll back: no session and no in-memory state may outlive a
            // failed document write.
            tracing::warn!(error = %e, "user document write failed, ending session");
            let _ = self.provider.end_session().await;
            *self.state.write().await = SessionState::Anonymous;
            return Err(e);
        }

        let needs_profile_completion = !user.profile_completed;
        *self.state.write().await = SessionState::Authenticated {
            user: user.clone(),
            profile_prompt: needs_profile_completion,
        };

        Ok(SignupOutcome {
            user,
            needs_profile_completion,
        })
    }

    /// Verify credentials and hydrate the user from the store.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let identity = self.provider.verify_credentials(email, password).await?;

        let user = self
            .users
            .get(identity.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", identity.id)))?;

        let prompt = !user.profile_completed && user.role.requires_profile_completion();
        *self.state.write().await = SessionState::Authenticated {
            user: user.clone(),
            profile_prompt: prompt,
        };
        Ok(user)
    }

    /// Clear the session and any pending profile-completion prompt.
    /// Unconditional and idempotent.
    pub async fn logout(&self) {
        if let Err(e) = self.provider.end_session().await {
            tracing::warn!(error = %e, "identity provider end_session failed");
        }
        *self.state.write().await = SessionState::Anonymous;
    }

    /// Dismiss the completion prompt without completing. The user stays
    /// incomplete but is not blocked.
    pub async fn dismiss_profile_prompt(&self) {
        let mut state = self.state.write().await;
        if let SessionState::Authenticated { profile_prompt, .. } = &mut *state {
            *profile_prompt = false;
        }
    }

    /// Merge the supplied profile into the current user and mark the
    /// profile completed.
    ///
    /// Persists first; in-memory state is swapped only after the write
    /// confirms, so a failed write leaves local state untouched and the
    /// prompt open.
    pub async fn complete_profile(&self, profile: RoleProfile) -> Result<(), AppError> {
        let current = match &*self.state.read().await {
            SessionState::Authenticated { user, .. } => user.clone(),
            SessionState::Anonymous => return Err(AppError::NotAuthenticated),
        };

        if profile.role() != current.role {
            return Err(AppError::Validation(
                "Profile does not match the account role".to_string(),
            ));
        }

        self.users.complete_profile(current.id, &profile).await?;

        let mut state = self.state.write().await;
        if let SessionState::Authenticated {
            user,
            profile_prompt,
        } = &mut *state
        {
            // Only swap if the confirmed write belongs to the session that
            // is still active.
            if user.id == current.id {
                user.profile = profile;
                user.profile_completed = true;
                user.updated_at = Utc::now();
                *profile_prompt = false;
            }
        }
        Ok(())
    }

    /// Currently authenticated user, if any.
    pub async fn current_user(&self) -> Option<User> {
        match &*self.state.read().await {
            SessionState::Authenticated { user, .. } => Some(user.clone()),
            SessionState::Anonymous => None,
        }
    }

    /// Whether the profile-completion prompt is active.
    pub async fn profile_prompt_active(&self) -> bool {
        matches!(
            &*self.state.read().await,
            SessionState::Authenticated {
                profile_prompt: true,
                ..
            }
        )
    }

    /// Id of the authenticated user, or `NotAuthenticated`.
    pub async fn require_user_id(&self) -> Result<Uuid, AppError> {
        self.current_user()
            .await
            .map(|user| user.id)
            .ok_or(AppError::NotAuthenticated)
    }
}
