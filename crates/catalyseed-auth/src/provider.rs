//! Identity provider abstraction
//!
//! The production deployment fronts a managed identity service; this trait
//! is the only surface the session manager sees. `LocalIdentityProvider`
//! implements it with bcrypt-hashed credentials held in memory, enough for
//! local development and tests.

use async_trait::async_trait;
use catalyseed_core::AppError;
use std::collections::HashMap;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

/// An authenticated identity as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

/// Identity provider abstraction
///
/// Session changes (including externally forced ones such as token expiry)
/// are delivered through the watch channel; the session manager subscribes
/// on init and unsubscribes on teardown.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register new credentials and establish a session.
    ///
    /// Fails with `DuplicateAccount` if the email is already registered.
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AppError>;

    /// Verify credentials and establish a session.
    ///
    /// Fails with `InvalidCredentials`; the caller cannot distinguish a
    /// missing account from a wrong password.
    async fn verify_credentials(&self, email: &str, password: &str)
        -> Result<Identity, AppError>;

    /// End the current session. Idempotent.
    async fn end_session(&self) -> Result<(), AppError>;

    /// Subscribe to session changes. `None` means no session.
    fn watch_session(&self) -> watch::Receiver<Option<Identity>>;
}

struct Account {
    id: Uuid,
    password_hash: String,
}

/// In-memory identity provider backed by bcrypt hashes.
pub struct LocalIdentityProvider {
    accounts: Mutex<HashMap<String, Account>>,
    session_tx: watch::Sender<Option<Identity>>,
    bcrypt_cost: u32,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Lower the bcrypt cost for tests; production keeps the default.
    pub fn with_cost(bcrypt_cost: u32) -> Self {
        let (session_tx, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            session_tx,
            bcrypt_cost,
        }
    }

    fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let key = Self::normalize_email(email);
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&key) {
            return Err(AppError::DuplicateAccount(key));
        }

        // bcrypt is CPU-bound; keep it off the async threads.
        let cost = self.bcrypt_cost;
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("hash task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("bcrypt hash failed: {}", e)))?;

        let identity = Identity {
            id: Uuid::new_v4(),
            email: key.clone(),
        };
        accounts.insert(
            key,
            Account {
                id: identity.id,
                password_hash,
            },
        );
        drop(accounts);

        // Registering establishes a session, as the managed provider does.
        self.session_tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AppError> {
        let key = Self::normalize_email(email);
        let (id, password_hash) = {
            let accounts = self.accounts.lock().await;
            match accounts.get(&key) {
                Some(account) => (account.id, account.password_hash.clone()),
                None => return Err(AppError::InvalidCredentials),
            }
        };

        let password = password.to_string();
        let verified =
            tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
                .await
                .map_err(|e| AppError::Internal(format!("verify task failed: {}", e)))?
                .map_err(|e| AppError::Internal(format!("bcrypt verify failed: {}", e)))?;

        if !verified {
            return Err(AppError::InvalidCredentials);
        }

        let identity = Identity { id, email: key };
        self.session_tx.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn end_session(&self) -> Result<(), AppError> {
        self.session_tx.send_replace(None);
        Ok(())
    }

    fn watch_session(&self) -> watch::Receiver<Option<Identity>> {
        self.session_tx.subscribe()
    }
}
