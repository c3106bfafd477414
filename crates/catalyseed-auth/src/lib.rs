//! Catalyseed Auth Library
//!
//! Identity-provider abstraction, the user repository, and the session
//! manager that owns the single authenticated session and the role-driven
//! profile-completion flow.

pub mod provider;
pub mod session;
pub mod users;

// Re-export commonly used types
pub use provider::{Identity, IdentityProvider, LocalIdentityProvider};
pub use session::{AuthSession, SessionState, SignupOutcome};
pub use users::UserRepository;
