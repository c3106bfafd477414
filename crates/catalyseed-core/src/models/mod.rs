//! Data models for the platform
//!
//! Identity and content documents as persisted in the document store.
//! Documents serialize camelCase to match the store schema.

mod hackathon;
mod scorecard;
mod story;
mod user;

pub use hackathon::*;
pub use scorecard::*;
pub use story::*;
pub use user::*;
