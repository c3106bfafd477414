//! Content persistence and admin editing for Catalyseed.
//!
//! Typed repositories sit on top of the schemaless document store, and
//! the admin module drives the validated story form: field validation,
//! photo uploads, score derivation, and counter-preserving upserts.

pub mod admin;
pub mod draft;
pub mod repository;

pub use admin::{PhotoUpload, StoryAdmin};
pub use draft::StoryDraft;
pub use repository::{ContentDocument, ContentRepository};
