//! Catalyseed Store Library
//!
//! External-store abstractions and local implementations: the document store
//! holding user and content records, and the blob store serving uploaded
//! photos. The production deployment fronts a managed document database;
//! these traits are the only surface the rest of the codebase sees.
//!
//! # Counter semantics
//!
//! `atomic_increment` applies a commutative delta on the store side. Callers
//! never read-modify-write counters, so concurrent likes/shares from many
//! sessions converge to the correct aggregate without locking.

pub mod blob;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use blob::{blob_key, BlobStorage, LocalBlobStorage};
pub use local::LocalDocumentStore;
pub use memory::MemoryDocumentStore;
pub use traits::{DocumentStore, StoreError, StoreResult};
