//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! [`InMemoryRepository`] serves any entity implementing [`MemoryRecord`].
//!
//! ## Thread Safety
//!
//! Storage is an `Arc<RwLock<Vec<_>>>`; clones share the same records.

pub mod repository;

pub use repository::{InMemoryRepository, MemoryRecord};
