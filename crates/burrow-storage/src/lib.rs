//! Storage backends for short code mappings.
//!
//! Both backends enforce code uniqueness inside the insert itself, so
//! concurrent writers never need an application-level lock.

pub mod error;
pub mod memory;
pub mod sqlite;

pub use burrow_core::{Mapping, MappingStore, StorageError};
pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;
