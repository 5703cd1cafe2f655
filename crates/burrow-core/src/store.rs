use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Type alias for store results.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A persisted code to URL mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// The short code. Primary key of the mapping.
    pub code: ShortCode,
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the mapping was created. Only used to order listings.
    pub created_at: Timestamp,
}

/// Durable persistence of [`Mapping`]s.
///
/// The store is the sole arbiter of code uniqueness. Implementations must
/// make [`put`](MappingStore::put) an atomic insert-if-absent so that
/// concurrent writers of the same code see exactly one success, even across
/// processes sharing the same backend.
///
/// Mappings are never updated or deleted through this trait.
#[async_trait]
pub trait MappingStore: Send + Sync + 'static {
    /// Inserts a new mapping and returns it.
    ///
    /// Returns `Err(StorageError::Conflict)` if the code already exists.
    /// The URL is stored as given; validating it is the caller's job.
    async fn put(&self, code: &ShortCode, original_url: &str) -> Result<Mapping>;

    /// Looks up a mapping by exact code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>>;

    /// Returns at most `limit` mappings, most recently created first.
    async fn list(&self, limit: usize) -> Result<Vec<Mapping>>;

    /// Returns the number of stored mappings.
    async fn count(&self) -> Result<u64>;
}
