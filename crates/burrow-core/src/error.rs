use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by a [`MappingStore`](crate::MappingStore) backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The short code is already taken. Expected under concurrent writers
    /// and consumed by the shortener's retry loop.
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors surfaced to callers of a [`Shortener`](crate::Shortener).
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Every candidate drawn within the attempt budget was already taken.
    /// The code length is too small for the current corpus.
    #[error("failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
