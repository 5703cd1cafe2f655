use crate::shortcode::ShortCode;
use crate::store::Mapping;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub original_url: String,
}

impl ShortenParams {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
        }
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL under a freshly generated, unique short code.
    async fn shorten(&self, params: ShortenParams) -> Result<Mapping>;

    /// Resolves a short code to its stored mapping.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<Mapping>>;

    /// Lists at most `limit` mappings, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Mapping>>;

    /// Returns the total number of mappings.
    async fn count(&self) -> Result<u64>;
}
