use async_trait::async_trait;
use burrow_core::{
    Mapping, MappingStore, ShortCode, ShortenParams, Shortener, ShortenerError, StorageError,
};
use burrow_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Attempts made to find a free short code before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `MappingStore` and a `Generator` to handle:
/// - URL validation, before any code is drawn
/// - Short code generation with collision retry
/// - Resolution and listing
///
/// The generator's candidates are never checked for existence up front.
/// The store's insert is the only uniqueness check, and a
/// [`StorageError::Conflict`] from it makes the service draw again, up to
/// `max_attempts` times.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<R: MappingStore, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with [`DEFAULT_MAX_ATTEMPTS`].
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the retry cap. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns a reference to the underlying store.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates that the URL uses http or https and names something after
    /// the scheme. The check is an exact, case-sensitive prefix match.
    ///
    /// Whitespace and control characters are rejected: the URL must be
    /// usable verbatim as a `Location` header.
    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        let Some(rest) = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
        else {
            return Err(ShortenerError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        };

        if rest.is_empty() {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a host after the scheme: {}",
                url
            )));
        }

        if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ShortenerError::InvalidUrl(
                "URL must not contain whitespace or control characters".to_string(),
            ));
        }

        Ok(())
    }

    fn generate_code(&self) -> ShortCode {
        self.generator.generate().into()
    }
}

#[async_trait]
impl<R: MappingStore, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<Mapping, ShortenerError> {
        Self::validate_url(&params.original_url)?;

        for attempt in 1..=self.max_attempts {
            let code = self.generate_code();

            match self.repository.put(&code, &params.original_url).await {
                Ok(mapping) => {
                    debug!(code = %code, attempt, url = %mapping.original_url, "created short link");
                    return Ok(mapping);
                }
                Err(StorageError::Conflict(_)) => {
                    trace!(code = %code, attempt, "candidate already taken, drawing again");
                }
                Err(err) => return Err(err.into()),
            }
        }

        warn!(
            attempts = self.max_attempts,
            "no free short code found; code length is too small for the corpus"
        );
        Err(ShortenerError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<Mapping>, ShortenerError> {
        trace!(code = %code, "resolving short code");

        let mapping = self.repository.get(code).await?;
        if mapping.is_none() {
            trace!(code = %code, "short code not found");
        }
        Ok(mapping)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Mapping>, ShortenerError> {
        Ok(self.repository.list(limit).await?)
    }

    async fn count(&self) -> Result<u64, ShortenerError> {
        Ok(self.repository.count().await?)
    }
}
