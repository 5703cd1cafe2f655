pub mod error;
pub mod random;

pub use error::Error;
pub use random::{RandomGenerator, RandomGeneratorSettings};

use burrow_core::ShortCode;

/// Trait for generating candidate short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A generated code is only a candidate: uniqueness is decided by the
/// store when the code is inserted, and callers retry with a fresh
/// candidate on conflict.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Draws the next candidate code.
    fn generate(&self) -> Self::Output;
}
