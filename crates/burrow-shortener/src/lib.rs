//! URL shortener service implementation.
//!
//! This crate composes a [`Generator`](burrow_generator::Generator) with a
//! [`MappingStore`](burrow_core::MappingStore). Core types are re-exported
//! from `burrow_core`.

pub mod service;

pub use burrow_core::{Mapping, ShortenParams, Shortener, ShortenerError};
pub use service::{ShortenerService, DEFAULT_MAX_ATTEMPTS};
