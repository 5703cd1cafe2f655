//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the types shared by the code generator, the
//! storage backends, the shortener service and the HTTP gateway.

pub mod error;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use error::{CoreError, ShortenerError, StorageError};
pub use shortcode::ShortCode;
pub use shortener::{ShortenParams, Shortener};
pub use store::{Mapping, MappingStore};
