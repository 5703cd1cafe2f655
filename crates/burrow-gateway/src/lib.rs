//! HTTP transport for the Burrow URL shortener.
//!
//! Exposes link creation, redirection and a debug listing over axum. All
//! shortening logic lives behind the [`Shortener`](burrow_core::Shortener)
//! held in [`AppState`].

pub mod app;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
