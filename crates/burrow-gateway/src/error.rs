use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::ShortenerError;
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid Request Body: {0}")]
    InvalidBody(String),
    #[error("Short URL not found")]
    NotFound,
    #[error("Stored URL for '{0}' is not a valid redirect target")]
    InvalidRedirectTarget(String),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidBody(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidRedirectTarget(ref code) => {
                error!(code = %code, "stored url cannot be sent as a Location header");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Shortener(ShortenerError::InvalidUrl(reason)) => {
                (StatusCode::BAD_REQUEST, reason)
            }
            AppError::Shortener(err @ ShortenerError::GenerationExhausted { .. }) => {
                error!(error = %err, "short code space exhausted");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to save URL: {err}"),
                )
            }
            AppError::Shortener(ShortenerError::Storage(err)) => {
                error!(error = %err, "storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {err}"),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
