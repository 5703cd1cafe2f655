use crate::error::{AppError, Result};
use crate::model::{DebugResponse, ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::{ShortCode, ShortenParams};
use tracing::{debug, info};

/// Maximum number of mappings returned by the debug listing.
pub const DEBUG_LIST_LIMIT: usize = 100;

pub async fn shorten_handler(
    State(state): State<AppState>,
    request: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>> {
    let Json(request) = request.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;

    let mapping = state
        .shortener()
        .shorten(ShortenParams::new(request.url))
        .await?;

    info!(code = %mapping.code, url = %mapping.original_url, "short link created");

    Ok(Json(ShortenResponse {
        short_url: mapping.code.to_url(state.base_url()),
        short_code: mapping.code.into(),
        original_url: mapping.original_url,
    }))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // A code that could never have been issued cannot be stored either.
    let code = short_code.parse::<ShortCode>().map_err(|err| {
        debug!(code = %short_code, error = %err, "rejected malformed short code");
        AppError::NotFound
    })?;

    let mapping = state
        .shortener()
        .resolve(&code)
        .await?
        .ok_or(AppError::NotFound)?;

    let location = HeaderValue::from_str(&mapping.original_url)
        .map_err(|_| AppError::InvalidRedirectTarget(code.to_string()))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

pub async fn debug_handler(State(state): State<AppState>) -> Result<Json<DebugResponse>> {
    let shortener = state.shortener();
    let count = shortener.count().await?;
    let mappings = shortener.list_recent(DEBUG_LIST_LIMIT).await?;

    Ok(Json(DebugResponse {
        count,
        mappings: mappings.into_iter().map(Into::into).collect(),
    }))
}
