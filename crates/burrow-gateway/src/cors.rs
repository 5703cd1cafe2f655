use axum::http::header::{self, InvalidHeaderValue};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Origins allowed when none are configured.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://cplshort.vercel.app",
    "http://localhost:5173",
    "http://localhost:8080",
];

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Builds the CORS policy for the given origins.
///
/// A `*` entry allows any origin. Browsers refuse credentials with a
/// wildcard origin, so credentials are only allowed for an explicit list.
pub fn cors_layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = CorsLayer::new().allow_methods(ALLOWED_METHODS);

    if origins.iter().any(|o| o.as_ref().trim() == "*") {
        return Ok(layer.allow_origin(Any).allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o.as_ref().trim()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_headers([
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            header::CACHE_CONTROL,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true))
}
