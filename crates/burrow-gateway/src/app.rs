use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    debug_handler, health_handler, index_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState, cors: CorsLayer) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health_handler))
            .route("/shorten", post(shorten_handler))
            .route("/debug", get(debug_handler))
            .route("/{short_code}", get(redirect_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }
}
