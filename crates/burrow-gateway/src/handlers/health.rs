use crate::model::{HealthResponse, WelcomeResponse};
use axum::Json;
use jiff::Timestamp;

pub async fn index_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the URL shortener API",
    })
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Timestamp::now(),
    })
}
