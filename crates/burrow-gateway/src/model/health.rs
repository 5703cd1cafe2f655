use jiff::Timestamp;
use serde::Serialize;

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
}
