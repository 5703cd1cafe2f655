use burrow_core::Mapping;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
}

#[derive(Serialize)]
pub struct MappingView {
    pub short_code: String,
    pub original_url: String,
    pub created_at: Timestamp,
}

impl From<Mapping> for MappingView {
    fn from(mapping: Mapping) -> Self {
        Self {
            short_code: mapping.code.into(),
            original_url: mapping.original_url,
            created_at: mapping.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct DebugResponse {
    pub count: u64,
    pub mappings: Vec<MappingView>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
