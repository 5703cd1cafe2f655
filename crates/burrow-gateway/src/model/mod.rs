mod health;
mod url;

pub use health::{HealthResponse, WelcomeResponse};
pub use url::{DebugResponse, ErrorResponse, MappingView, ShortenRequest, ShortenResponse};
