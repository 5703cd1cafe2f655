mod health;
mod url;

pub use health::{health_handler, index_handler};
pub use url::{debug_handler, redirect_handler, shorten_handler, DEBUG_LIST_LIMIT};
