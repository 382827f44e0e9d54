mod health;
mod url;

pub use health::HealthResponse;
pub use url::{CreateUrlRequest, CreateUrlResponse, UrlListing, UrlStatsResponse};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
