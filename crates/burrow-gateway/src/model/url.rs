use burrow_core::UrlRecord;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
}

impl CreateUrlResponse {
    pub fn new(record: UrlRecord, base_url: &str) -> Self {
        Self {
            short_url: record.code.to_url(base_url),
            short_code: record.code.to_string(),
            original_url: record.original_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UrlStatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub created_at: Timestamp,
    pub access_count: u64,
}

impl From<UrlRecord> for UrlStatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_code: record.code.to_string(),
            original_url: record.original_url,
            created_at: record.created_at,
            access_count: record.access_count,
        }
    }
}

/// One entry of the admin listing. `id` is the short code.
#[derive(Debug, Serialize)]
pub struct UrlListing {
    pub id: String,
    pub short_code: String,
    pub original_url: String,
    pub created_at: Timestamp,
    pub access_count: u64,
}

impl From<UrlRecord> for UrlListing {
    fn from(record: UrlRecord) -> Self {
        let short_code = record.code.to_string();
        Self {
            id: short_code.clone(),
            short_code,
            original_url: record.original_url,
            created_at: record.created_at,
            access_count: record.access_count,
        }
    }
}
