//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// Request to shorten a URL.
///
/// Accepted both as a JSON body and as an urlencoded form with the same
/// field name.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten, with or without scheme.
    #[validate(length(min = 1, message = "original_url must not be empty"))]
    pub original_url: String,
}

/// Response for a shortened URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// The short code.
    pub shortened_url: String,
    /// Full link under the configured base URL.
    pub short_link: String,
    /// The normalized URL the code points to.
    pub original_url: String,
}

impl ShortenResponse {
    pub fn new(record: UrlRecord, short_link: String) -> Self {
        Self {
            shortened_url: record.short_code,
            short_link,
            original_url: record.original_url,
        }
    }
}
