//! DTO for the resolve endpoint in JSON mode.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OriginalUrlResponse {
    pub original_url: String,
}
