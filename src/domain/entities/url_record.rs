//! URL mapping entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::code_generator::derive_code;

/// A normalized URL and the short code derived from it.
///
/// Serialized field names match the persisted layout shared by the store and
/// the cache: `original_url`, `shortened_url`, `created_at`, `expired_at`.
///
/// `expires_at` is informational; nothing rejects or removes a record once it
/// has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub original_url: String,
    #[serde(rename = "shortened_url")]
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "expired_at")]
    pub expires_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            original_url,
            short_code,
            created_at,
            expires_at,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewUrlRecord {
    /// Builds the record for a normalized URL created at `created_at`.
    ///
    /// The short code is derived from `normalized_url`; `expires_at` is
    /// `created_at + ttl`.
    pub fn derive(normalized_url: String, created_at: DateTime<Utc>, ttl: Duration) -> Self {
        let short_code = derive_code(&normalized_url);

        Self {
            original_url: normalized_url,
            short_code,
            created_at,
            expires_at: created_at + ttl,
        }
    }
}

impl From<NewUrlRecord> for UrlRecord {
    fn from(new: NewUrlRecord) -> Self {
        UrlRecord::new(new.original_url, new.short_code, new.created_at, new.expires_at)
    }
}
