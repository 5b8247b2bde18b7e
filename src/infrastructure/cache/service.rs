//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

use crate::domain::entities::UrlRecord;

/// Errors that can occur during cache operations.
///
/// None of these ever reach a client; the orchestrator logs them and carries
/// on as if the cache were empty.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),

    #[error("Cache value is invalid: {0}")]
    Serialization(String),

    #[error("Cache operation timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Address of a cached record.
///
/// The same record is reachable by short code (resolve path) and by
/// normalized URL (shorten path). The two namespaces never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Code(String),
    Url(String),
}

impl CacheKey {
    /// Both keys under which a record is written.
    pub fn for_record(record: &UrlRecord) -> [CacheKey; 2] {
        [
            CacheKey::Code(record.short_code.clone()),
            CacheKey::Url(record.original_url.clone()),
        ]
    }

    /// Returns the namespaced backend key, e.g. `tinyurl:code:HH2tynxpYA`.
    pub fn to_storage_key(&self, prefix: &str) -> String {
        match self {
            CacheKey::Code(code) => format!("{prefix}code:{code}"),
            CacheKey::Url(url) => format!("{prefix}url:{url}"),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Code(code) => write!(f, "code:{code}"),
            CacheKey::Url(url) => write!(f, "url:{url}"),
        }
    }
}

/// Trait for caching URL records.
///
/// Implementations must be thread-safe and report failures as [`CacheError`];
/// deciding that a failure is harmless is the caller's job.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a record from cache.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend is unreachable or holds an
    /// unreadable value.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<UrlRecord>>;

    /// Stores a record under `key`.
    ///
    /// The record's `expires_at` is carried through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the write fails.
    async fn put(&self, key: &CacheKey, record: &UrlRecord) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by health check endpoints to report cache status.
    async fn health_check(&self) -> bool;
}
