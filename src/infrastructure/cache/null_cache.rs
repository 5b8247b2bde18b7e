//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheKey, CacheResult, CacheService};
use crate::domain::entities::UrlRecord;
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every lookup
/// is a miss and every write succeeds without storing anything, so all
/// traffic goes to the durable store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &CacheKey) -> CacheResult<Option<UrlRecord>> {
        Ok(None)
    }

    async fn put(&self, _key: &CacheKey, _record: &UrlRecord) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
