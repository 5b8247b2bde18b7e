//! Redis-backed cache implementation.

use super::service::{CacheError, CacheKey, CacheResult, CacheService};
use crate::domain::entities::UrlRecord;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis cache for URL records.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Records are stored as JSON strings.
pub struct RedisCache {
    client: ConnectionManager,
    key_ttl: Option<u64>,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_ttl_seconds` - optional Redis key TTL bounding cache memory; `None`
    ///   stores keys without expiry (controlled via `CACHE_TTL_SECONDS`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, key_ttl_seconds: Option<u64>) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_ttl: key_ttl_seconds,
            key_prefix: "tinyurl:".to_string(),
        })
    }

    fn build_key(&self, key: &CacheKey) -> String {
        key.to_storage_key(&self.key_prefix)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<UrlRecord>> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let raw = conn
            .get::<_, Option<String>>(&redis_key)
            .await
            .map_err(|e| CacheError::OperationError(format!("GET {}: {}", redis_key, e)))?;

        match raw {
            Some(json) => {
                let record = serde_json::from_str::<UrlRecord>(&json)
                    .map_err(|e| CacheError::Serialization(format!("{}: {}", redis_key, e)))?;
                debug!("Cache HIT: {} -> {}", key, record.original_url);
                Ok(Some(record))
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn put(&self, key: &CacheKey, record: &UrlRecord) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let json = serde_json::to_string(record)
            .map_err(|e| CacheError::Serialization(format!("{}: {}", redis_key, e)))?;

        let result = match self.key_ttl {
            Some(ttl) => conn.set_ex::<_, _, ()>(&redis_key, json, ttl).await,
            None => conn.set::<_, _, ()>(&redis_key, json).await,
        };

        result.map_err(|e| CacheError::OperationError(format!("SET {}: {}", redis_key, e)))?;

        debug!("Cache SET: {} -> {}", key, record.original_url);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
