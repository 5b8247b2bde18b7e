//! Shorten and resolve orchestration over the cache and the durable store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheError, CacheKey, CacheService};
use crate::utils::code_generator::is_well_formed_code;
use crate::utils::url_normalizer::{normalize_url, validate_target};

/// Tunables for [`UrlService`].
#[derive(Debug, Clone)]
pub struct UrlServiceSettings {
    /// Offset from `created_at` written into `expires_at`.
    pub url_ttl: chrono::Duration,
    /// Upper bound for a single durable store call.
    pub store_timeout: Duration,
    /// Upper bound for a single cache call.
    pub cache_timeout: Duration,
    /// Public prefix for full short links, e.g. `https://s.example.com`.
    pub base_url: String,
}

impl Default for UrlServiceSettings {
    fn default() -> Self {
        Self {
            url_ttl: chrono::Duration::hours(1),
            store_timeout: Duration::from_secs(3),
            cache_timeout: Duration::from_secs(1),
            base_url: "http://localhost:7374".to_string(),
        }
    }
}

/// Service for creating and resolving short codes.
///
/// Reads go to the cache first and fall back to the repository; records found
/// in or written to the repository are copied into the cache. The repository
/// is authoritative. Cache failures are logged and otherwise ignored.
pub struct UrlService<R: UrlRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    settings: UrlServiceSettings,
}

impl<R: UrlRepository> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        settings: UrlServiceSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            settings,
        }
    }

    /// Returns the durable store.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Returns the cache.
    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    /// Returns the timeouts and link prefix in use.
    pub fn settings(&self) -> &UrlServiceSettings {
        &self.settings
    }

    /// Returns the short code for `original_url`, creating it on first use.
    ///
    /// # Flow
    ///
    /// 1. Normalize and validate the URL
    /// 2. Cache lookup by normalized URL
    /// 3. Store lookup by normalized URL (repopulates the cache on hit)
    /// 4. Derive the code, insert, then write the cache
    ///
    /// # Concurrency
    ///
    /// Two requests racing for the same URL derive the same code; the loser's
    /// insert hits the unique index and it returns the winner's record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is unusable.
    /// Returns [`AppError::Conflict`] if the derived code belongs to a different URL.
    /// Returns [`AppError::Internal`] on store errors or timeouts.
    pub async fn shorten(&self, original_url: &str) -> Result<UrlRecord, AppError> {
        let normalized = normalize_url(original_url);
        validate_target(&normalized).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(cached) = self.cache_get(&CacheKey::Url(normalized.clone())).await {
            return Ok(cached);
        }

        if let Some(existing) = self
            .with_store_timeout(
                "find_by_original_url",
                self.repository.find_by_original_url(&normalized),
            )
            .await?
        {
            debug!("Already shortened: {} -> {}", existing.original_url, existing.short_code);
            self.cache_put_record(&existing).await;
            return Ok(existing);
        }

        let new_record = NewUrlRecord::derive(normalized, Utc::now(), self.settings.url_ttl);

        match self
            .with_store_timeout("create", self.repository.create(new_record.clone()))
            .await
        {
            Ok(created) => {
                info!("Shortened {} -> {}", created.original_url, created.short_code);
                self.cache_put_record(&created).await;
                Ok(created)
            }
            Err(AppError::Conflict { .. }) => self.resolve_insert_conflict(new_record).await,
            Err(e) => Err(e),
        }
    }

    /// Returns the record behind `short_code`.
    ///
    /// Codes that cannot have been derived are rejected without touching
    /// either datastore.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    /// Returns [`AppError::Internal`] on store errors or timeouts.
    pub async fn resolve(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        if !is_well_formed_code(short_code) {
            return Err(Self::not_found(short_code));
        }

        if let Some(cached) = self.cache_get(&CacheKey::Code(short_code.to_string())).await {
            return Ok(cached);
        }

        match self
            .with_store_timeout("find_by_code", self.repository.find_by_code(short_code))
            .await?
        {
            Some(record) => {
                self.cache_put_record(&record).await;
                Ok(record)
            }
            None => Err(Self::not_found(short_code)),
        }
    }

    /// Constructs the full short link for a code.
    pub fn short_link(&self, short_code: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            short_code
        )
    }

    /// Settles an insert rejected by the unique index.
    ///
    /// If the URL is now present, a concurrent request created it and that
    /// record is the answer. Otherwise the code belongs to another URL.
    async fn resolve_insert_conflict(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let existing = self
            .with_store_timeout(
                "find_by_original_url",
                self.repository.find_by_original_url(&new_record.original_url),
            )
            .await?;

        match existing {
            Some(record) => {
                info!(
                    "Concurrent shorten for {} already stored {}",
                    record.original_url, record.short_code
                );
                self.cache_put_record(&record).await;
                Ok(record)
            }
            None => {
                error!(
                    "Short code {} collides for {}",
                    new_record.short_code, new_record.original_url
                );
                Err(AppError::conflict(
                    "Short code collision",
                    json!({ "code": new_record.short_code }),
                ))
            }
        }
    }

    async fn with_store_timeout<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.settings.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.settings.store_timeout.as_millis() as u64;
                error!("Store {} timed out after {}ms", operation, timeout_ms);
                Err(AppError::internal(
                    "Store operation timed out",
                    json!({ "operation": operation, "timeout_ms": timeout_ms }),
                ))
            }
        }
    }

    /// Cache read where every failure counts as a miss.
    async fn cache_get(&self, key: &CacheKey) -> Option<UrlRecord> {
        let outcome = match tokio::time::timeout(self.settings.cache_timeout, self.cache.get(key)).await {
            Ok(result) => result,
            Err(_) => Err(self.cache_timeout_error()),
        };

        match outcome {
            Ok(Some(record)) => {
                metrics::counter!("tinyurl_cache_hits_total").increment(1);
                Some(record)
            }
            Ok(None) => {
                metrics::counter!("tinyurl_cache_misses_total").increment(1);
                None
            }
            Err(e) => {
                metrics::counter!("tinyurl_cache_errors_total").increment(1);
                warn!("Cache read failed for {}: {}", key, e);
                None
            }
        }
    }

    /// Best-effort write of `record` under both of its keys.
    async fn cache_put_record(&self, record: &UrlRecord) {
        for key in CacheKey::for_record(record) {
            let outcome =
                match tokio::time::timeout(self.settings.cache_timeout, self.cache.put(&key, record))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(self.cache_timeout_error()),
                };

            if let Err(e) = outcome {
                metrics::counter!("tinyurl_cache_errors_total").increment(1);
                warn!("Cache write failed for {}: {}", key, e);
            }
        }
    }

    fn cache_timeout_error(&self) -> CacheError {
        CacheError::Timeout(self.settings.cache_timeout.as_millis() as u64)
    }

    fn not_found(short_code: &str) -> AppError {
        AppError::not_found("Short link not found", json!({ "code": short_code }))
    }
}
