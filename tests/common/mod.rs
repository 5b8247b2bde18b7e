#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, SubsecRound, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tinyurl::application::services::{UrlService, UrlServiceSettings};
use tinyurl::domain::entities::UrlRecord;
use tinyurl::infrastructure::cache::{
    CacheError, CacheKey, CacheResult, CacheService, NullCache,
};
use tinyurl::infrastructure::persistence::PgUrlRepository;
use tinyurl::state::{AppState, ResolveOptions};

/// Cache whose every operation fails, as if Redis were unreachable.
pub struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn get(&self, _key: &CacheKey) -> CacheResult<Option<UrlRecord>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn put(&self, _key: &CacheKey, _record: &UrlRecord) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Cache that accepts calls and never answers, as if Redis were hung.
pub struct HangingCache;

#[async_trait]
impl CacheService for HangingCache {
    async fn get(&self, _key: &CacheKey) -> CacheResult<Option<UrlRecord>> {
        std::future::pending().await
    }

    async fn put(&self, _key: &CacheKey, _record: &UrlRecord) -> CacheResult<()> {
        std::future::pending().await
    }

    async fn health_check(&self) -> bool {
        std::future::pending().await
    }
}

pub fn create_test_service(
    pool: PgPool,
    cache: Arc<dyn CacheService>,
) -> Arc<UrlService<PgUrlRepository>> {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    Arc::new(UrlService::new(
        repository,
        cache,
        UrlServiceSettings::default(),
    ))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with(pool, Arc::new(NullCache), ResolveOptions::default())
}

pub fn create_test_state_with(
    pool: PgPool,
    cache: Arc<dyn CacheService>,
    resolve: ResolveOptions,
) -> AppState {
    AppState::new(create_test_service(pool, cache), resolve)
}

pub async fn insert_url(pool: &PgPool, original_url: &str, code: &str) {
    let now = Utc::now().trunc_subsecs(0);
    sqlx::query(
        "INSERT INTO urls (original_url, shortened_url, created_at, expired_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(original_url)
    .bind(code)
    .bind(now)
    .bind(now + Duration::hours(1))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_urls(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .unwrap()
}
