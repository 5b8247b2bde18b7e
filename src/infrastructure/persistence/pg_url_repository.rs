//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Name of the unique index on `urls.shortened_url`.
pub const SHORT_CODE_INDEX: &str = "shortened_url_1";

#[derive(FromRow)]
struct UrlRow {
    original_url: String,
    shortened_url: String,
    created_at: DateTime<Utc>,
    expired_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(
            row.original_url,
            row.shortened_url,
            row.created_at,
            row.expired_at,
        )
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns true if the unique short code index is present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn has_short_code_index(&self) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM pg_indexes
                WHERE schemaname = current_schema()
                  AND tablename = 'urls'
                  AND indexname = $1
            )
            "#,
        )
        .bind(SHORT_CODE_INDEX)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, shortened_url, created_at, expired_at)
            VALUES ($1, $2, $3, $4)
            RETURNING original_url, shortened_url, created_at, expired_at
            "#,
        )
        .bind(&new_record.original_url)
        .bind(&new_record.short_code)
        .bind(new_record.created_at)
        .bind(new_record.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        debug!("Inserted {} -> {}", row.shortened_url, row.original_url);

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT original_url, shortened_url, created_at, expired_at
            FROM urls
            WHERE shortened_url = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT original_url, shortened_url, created_at, expired_at
            FROM urls
            WHERE original_url = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ensure_indexes(&self) -> Result<(), AppError> {
        if self.has_short_code_index().await? {
            info!("Index {} already exists", SHORT_CODE_INDEX);
            return Ok(());
        }

        // Index names cannot be bound as parameters.
        let statement = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON urls (shortened_url)",
            SHORT_CODE_INDEX
        );
        sqlx::query(&statement)
            .execute(self.pool.as_ref())
            .await?;

        info!("Index {} created on shortened_url", SHORT_CODE_INDEX);
        Ok(())
    }
}
