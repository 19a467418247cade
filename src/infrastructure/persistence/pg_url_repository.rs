//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    alias: String,
    long_url: String,
    topic: Option<String>,
    owner_id: String,
    created_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(
            row.id,
            row.alias,
            row.long_url,
            row.topic,
            row.owner_id,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for short URL mappings.
///
/// Uses SQLx prepared statements for SQL injection protection and type
/// safety. Alias uniqueness is enforced by the unique index on the `alias`
/// column; a violation surfaces as [`AppError::Conflict`].
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (alias, long_url, topic, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, alias, long_url, topic, owner_id, created_at
            "#,
        )
        .bind(&new_url.alias)
        .bind(&new_url.long_url)
        .bind(&new_url.topic)
        .bind(&new_url.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, alias, long_url, topic, owner_id, created_at
            FROM short_urls
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn exists_by_alias(&self, alias: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM short_urls WHERE alias = $1)",
        )
        .bind(alias)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_by_topic(&self, topic: &str) -> Result<Vec<ShortUrl>, AppError> {
        let rows = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, alias, long_url, topic, owner_id, created_at
            FROM short_urls
            WHERE topic = $1
            ORDER BY created_at
            "#,
        )
        .bind(topic)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortUrl::from).collect())
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<ShortUrl>, AppError> {
        let rows = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT id, alias, long_url, topic, owner_id, created_at
            FROM short_urls
            WHERE owner_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortUrl::from).collect())
    }
}
