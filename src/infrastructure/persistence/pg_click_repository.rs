//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::{
    ClickRepository, DateClicks, DeviceGroup, FlatDeviceGroup, FlatOsGroup, OsGroup,
};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    alias: String,
    long_url: String,
    user_agent: Option<String>,
    ip_address: Option<String>,
    geolocation: Option<Value>,
    time_stamp: DateTime<Utc>,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            id: row.id,
            alias: row.alias,
            long_url: row.long_url,
            user_agent: row.user_agent,
            ip_address: row.ip_address,
            geolocation: row.geolocation,
            time_stamp: row.time_stamp,
        }
    }
}

/// PostgreSQL repository for click events and analytics aggregations.
///
/// All aggregation queries take an alias set (`alias = ANY($1)`), so the
/// same SQL serves single-alias, topic-wide, and per-user reports. Unique
/// visitors are `COUNT(DISTINCT ip_address)`; NULL addresses collapse out
/// of the distinct count.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (alias, long_url, user_agent, ip_address, geolocation, time_stamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, alias, long_url, user_agent, ip_address, geolocation, time_stamp
            "#,
        )
        .bind(&new_click.alias)
        .bind(&new_click.long_url)
        .bind(&new_click.user_agent)
        .bind(&new_click.ip_address)
        .bind(&new_click.geolocation)
        .bind(new_click.time_stamp)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count_clicks(&self, aliases: &[String]) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clicks WHERE alias = ANY($1)",
        )
        .bind(aliases)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count_unique_visitors(&self, aliases: &[String]) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT ip_address) FROM clicks WHERE alias = ANY($1)",
        )
        .bind(aliases)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn clicks_by_date_since(
        &self,
        aliases: &[String],
        since: DateTime<Utc>,
    ) -> Result<Vec<DateClicks>, AppError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT to_char(time_stamp, 'YYYY-MM-DD') AS date, COUNT(*) AS click_count
            FROM clicks
            WHERE alias = ANY($1) AND time_stamp >= $2
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(aliases)
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, click_count)| DateClicks { date, click_count })
            .collect())
    }

    async fn os_breakdown(&self, aliases: &[String]) -> Result<Vec<OsGroup>, AppError> {
        let rows = sqlx::query_as::<_, (Option<String>, i64)>(
            r#"
            SELECT geolocation->>'os' AS os_name, COUNT(DISTINCT ip_address) AS unique_clicks
            FROM clicks
            WHERE alias = ANY($1)
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(aliases)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(os_name, unique_clicks)| OsGroup {
                os_name,
                unique_clicks,
            })
            .collect())
    }

    async fn device_breakdown(&self, aliases: &[String]) -> Result<Vec<DeviceGroup>, AppError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT geolocation->>'deviceType' AS device_name,
                   COUNT(DISTINCT ip_address) AS unique_clicks
            FROM clicks
            WHERE alias = ANY($1) AND geolocation->>'deviceType' IS NOT NULL
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(aliases)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(device_name, unique_clicks)| DeviceGroup {
                device_name,
                unique_clicks,
            })
            .collect())
    }

    async fn os_breakdown_flat(&self, aliases: &[String]) -> Result<Vec<FlatOsGroup>, AppError> {
        let rows = sqlx::query_as::<_, (Option<String>, i64, i64)>(
            r#"
            SELECT os_name,
                   COUNT(*) AS unique_clicks,
                   COUNT(DISTINCT ip_address) AS unique_users
            FROM clicks
            WHERE alias = ANY($1)
            GROUP BY os_name
            ORDER BY os_name
            "#,
        )
        .bind(aliases)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(os_name, unique_clicks, unique_users)| FlatOsGroup {
                os_name,
                unique_clicks,
                unique_users,
            })
            .collect())
    }

    async fn device_breakdown_flat(
        &self,
        aliases: &[String],
    ) -> Result<Vec<FlatDeviceGroup>, AppError> {
        let rows = sqlx::query_as::<_, (Option<String>, i64, i64)>(
            r#"
            SELECT device_type,
                   COUNT(*) AS unique_clicks,
                   COUNT(DISTINCT ip_address) AS unique_users
            FROM clicks
            WHERE alias = ANY($1)
            GROUP BY device_type
            ORDER BY device_type
            "#,
        )
        .bind(aliases)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(device_name, unique_clicks, unique_users)| FlatDeviceGroup {
                device_name,
                unique_clicks,
                unique_users,
            })
            .collect())
    }
}
