//! Repository trait for click recording and aggregation queries.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Clicks bucketed by calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateClicks {
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    pub click_count: i64,
}

/// Distinct-visitor count per operating system, grouped by the nested
/// `geolocation.os` field. A missing value still forms a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsGroup {
    pub os_name: Option<String>,
    pub unique_clicks: i64,
}

/// Distinct-visitor count per device type, grouped by the nested
/// `geolocation.deviceType` field. Events without a device type are
/// excluded before grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceGroup {
    pub device_name: String,
    pub unique_clicks: i64,
}

/// Event and distinct-visitor counts per OS, grouped by the flattened
/// `os_name` column (the overall-analytics variant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatOsGroup {
    pub os_name: Option<String>,
    pub unique_clicks: i64,
    pub unique_users: i64,
}

/// Event and distinct-visitor counts per device type, grouped by the
/// flattened `device_type` column (the overall-analytics variant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatDeviceGroup {
    pub device_name: Option<String>,
    pub unique_clicks: i64,
    pub unique_users: i64,
}

/// Repository interface for click events and their aggregations.
///
/// Every aggregation is scoped by a set of aliases, so single-alias, topic,
/// and per-user reports share the same queries. Distinct IP addresses stand
/// in for unique visitors throughout.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Total number of clicks across the given aliases.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_clicks(&self, aliases: &[String]) -> Result<i64, AppError>;

    /// Number of distinct client IP addresses across the given aliases.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_unique_visitors(&self, aliases: &[String]) -> Result<i64, AppError>;

    /// Day-bucketed click counts since `since`, ascending by date.
    ///
    /// Only days with at least one click appear; no zero-filling.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn clicks_by_date_since(
        &self,
        aliases: &[String],
        since: DateTime<Utc>,
    ) -> Result<Vec<DateClicks>, AppError>;

    /// Distinct-visitor counts grouped by `geolocation.os`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn os_breakdown(&self, aliases: &[String]) -> Result<Vec<OsGroup>, AppError>;

    /// Distinct-visitor counts grouped by `geolocation.deviceType`,
    /// excluding events without one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn device_breakdown(&self, aliases: &[String]) -> Result<Vec<DeviceGroup>, AppError>;

    /// Event and visitor counts grouped by the flattened `os_name` column.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn os_breakdown_flat(&self, aliases: &[String]) -> Result<Vec<FlatOsGroup>, AppError>;

    /// Event and visitor counts grouped by the flattened `device_type`
    /// column.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn device_breakdown_flat(
        &self,
        aliases: &[String],
    ) -> Result<Vec<FlatDeviceGroup>, AppError>;
}
