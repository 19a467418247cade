//! Handlers for the analytics endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::application::reports::{AliasAnalytics, OverallAnalytics, TopicAnalytics};
use crate::application::services::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Per-alias analytics report.
///
/// # Endpoint
///
/// `GET /api/analytics/{alias}`
///
/// An unknown alias is not an error: it simply reports zero-valued
/// aggregates.
pub async fn alias_analytics_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AliasAnalytics>, AppError> {
    let report = state.analytics_service.alias_analytics(&alias).await?;
    Ok(Json(report))
}

/// Topic-scoped analytics report.
///
/// # Endpoint
///
/// `GET /api/analytics/topic/{topic}`
///
/// Also registered at `GET /api/analytics/topic` (no capture), so a blank
/// topic reaches the service and surfaces as a 400 rather than a routing
/// 404.
///
/// # Errors
///
/// Returns 400 if the topic is blank, 404 if it is unknown.
pub async fn topic_analytics_handler(
    topic: Option<Path<String>>,
    State(state): State<AppState>,
) -> Result<Json<TopicAnalytics>, AppError> {
    let topic = topic.map(|Path(t)| t).unwrap_or_default();

    let report = state.analytics_service.topic_analytics(&topic).await?;
    Ok(Json(report))
}

/// Owner-wide analytics report for the authenticated caller.
///
/// # Endpoint
///
/// `GET /api/analytics/overall`
///
/// # Errors
///
/// Returns 401 if unauthenticated, 404 if the caller owns no URLs.
pub async fn overall_analytics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<OverallAnalytics>, AppError> {
    let report = state.analytics_service.overall_analytics(&user.id).await?;
    Ok(Json(report))
}
