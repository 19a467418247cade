//! API route configuration.

use crate::api::handlers::{
    alias_analytics_handler, overall_analytics_handler, redirect_handler, shorten_handler,
    topic_analytics_handler,
};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Routes requiring Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /shorten`            - Create a short URL
/// - `GET  /shorten/{alias}`    - Redirect to the long URL
/// - `GET  /analytics/overall`  - Owner-wide analytics report
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/{alias}", get(redirect_handler))
        .route("/analytics/overall", get(overall_analytics_handler))
}

/// Public analytics routes.
///
/// # Endpoints
///
/// - `GET /analytics/{alias}`        - Per-alias analytics report
/// - `GET /analytics/topic/{topic}`  - Topic-scoped analytics report
/// - `GET /analytics/topic`          - Same handler; a blank topic is a 400,
///   not a routing miss
///
/// Static segments win over captures, so `/analytics/topic` and
/// `/analytics/overall` are never swallowed by the `{alias}` route.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/topic", get(topic_analytics_handler))
        .route("/analytics/topic/{topic}", get(topic_analytics_handler))
        .route("/analytics/{alias}", get(alias_analytics_handler))
}
