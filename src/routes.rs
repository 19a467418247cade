//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                      - Health check: DB, cache, click queue (public)
//! - `POST /api/shorten`                 - Create a short URL (Bearer token)
//! - `GET  /api/shorten/{alias}`         - Redirect (Bearer token)
//! - `GET  /api/analytics/{alias}`       - Per-alias report (public)
//! - `GET  /api/analytics/topic/{topic}` - Topic report (public)
//! - `GET  /api/analytics/overall`       - Owner report (Bearer token)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (stricter on authenticated routes)
//! - **Authentication** - Bearer token resolved to an identity
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{middleware, Router};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer());

    let public = api::routes::public_routes().layer(rate_limit::layer());

    let api_router = Router::new().merge(protected).merge(public);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
