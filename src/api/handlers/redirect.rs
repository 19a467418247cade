//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension,
};
use std::net::SocketAddr;
use tracing::warn;

use crate::domain::click_event::ClickCapture;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorten/{alias}`
///
/// # Request Flow
///
/// 1. Resolve the alias (cache first, store fallback, cache populated
///    before the response on a miss)
/// 2. Queue a click capture for the background worker
/// 3. Return 301 Moved Permanently
///
/// # Click Tracking
///
/// Click captures are sent to a bounded channel for async processing.
/// If the queue is full, the click is dropped (fire-and-forget); a full
/// analytics pipeline never delays or fails a redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    // Connect info lands in request extensions when the server is built
    // with `into_make_service_with_connect_info`; absent in handler tests.
    connect_info: Option<Extension<ConnectInfo<SocketAddr>>>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.shortener_service.resolve(&alias).await?;

    let capture = ClickCapture::new(
        alias,
        long_url.clone(),
        extract_client_ip(
            &headers,
            connect_info.map(|Extension(ConnectInfo(addr))| addr),
        ),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    if state.click_sender.try_send(capture).is_err() {
        warn!("Click queue full or closed, dropping click event");
    }

    // axum's Redirect helper has no 301 variant; the status matters here
    // because clients and intermediaries may cache the mapping.
    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, long_url)],
    ))
}
