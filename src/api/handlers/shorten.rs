//! Handler for the alias creation endpoint.

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new short URL owned by the authenticated caller.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/page",
///   "customAlias": "promo1",   // optional
///   "topic": "marketing"       // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created` with:
///
/// ```json
/// {
///   "shortUrl": "https://sho.rt/api/shorten/promo1",
///   "createdAt": "2026-08-31T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if `longUrl` is missing or the alias is already taken.
/// Returns 401 if the caller is not authenticated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let created = state
        .shortener_service
        .create_alias(
            payload.long_url,
            payload.custom_alias,
            payload.topic,
            &user.id,
        )
        .await?;

    let response = ShortenResponse {
        short_url: state.shortener_service.short_url_for(&created.alias),
        created_at: created.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
