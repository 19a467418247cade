//! DTOs for the alias creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create a short URL.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to shorten. Required; its absence is a 400, not a
    /// deserialization failure, so the error message stays under our control.
    #[serde(rename = "longUrl")]
    pub long_url: Option<String>,

    /// Optional custom alias, used verbatim when present.
    #[serde(rename = "customAlias")]
    pub custom_alias: Option<String>,

    /// Optional category tag for topic-scoped analytics.
    pub topic: Option<String>,
}

/// Response for a created alias.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// Fully qualified short URL.
    #[serde(rename = "shortUrl")]
    pub short_url: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
