//! Short URL entity representing an alias-to-URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL mapping.
///
/// The `alias` is globally unique and serves as the primary lookup key.
/// Mappings are immutable after creation; they are only removed by external
/// administrative action.
#[derive(Debug, Clone)]
pub struct ShortUrl {
    pub id: i64,
    pub alias: String,
    pub long_url: String,
    /// Optional category tag used for topic-scoped analytics.
    pub topic: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        id: i64,
        alias: String,
        long_url: String,
        topic: Option<String>,
        owner_id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            alias,
            long_url,
            topic,
            owner_id,
            created_at,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub alias: String,
    pub long_url: String,
    pub topic: Option<String>,
    pub owner_id: String,
}
