//! Click entity representing a recorded visit to a shortened URL.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A persisted click event.
///
/// Click events are append-only and immutable. The `alias` is a loose
/// reference (no foreign key): a click may outlive its mapping. `long_url`
/// is a denormalized copy taken at capture time.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub alias: String,
    pub long_url: String,
    pub user_agent: Option<String>,
    /// Absent for local/loopback clients.
    pub ip_address: Option<String>,
    /// Resolver metadata; carries at least `os` and `deviceType` when the
    /// lookup produced them. Null when the client was local or the lookup
    /// failed.
    pub geolocation: Option<Value>,
    pub time_stamp: DateTime<Utc>,
}

/// Input data for appending a click event.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub alias: String,
    pub long_url: String,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub geolocation: Option<Value>,
    pub time_stamp: DateTime<Utc>,
}
