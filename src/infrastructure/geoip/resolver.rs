//! Geolocation resolver trait.

use async_trait::async_trait;
use serde_json::Value;

/// Trait for IP-to-geolocation lookups.
///
/// Returns whatever metadata the backing source produces as a JSON object;
/// downstream consumers read the optional `os` and `deviceType` fields and
/// degrade gracefully when they are absent.
///
/// # Implementations
///
/// - [`crate::infrastructure::geoip::HttpGeoResolver`] - external HTTP API
/// - [`NoopGeoResolver`] - lookups disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolves a client IP to location metadata.
    ///
    /// `None` means "no data": unknown IP, lookup failure, or lookups
    /// disabled. Never returns an error.
    async fn resolve(&self, ip: &str) -> Option<Value>;
}

/// Resolver that never returns data.
///
/// Used when no geolocation endpoint is configured and in tests.
pub struct NoopGeoResolver;

#[async_trait]
impl GeoResolver for NoopGeoResolver {
    async fn resolve(&self, _ip: &str) -> Option<Value> {
        None
    }
}
