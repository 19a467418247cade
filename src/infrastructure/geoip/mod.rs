//! Geolocation resolver for click enrichment.
//!
//! Best-effort translation of a client IP into coarse location metadata via
//! an external HTTP lookup. Every failure mode (timeout, network error,
//! malformed response) is swallowed to `None`; a redirect is never delayed
//! or failed by geolocation.

mod http_resolver;
mod resolver;

pub use http_resolver::HttpGeoResolver;
pub use resolver::{GeoResolver, NoopGeoResolver};

#[cfg(test)]
pub use resolver::MockGeoResolver;
