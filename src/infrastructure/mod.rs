//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer:
//!
//! - [`cache`] - Caching abstractions (Redis, in-memory, and no-op)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`geoip`] - Geolocation resolver (external HTTP lookup)

pub mod cache;
pub mod geoip;
pub mod persistence;
