//! Business logic services for the application layer.

pub mod analytics_service;
pub mod identity_service;
pub mod shortener_service;

pub use analytics_service::AnalyticsService;
pub use identity_service::{AuthUser, IdentityProvider, SignedTokenIdentity};
pub use shortener_service::ShortenerService;

#[cfg(test)]
pub use identity_service::MockIdentityProvider;
