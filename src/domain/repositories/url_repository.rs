//! Repository trait for short URL mappings.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the authoritative mapping store.
///
/// The store enforces alias uniqueness: `create` is the only write path and
/// the unique constraint on the alias column is the sole concurrency-safety
/// mechanism for create races: two concurrent creates with the same alias
/// result in exactly one success and one [`AppError::Conflict`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the alias already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Point lookup by alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Existence check by alias, used before accepting a custom alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_by_alias(&self, alias: &str) -> Result<bool, AppError>;

    /// All mappings tagged with a topic.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_topic(&self, topic: &str) -> Result<Vec<ShortUrl>, AppError>;

    /// All mappings owned by an authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<ShortUrl>, AppError>;
}
