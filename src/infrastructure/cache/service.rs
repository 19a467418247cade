//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for the key-value accelerant in front of the record store.
///
/// The cache is strictly a performance optimization: implementations must be
/// thread-safe and fail open so that cache unavailability degrades to direct
/// store access, never to a request error.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed, with TTL
/// - [`crate::infrastructure::cache::MemoryCache`] - process-local TTL map
/// - [`crate::infrastructure::cache::NullCache`] - caching disabled
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with an optional TTL override.
    ///
    /// `ttl_seconds = None` applies the implementation's default TTL.
    ///
    /// # Errors
    ///
    /// Production implementations log errors and return `Ok(())` to avoid
    /// disrupting the request flow.
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes a cached entry.
    ///
    /// Must complete before a mapping mutation is acknowledged so stale
    /// redirect targets cannot outlive their mapping.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
