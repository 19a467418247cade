//! Caching layer for fast redirects and analytics reports.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`MemoryCache`] - Process-local TTL map for tests and Redis-less runs
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! The [`keys`] module owns the cache key namespaces; their exact format is
//! a compatibility contract with any pre-existing cache warm state.

mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub mod keys;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
