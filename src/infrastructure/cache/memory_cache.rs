//! Process-local cache implementation with per-key expiry.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory cache with per-key TTL.
///
/// Used for single-process deployments without Redis and in tests where
/// cache hit/miss behavior matters. Expired entries are pruned lazily on
/// read.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates an empty cache with the given default TTL.
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        {
            let entries = self.entries.read().expect("cache lock poisoned");
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: drop the entry under the write lock.
        self.entries
            .write()
            .expect("cache lock poisoned")
            .remove(key);
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let ttl = ttl_seconds.map_or(self.default_ttl, Duration::from_secs);
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };

        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key.to_string(), entry);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.entries
            .write()
            .expect("cache lock poisoned")
            .remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
