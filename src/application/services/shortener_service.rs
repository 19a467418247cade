//! Alias creation and redirect resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{keys, CacheService};
use crate::utils::alias_generator::generate_alias;

/// Length of generated aliases.
const GENERATED_ALIAS_LENGTH: usize = 8;

/// Collision retries for generated aliases before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service for creating aliases and resolving them to their targets.
///
/// The resolve path is cache-aside: a hit on `shortUrl:<alias>` is treated
/// as authoritative, a miss falls back to the store and populates the cache
/// before the target is returned. Cache failures degrade to direct store
/// access; they are logged and never surfaced to the caller.
pub struct ShortenerService {
    urls: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    base_url: String,
}

impl ShortenerService {
    /// Creates a new shortener service.
    ///
    /// `base_url` is the externally addressable origin used to build fully
    /// qualified short URLs, e.g. `https://sho.rt`.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        base_url: String,
    ) -> Self {
        Self {
            urls,
            cache,
            base_url,
        }
    }

    /// Creates a new alias-to-URL mapping.
    ///
    /// Uses `custom_alias` verbatim when given; otherwise generates an
    /// 8-character identifier, retrying a bounded number of times on
    /// collision. The store's unique constraint remains the final arbiter
    /// for create races: a lost race surfaces as [`AppError::Conflict`]
    /// even after the pre-check passed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is missing or blank.
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_alias(
        &self,
        long_url: Option<String>,
        custom_alias: Option<String>,
        topic: Option<String>,
        owner_id: &str,
    ) -> Result<ShortUrl, AppError> {
        let long_url = match long_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                return Err(AppError::bad_request(
                    "longUrl is required.",
                    json!({ "field": "longUrl" }),
                ));
            }
        };

        let alias = if let Some(custom) = custom_alias {
            if self.urls.exists_by_alias(&custom).await? {
                return Err(AppError::conflict(
                    "Custom Alias is already in use",
                    json!({ "alias": custom }),
                ));
            }
            custom
        } else {
            self.generate_unique_alias().await?
        };

        let created = self
            .urls
            .create(NewShortUrl {
                alias,
                long_url,
                topic,
                owner_id: owner_id.to_string(),
            })
            .await?;

        // The alias is brand new, but a stale entry could survive from a
        // previously deleted mapping with the same alias.
        if let Err(e) = self.cache.invalidate(&keys::short_url(&created.alias)).await {
            warn!("Cache invalidation failed for \"{}\": {}", created.alias, e);
        }

        Ok(created)
    }

    /// Resolves an alias to its long URL, cache first.
    ///
    /// On a store hit the cache entry is written before the target is
    /// returned, so a miss is paid at most once per TTL window.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is unknown.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        let cache_key = keys::short_url(alias);

        match self.cache.get(&cache_key).await {
            Ok(Some(long_url)) => return Ok(long_url),
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for \"{}\": {}", alias, e),
        }

        let mapping = self.urls.find_by_alias(alias).await?.ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "alias": alias }))
        })?;

        if let Err(e) = self.cache.set_ex(&cache_key, &mapping.long_url, None).await {
            warn!("Cache populate failed for \"{}\": {}", alias, e);
        }

        Ok(mapping.long_url)
    }

    /// Constructs the fully qualified short URL for an alias.
    pub fn short_url_for(&self, alias: &str) -> String {
        format!(
            "{}/api/shorten/{}",
            self.base_url.trim_end_matches('/'),
            alias
        )
    }

    /// Generates an alias not currently present in the store.
    ///
    /// The window between this check and the insert is closed by the unique
    /// constraint, not here.
    async fn generate_unique_alias(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let alias = generate_alias(GENERATED_ALIAS_LENGTH);

            if !self.urls.exists_by_alias(&alias).await? {
                return Ok(alias);
            }
        }

        Err(AppError::internal(
            "Internal Server Error",
            json!({ "reason": "Alias generation exhausted retry budget" }),
        ))
    }
}
