//! Analytics aggregation service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::application::reports::{
    AliasAnalytics, DateClickEntry, DeviceTypeEntry, OsTypeEntry, OverallAnalytics,
    OverallDeviceEntry, OverallOsEntry, TopicAnalytics, TopicUrlEntry,
};
use crate::domain::repositories::{ClickRepository, UrlRepository};
use crate::error::AppError;
use crate::infrastructure::cache::{keys, CacheService};

/// Trailing window of the day-bucketed click series.
const CLICK_SERIES_DAYS: i64 = 7;

/// Service computing aggregated click analytics.
///
/// All three reads share the same shape: cache-check, compute from the
/// store on a miss, populate the cache (1-hour TTL), return. The cache is
/// best-effort throughout; a failed get or set degrades to direct store
/// aggregation.
pub struct AnalyticsService {
    urls: Arc<dyn UrlRepository>,
    clicks: Arc<dyn ClickRepository>,
    cache: Arc<dyn CacheService>,
    base_url: String,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        clicks: Arc<dyn ClickRepository>,
        cache: Arc<dyn CacheService>,
        base_url: String,
    ) -> Self {
        Self {
            urls,
            clicks,
            cache,
            base_url,
        }
    }

    /// Per-alias report.
    ///
    /// A leading `:` is trimmed before the cache key is built, matching the
    /// topic path; route captures from pattern-style clients sometimes carry
    /// one. Deliberately performs no existence check against the mapping
    /// table: an alias with zero recorded events yields zero-valued
    /// aggregates rather than a not-found error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn alias_analytics(&self, alias: &str) -> Result<AliasAnalytics, AppError> {
        let alias = alias.trim_start_matches(':');
        let cache_key = keys::alias_analytics(alias);

        if let Some(report) = self.cached_report(&cache_key).await {
            return Ok(report);
        }

        let aliases = [alias.to_string()];
        let since = Utc::now() - Duration::days(CLICK_SERIES_DAYS);

        let total_clicks = self.clicks.count_clicks(&aliases).await?;
        let unique_users = self.clicks.count_unique_visitors(&aliases).await?;
        let clicks_by_date = self
            .clicks
            .clicks_by_date_since(&aliases, since)
            .await?
            .into_iter()
            .map(|d| DateClickEntry {
                date: d.date,
                click_count: d.click_count,
            })
            .collect();
        let os_type = self
            .clicks
            .os_breakdown(&aliases)
            .await?
            .into_iter()
            .map(|g| OsTypeEntry {
                os_name: g.os_name,
                unique_clicks: g.unique_clicks,
            })
            .collect();
        let device_type = self
            .clicks
            .device_breakdown(&aliases)
            .await?
            .into_iter()
            .map(|g| DeviceTypeEntry {
                device_name: g.device_name,
                unique_clicks: g.unique_clicks,
            })
            .collect();

        let report = AliasAnalytics {
            total_clicks,
            unique_users,
            clicks_by_date,
            os_type,
            device_type,
        };

        self.store_report(&cache_key, &report).await;
        Ok(report)
    }

    /// Topic-scoped report across every alias tagged with `topic`.
    ///
    /// A leading `:` is trimmed before validation; route captures from
    /// pattern-style clients sometimes carry one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the topic is blank.
    /// Returns [`AppError::NotFound`] if no mapping carries the topic.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn topic_analytics(&self, topic: &str) -> Result<TopicAnalytics, AppError> {
        let topic = topic.trim_start_matches(':');
        if topic.is_empty() {
            return Err(AppError::bad_request(
                "Topic is required",
                json!({ "field": "topic" }),
            ));
        }

        let cache_key = keys::topic_analytics(topic);

        if let Some(report) = self.cached_report(&cache_key).await {
            return Ok(report);
        }

        let mappings = self.urls.find_by_topic(topic).await?;
        if mappings.is_empty() {
            return Err(AppError::not_found(
                "Topic not found",
                json!({ "topic": topic }),
            ));
        }

        let aliases: Vec<String> = mappings.iter().map(|m| m.alias.clone()).collect();
        let since = Utc::now() - Duration::days(CLICK_SERIES_DAYS);

        let total_clicks = self.clicks.count_clicks(&aliases).await?;
        let unique_users = self.clicks.count_unique_visitors(&aliases).await?;
        let clicks_by_date = self
            .clicks
            .clicks_by_date_since(&aliases, since)
            .await?
            .into_iter()
            .map(|d| DateClickEntry {
                date: d.date,
                click_count: d.click_count,
            })
            .collect();

        let mut urls = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let single = std::slice::from_ref(&mapping.alias);
            urls.push(TopicUrlEntry {
                short_url: self.short_url_for(&mapping.alias),
                total_clicks: self.clicks.count_clicks(single).await?,
                unique_users: self.clicks.count_unique_visitors(single).await?,
            });
        }

        let report = TopicAnalytics {
            topic: topic.to_string(),
            total_clicks,
            unique_users,
            clicks_by_date,
            urls,
        };

        self.store_report(&cache_key, &report).await;
        Ok(report)
    }

    /// Owner-wide report across every alias the identity owns.
    ///
    /// Groups OS and device breakdowns by the flattened `os_name` and
    /// `device_type` columns, not the nested geolocation fields the
    /// per-alias variant reads.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identity owns no mappings.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn overall_analytics(&self, owner_id: &str) -> Result<OverallAnalytics, AppError> {
        let cache_key = keys::overall_analytics(owner_id);

        if let Some(report) = self.cached_report(&cache_key).await {
            return Ok(report);
        }

        let mappings = self.urls.find_by_owner(owner_id).await?;
        if mappings.is_empty() {
            return Err(AppError::not_found(
                "No URLs found for this user.",
                json!({ "owner_id": owner_id }),
            ));
        }

        let aliases: Vec<String> = mappings.iter().map(|m| m.alias.clone()).collect();
        let since = Utc::now() - Duration::days(CLICK_SERIES_DAYS);

        let total_clicks = self.clicks.count_clicks(&aliases).await?;
        let unique_users = self.clicks.count_unique_visitors(&aliases).await?;
        let clicks_by_date = self
            .clicks
            .clicks_by_date_since(&aliases, since)
            .await?
            .into_iter()
            .map(|d| DateClickEntry {
                date: d.date,
                click_count: d.click_count,
            })
            .collect();
        let os_type = self
            .clicks
            .os_breakdown_flat(&aliases)
            .await?
            .into_iter()
            .map(|g| OverallOsEntry {
                os_name: g.os_name,
                unique_clicks: g.unique_clicks,
                unique_users: g.unique_users,
            })
            .collect();
        let device_type = self
            .clicks
            .device_breakdown_flat(&aliases)
            .await?
            .into_iter()
            .map(|g| OverallDeviceEntry {
                device_name: g.device_name,
                unique_clicks: g.unique_clicks,
                unique_users: g.unique_users,
            })
            .collect();

        let report = OverallAnalytics {
            total_urls: mappings.len() as i64,
            total_clicks,
            unique_users,
            clicks_by_date,
            os_type,
            device_type,
        };

        self.store_report(&cache_key, &report).await;
        Ok(report)
    }

    fn short_url_for(&self, alias: &str) -> String {
        format!(
            "{}/api/shorten/{}",
            self.base_url.trim_end_matches('/'),
            alias
        )
    }

    /// Cache read; any failure (unreachable cache, undecodable entry) is a
    /// miss.
    async fn cached_report<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(report) => Some(report),
                Err(e) => {
                    warn!("Discarding undecodable cache entry \"{}\": {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Cache lookup failed for \"{}\": {}", key, e);
                None
            }
        }
    }

    /// Cache write; best-effort.
    async fn store_report<T: Serialize>(&self, key: &str, report: &T) {
        match serde_json::to_string(report) {
            Ok(encoded) => {
                if let Err(e) = self.cache.set_ex(key, &encoded, None).await {
                    warn!("Cache populate failed for \"{}\": {}", key, e);
                }
            }
            Err(e) => warn!("Failed to encode report for \"{}\": {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortUrl;
    use crate::domain::repositories::{
        DateClicks, DeviceGroup, FlatDeviceGroup, FlatOsGroup, MockClickRepository,
        MockUrlRepository, OsGroup,
    };
    use crate::infrastructure::cache::MemoryCache;

    fn service(urls: MockUrlRepository, clicks: MockClickRepository) -> AnalyticsService {
        AnalyticsService::new(
            Arc::new(urls),
            Arc::new(clicks),
            Arc::new(MemoryCache::new(3600)),
            "https://sho.rt".to_string(),
        )
    }

    fn test_mapping(id: i64, alias: &str, topic: Option<&str>, owner: &str) -> ShortUrl {
        ShortUrl::new(
            id,
            alias.to_string(),
            format!("https://example.com/{alias}"),
            topic.map(|t| t.to_string()),
            owner.to_string(),
            Utc::now(),
        )
    }

    fn expect_totals(clicks: &mut MockClickRepository, total: i64, unique: i64) {
        clicks
            .expect_count_clicks()
            .times(1)
            .returning(move |_| Ok(total));
        clicks
            .expect_count_unique_visitors()
            .times(1)
            .returning(move |_| Ok(unique));
        clicks
            .expect_clicks_by_date_since()
            .times(1)
            .withf(|_, since| {
                // The series window is the trailing 7 days.
                let window = Utc::now() - *since;
                window >= Duration::days(7) && window < Duration::days(7) + Duration::minutes(1)
            })
            .returning(|_, _| {
                Ok(vec![DateClicks {
                    date: "2026-08-30".to_string(),
                    click_count: 2,
                }])
            });
    }

    #[tokio::test]
    async fn test_alias_analytics_aggregates() {
        let urls = MockUrlRepository::new();
        let mut clicks = MockClickRepository::new();

        expect_totals(&mut clicks, 5, 3);
        clicks.expect_os_breakdown().times(1).returning(|_| {
            Ok(vec![OsGroup {
                os_name: Some("Windows 10".to_string()),
                unique_clicks: 3,
            }])
        });
        clicks.expect_device_breakdown().times(1).returning(|_| {
            Ok(vec![DeviceGroup {
                device_name: "pc".to_string(),
                unique_clicks: 3,
            }])
        });

        let service = service(urls, clicks);

        let report = service.alias_analytics("promo1").await.unwrap();

        assert_eq!(report.total_clicks, 5);
        assert_eq!(report.unique_users, 3);
        assert_eq!(report.clicks_by_date.len(), 1);
        assert_eq!(report.os_type[0].os_name.as_deref(), Some("Windows 10"));
        assert_eq!(report.device_type[0].device_name, "pc");
    }

    #[tokio::test]
    async fn test_alias_analytics_zero_events_is_not_an_error() {
        let urls = MockUrlRepository::new();
        let mut clicks = MockClickRepository::new();

        clicks.expect_count_clicks().times(1).returning(|_| Ok(0));
        clicks
            .expect_count_unique_visitors()
            .times(1)
            .returning(|_| Ok(0));
        clicks
            .expect_clicks_by_date_since()
            .times(1)
            .returning(|_, _| Ok(vec![]));
        clicks.expect_os_breakdown().times(1).returning(|_| Ok(vec![]));
        clicks
            .expect_device_breakdown()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(urls, clicks);

        let report = service.alias_analytics("never-created").await.unwrap();

        assert_eq!(report.total_clicks, 0);
        assert_eq!(report.unique_users, 0);
        assert!(report.clicks_by_date.is_empty());
    }

    #[tokio::test]
    async fn test_alias_analytics_second_call_served_from_cache() {
        let urls = MockUrlRepository::new();
        let mut clicks = MockClickRepository::new();

        // All aggregation queries run exactly once despite two calls.
        expect_totals(&mut clicks, 5, 3);
        clicks.expect_os_breakdown().times(1).returning(|_| Ok(vec![]));
        clicks
            .expect_device_breakdown()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(urls, clicks);

        let first = service.alias_analytics("promo1").await.unwrap();
        let second = service.alias_analytics("promo1").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_alias_analytics_trims_leading_colon() {
        let urls = MockUrlRepository::new();
        let mut clicks = MockClickRepository::new();

        // Aggregation sees the sanitized alias, and the report lands under
        // the sanitized cache key: the bare-alias call below must be a hit.
        clicks
            .expect_count_clicks()
            .times(1)
            .withf(|aliases| aliases == ["promo1"])
            .returning(|_| Ok(0));
        clicks
            .expect_count_unique_visitors()
            .times(1)
            .returning(|_| Ok(0));
        clicks
            .expect_clicks_by_date_since()
            .times(1)
            .returning(|_, _| Ok(vec![]));
        clicks.expect_os_breakdown().times(1).returning(|_| Ok(vec![]));
        clicks
            .expect_device_breakdown()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(urls, clicks);

        let first = service.alias_analytics(":promo1").await.unwrap();
        let second = service.alias_analytics("promo1").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_topic_analytics_blank_topic() {
        let service = service(MockUrlRepository::new(), MockClickRepository::new());

        for raw in ["", ":"] {
            let err = service.topic_analytics(raw).await.unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }));
            assert_eq!(err.to_string(), "Topic is required");
        }
    }

    #[tokio::test]
    async fn test_topic_analytics_unknown_topic() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_topic()
            .withf(|topic| topic == "ghost")
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(urls, MockClickRepository::new());

        let err = service.topic_analytics("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Topic not found");
    }

    #[tokio::test]
    async fn test_topic_analytics_per_url_breakdown() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_topic().times(1).returning(|topic| {
            Ok(vec![
                test_mapping(1, "a1", Some(topic), "user-1"),
                test_mapping(2, "a2", Some(topic), "user-2"),
            ])
        });

        let mut clicks = MockClickRepository::new();
        // One aggregate call over both aliases, then one per alias.
        clicks
            .expect_count_clicks()
            .times(3)
            .returning(|aliases| Ok(aliases.len() as i64 * 10));
        clicks
            .expect_count_unique_visitors()
            .times(3)
            .returning(|aliases| Ok(aliases.len() as i64));
        clicks
            .expect_clicks_by_date_since()
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = service(urls, clicks);

        let report = service.topic_analytics("marketing").await.unwrap();

        assert_eq!(report.topic, "marketing");
        assert_eq!(report.total_clicks, 20);
        assert_eq!(report.urls.len(), 2);
        assert_eq!(report.urls[0].short_url, "https://sho.rt/api/shorten/a1");
        assert_eq!(report.urls[0].total_clicks, 10);
    }

    #[tokio::test]
    async fn test_topic_analytics_trims_leading_colon() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_topic()
            .withf(|topic| topic == "marketing")
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(urls, MockClickRepository::new());

        // Sanitized to "marketing", which is unknown here.
        let err = service.topic_analytics(":marketing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_overall_analytics_no_owned_urls() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_owner()
            .withf(|owner| owner == "user-9")
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(urls, MockClickRepository::new());

        let err = service.overall_analytics("user-9").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "No URLs found for this user.");
    }

    #[tokio::test]
    async fn test_overall_analytics_aggregates() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_owner().times(1).returning(|owner| {
            Ok(vec![
                test_mapping(1, "a1", None, owner),
                test_mapping(2, "a2", None, owner),
            ])
        });

        let mut clicks = MockClickRepository::new();
        expect_totals(&mut clicks, 12, 4);
        clicks.expect_os_breakdown_flat().times(1).returning(|_| {
            Ok(vec![FlatOsGroup {
                os_name: None,
                unique_clicks: 12,
                unique_users: 4,
            }])
        });
        clicks
            .expect_device_breakdown_flat()
            .times(1)
            .returning(|_| {
                Ok(vec![FlatDeviceGroup {
                    device_name: None,
                    unique_clicks: 12,
                    unique_users: 4,
                }])
            });

        let service = service(urls, clicks);

        let report = service.overall_analytics("user-1").await.unwrap();

        assert_eq!(report.total_urls, 2);
        assert_eq!(report.total_clicks, 12);
        assert_eq!(report.os_type[0].os_name, None);
        assert_eq!(report.os_type[0].unique_clicks, 12);
        assert_eq!(report.device_type[0].unique_users, 4);
    }

    #[tokio::test]
    async fn test_overall_analytics_cached_per_owner() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_owner()
            .times(1)
            .returning(|owner| Ok(vec![test_mapping(1, "a1", None, owner)]));

        let mut clicks = MockClickRepository::new();
        expect_totals(&mut clicks, 1, 1);
        clicks
            .expect_os_breakdown_flat()
            .times(1)
            .returning(|_| Ok(vec![]));
        clicks
            .expect_device_breakdown_flat()
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(urls, clicks);

        let first = service.overall_analytics("user-1").await.unwrap();
        let second = service.overall_analytics("user-1").await.unwrap();

        assert_eq!(first, second);
    }
}
