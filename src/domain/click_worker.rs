//! Background worker that enriches and persists click events.

use chrono::Utc;
use serde_json::Value;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use woothee::parser::Parser;

use crate::domain::click_event::ClickCapture;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::infrastructure::geoip::GeoResolver;

/// Sentinel woothee uses for fields it cannot classify.
const UA_UNKNOWN: &str = "UNKNOWN";

/// Drains the click channel until every sender is dropped.
///
/// For each capture: resolve geolocation for public client IPs, fold
/// user-agent derived `os` and `deviceType` fields into the geolocation
/// object when the resolver did not provide them, then append the event.
/// Failures are logged and the event is dropped; the worker itself never
/// exits on error.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickCapture>,
    clicks: Arc<dyn ClickRepository>,
    geo: Arc<dyn GeoResolver>,
) {
    info!("Click worker started");

    while let Some(capture) = rx.recv().await {
        process_capture(capture, clicks.as_ref(), geo.as_ref()).await;
    }

    info!("Click channel closed, worker stopping");
}

async fn process_capture(capture: ClickCapture, clicks: &dyn ClickRepository, geo: &dyn GeoResolver) {
    let geolocation = match &capture.ip {
        Some(ip) if !is_local_client(ip) => {
            let resolved = geo.resolve(ip).await;
            resolved.map(|g| enrich_geolocation(g, capture.user_agent.as_deref()))
        }
        Some(ip) => {
            debug!("Skipping geolocation lookup for local client {}", ip);
            None
        }
        None => None,
    };

    let new_click = NewClick {
        alias: capture.alias.clone(),
        long_url: capture.long_url,
        user_agent: capture.user_agent,
        ip_address: capture.ip,
        geolocation,
        time_stamp: Utc::now(),
    };

    if let Err(e) = clicks.record_click(new_click).await {
        error!("Failed to record click for \"{}\": {}", capture.alias, e);
    }
}

/// Loopback and private-range addresses never resolve to anything useful,
/// so the external lookup is skipped for them.
fn is_local_client(ip: &str) -> bool {
    match ip.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => v4.is_loopback() || v4.is_private() || v4.is_link_local(),
        Ok(IpAddr::V6(v6)) => v6.is_loopback(),
        Err(_) => true,
    }
}

/// Adds `os` and `deviceType` fields derived from the user agent when the
/// resolver response lacks them. Resolver-provided values always win.
fn enrich_geolocation(mut geo: Value, user_agent: Option<&str>) -> Value {
    let Some(obj) = geo.as_object_mut() else {
        return geo;
    };

    let parsed = user_agent.and_then(|ua| Parser::new().parse(ua));
    let Some(parsed) = parsed else {
        return geo;
    };

    if !obj.contains_key("os") && parsed.os != UA_UNKNOWN {
        obj.insert("os".to_string(), Value::String(parsed.os.to_string()));
    }
    if !obj.contains_key("deviceType") && parsed.category != UA_UNKNOWN {
        obj.insert(
            "deviceType".to_string(),
            Value::String(parsed.category.to_string()),
        );
    }

    geo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Click;
    use crate::domain::repositories::MockClickRepository;
    use crate::infrastructure::geoip::MockGeoResolver;
    use serde_json::json;

    const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    fn persisted(new_click: &NewClick) -> Click {
        Click {
            id: 1,
            alias: new_click.alias.clone(),
            long_url: new_click.long_url.clone(),
            user_agent: new_click.user_agent.clone(),
            ip_address: new_click.ip_address.clone(),
            geolocation: new_click.geolocation.clone(),
            time_stamp: new_click.time_stamp,
        }
    }

    #[test]
    fn test_is_local_client() {
        assert!(is_local_client("127.0.0.1"));
        assert!(is_local_client("10.1.2.3"));
        assert!(is_local_client("192.168.0.5"));
        assert!(is_local_client("::1"));
        assert!(is_local_client("not-an-ip"));
        assert!(!is_local_client("203.0.113.9"));
        assert!(!is_local_client("8.8.8.8"));
    }

    #[test]
    fn test_enrich_adds_os_and_device_type() {
        let geo = enrich_geolocation(json!({ "country": "DE" }), Some(CHROME_WINDOWS));

        assert_eq!(geo["country"], "DE");
        assert_eq!(geo["os"], "Windows 10");
        assert_eq!(geo["deviceType"], "pc");
    }

    #[test]
    fn test_enrich_keeps_resolver_values() {
        let geo = enrich_geolocation(
            json!({ "os": "FromApi", "deviceType": "tablet" }),
            Some(CHROME_WINDOWS),
        );

        assert_eq!(geo["os"], "FromApi");
        assert_eq!(geo["deviceType"], "tablet");
    }

    #[test]
    fn test_enrich_without_user_agent() {
        let geo = enrich_geolocation(json!({ "country": "DE" }), None);

        assert_eq!(geo, json!({ "country": "DE" }));
    }

    #[tokio::test]
    async fn test_worker_persists_enriched_click() {
        let mut geo = MockGeoResolver::new();
        geo.expect_resolve()
            .withf(|ip| ip == "203.0.113.9")
            .times(1)
            .returning(|_| Some(json!({ "country": "DE" })));

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record_click()
            .withf(|c| {
                c.alias == "promo1"
                    && c.ip_address.as_deref() == Some("203.0.113.9")
                    && c.geolocation.as_ref().is_some_and(|g| g["os"] == "Windows 10")
            })
            .times(1)
            .returning(|c| Ok(persisted(&c)));

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(clicks), Arc::new(geo)));

        tx.send(ClickCapture::new(
            "promo1".to_string(),
            "https://example.com".to_string(),
            Some("203.0.113.9".to_string()),
            Some(CHROME_WINDOWS),
        ))
        .await
        .unwrap();

        drop(tx);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_skips_lookup_for_local_client() {
        let mut geo = MockGeoResolver::new();
        geo.expect_resolve().times(0);

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record_click()
            .withf(|c| c.geolocation.is_none() && c.ip_address.as_deref() == Some("127.0.0.1"))
            .times(1)
            .returning(|c| Ok(persisted(&c)));

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(clicks), Arc::new(geo)));

        tx.send(ClickCapture::new(
            "promo1".to_string(),
            "https://example.com".to_string(),
            Some("127.0.0.1".to_string()),
            None,
        ))
        .await
        .unwrap();

        drop(tx);
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_persistence_error() {
        let geo = MockGeoResolver::new();

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record_click()
            .times(2)
            .returning(|c| {
                if c.alias == "bad" {
                    Err(crate::error::AppError::internal(
                        "Internal Server Error",
                        serde_json::json!({}),
                    ))
                } else {
                    Ok(persisted(&c))
                }
            });

        let (tx, rx) = mpsc::channel(8);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(clicks), Arc::new(geo)));

        for alias in ["bad", "good"] {
            tx.send(ClickCapture::new(
                alias.to_string(),
                "https://example.com".to_string(),
                None,
                None,
            ))
            .await
            .unwrap();
        }

        drop(tx);
        worker.await.unwrap();
    }
}
