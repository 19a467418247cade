//! HTTP-backed geolocation resolver.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{trace, warn};
use ureq::Agent;

use super::resolver::GeoResolver;

/// Request timeout for the lookup.
///
/// The redirect path never waits on this directly (lookups run in the
/// background worker), but a stuck lookup would still delay click
/// persistence, so the bound is kept tight.
const HTTP_TIMEOUT_SECS: u64 = 2;

/// Shared HTTP agent (`ureq::Agent` is `Send + Sync`).
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

/// Geolocation resolver backed by an ipinfo-style HTTP API.
///
/// The URL template uses `{ip}` as a placeholder, e.g.
/// `https://ipinfo.io/{ip}/json`. An optional token is sent as the `token`
/// query parameter. The synchronous HTTP call runs on the blocking thread
/// pool so the async runtime is never stalled.
pub struct HttpGeoResolver {
    url_template: String,
    token: Option<String>,
}

impl HttpGeoResolver {
    /// Creates a resolver for the given URL template and optional API token.
    pub fn new(url_template: impl Into<String>, token: Option<String>) -> Self {
        Self {
            url_template: url_template.into(),
            token,
        }
    }

    fn build_url(&self, ip: &str) -> String {
        let base = self.url_template.replace("{ip}", ip);
        match &self.token {
            Some(token) if !token.is_empty() => {
                let sep = if base.contains('?') { '&' } else { '?' };
                format!("{}{}token={}", base, sep, token)
            }
            _ => base,
        }
    }

    /// Fetches geolocation data (synchronous, called inside `spawn_blocking`).
    fn fetch_sync(url: String) -> Option<Value> {
        let agent = get_agent();

        let resp = match agent.get(&url).call() {
            Ok(r) => r,
            Err(e) => {
                warn!("Geolocation request to \"{}\" failed: {}", url, e);
                return None;
            }
        };

        let json: Value = match resp.into_body().read_json() {
            Ok(j) => j,
            Err(e) => {
                warn!("Geolocation response from \"{}\" parse failed: {}", url, e);
                return None;
            }
        };

        // ip-api.com style error envelope; other providers return plain 4xx.
        if json["status"].as_str() == Some("fail") {
            trace!("Geolocation API returned fail status for {}", url);
            return None;
        }

        json.is_object().then_some(json)
    }
}

#[async_trait]
impl GeoResolver for HttpGeoResolver {
    async fn resolve(&self, ip: &str) -> Option<Value> {
        let url = self.build_url(ip);

        tokio::task::spawn_blocking(move || Self::fetch_sync(url))
            .await
            .unwrap_or_else(|e| {
                warn!("Geolocation spawn_blocking failed: {}", e);
                None
            })
    }
}
