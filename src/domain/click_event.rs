//! Queued click capture model for asynchronous processing.

/// An in-memory click capture passed from the redirect handler to the
/// background worker via a channel.
///
/// Decouples the HTTP response from geolocation lookups and database writes:
/// the redirect is issued immediately while enrichment and persistence
/// happen off the request path.
///
/// # Design
///
/// - Carries the resolved long URL so the worker needs no extra lookup,
///   even when the redirect was served from cache
/// - All client metadata is optional to handle missing headers gracefully
///
/// # Usage Flow
///
/// 1. Created in the redirect handler with request metadata
/// 2. Sent to the channel (non-blocking `try_send`)
/// 3. Processed by [`crate::domain::click_worker::run_click_worker`]
/// 4. Converted to [`crate::domain::entities::NewClick`] for persistence
#[derive(Debug, Clone)]
pub struct ClickCapture {
    pub alias: String,
    pub long_url: String,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl ClickCapture {
    /// Creates a new click capture.
    pub fn new(
        alias: String,
        long_url: String,
        ip: Option<String>,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            alias,
            long_url,
            user_agent: user_agent.map(|s| s.to_string()),
            ip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_capture_creation_full() {
        let capture = ClickCapture::new(
            "promo1".to_string(),
            "https://example.com/page".to_string(),
            Some("203.0.113.9".to_string()),
            Some("Mozilla/5.0"),
        );

        assert_eq!(capture.alias, "promo1");
        assert_eq!(capture.long_url, "https://example.com/page");
        assert_eq!(capture.ip, Some("203.0.113.9".to_string()));
        assert_eq!(capture.user_agent, Some("Mozilla/5.0".to_string()));
    }

    #[test]
    fn test_click_capture_creation_minimal() {
        let capture = ClickCapture::new("xyz".to_string(), "https://example.com".to_string(), None, None);

        assert!(capture.ip.is_none());
        assert!(capture.user_agent.is_none());
    }

    #[test]
    fn test_click_capture_clone() {
        let capture = ClickCapture::new(
            "abc".to_string(),
            "https://example.com".to_string(),
            Some("1.1.1.1".to_string()),
            Some("Safari"),
        );

        let cloned = capture.clone();

        assert_eq!(cloned.alias, capture.alias);
        assert_eq!(cloned.ip, capture.ip);
        assert_eq!(cloned.user_agent, capture.user_agent);
    }
}
