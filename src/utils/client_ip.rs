//! Client IP extraction from request headers and the peer socket address.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Extracts the client IP for click tracking.
///
/// Prefers the first entry of `X-Forwarded-For` (the original client when a
/// reverse proxy is in front), falling back to the peer socket address.
/// IPv4-mapped IPv6 addresses are unwrapped so `::ffff:1.2.3.4` and
/// `1.2.3.4` count as the same visitor.
///
/// Returns `None` when neither source yields an address.
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
    {
        let first = first.trim();
        if !first.is_empty() {
            return Some(strip_v4_mapping(first));
        }
    }

    peer.map(|addr| strip_v4_mapping(&addr.ip().to_string()))
}

fn strip_v4_mapping(ip: &str) -> String {
    ip.strip_prefix("::ffff:").unwrap_or(ip).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer(addr: &str) -> Option<SocketAddr> {
        Some(addr.parse().unwrap())
    }

    #[test]
    fn test_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, peer("10.0.0.1:5000"));
        assert_eq!(ip, Some("203.0.113.9".to_string()));
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let headers = HeaderMap::new();
        let ip = extract_client_ip(&headers, peer("192.0.2.4:443"));
        assert_eq!(ip, Some("192.0.2.4".to_string()));
    }

    #[test]
    fn test_strips_v4_mapped_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("::ffff:8.8.8.8"));

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("8.8.8.8".to_string()));
    }

    #[test]
    fn test_blank_forwarded_header_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));

        let ip = extract_client_ip(&headers, peer("127.0.0.1:1"));
        assert_eq!(ip, Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_no_sources_yields_none() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), None), None);
    }
}
