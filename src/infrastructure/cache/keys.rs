//! Cache key namespaces.
//!
//! The exact formats below are a compatibility contract: a deployment may
//! carry warm cache state written by earlier processes, so these must never
//! change shape.

/// Key for a cached redirect target.
pub fn short_url(alias: &str) -> String {
    format!("shortUrl:{}", alias)
}

/// Key for a cached per-alias analytics report.
pub fn alias_analytics(alias: &str) -> String {
    format!("analytics:{}", alias)
}

/// Key for a cached topic analytics report.
pub fn topic_analytics(topic: &str) -> String {
    format!("topicAnalytics:{}", topic)
}

/// Key for a cached per-user overall analytics report.
pub fn overall_analytics(owner_id: &str) -> String {
    format!("overallAnalytics:{}", owner_id)
}
