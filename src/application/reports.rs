//! Aggregated analytics report bodies.
//!
//! These structs are serialized as-is into both HTTP responses and cache
//! values, so field names are part of the external contract and of the cache
//! interop format. They derive `Deserialize` because cached JSON is decoded
//! back into the same types.

use serde::{Deserialize, Serialize};

/// One day of the trailing 7-day click series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateClickEntry {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(rename = "clickCount")]
    pub click_count: i64,
}

/// Distinct-visitor count for one operating system group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsTypeEntry {
    /// Null when the source events carried no OS information.
    #[serde(rename = "osName")]
    pub os_name: Option<String>,
    #[serde(rename = "uniqueClicks")]
    pub unique_clicks: i64,
}

/// Distinct-visitor count for one device-type group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTypeEntry {
    #[serde(rename = "deviceName")]
    pub device_name: String,
    #[serde(rename = "uniqueClicks")]
    pub unique_clicks: i64,
}

/// Per-alias analytics report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasAnalytics {
    #[serde(rename = "totalClicks")]
    pub total_clicks: i64,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: i64,
    #[serde(rename = "clicksByDate")]
    pub clicks_by_date: Vec<DateClickEntry>,
    #[serde(rename = "osType")]
    pub os_type: Vec<OsTypeEntry>,
    #[serde(rename = "deviceType")]
    pub device_type: Vec<DeviceTypeEntry>,
}

/// Per-alias line inside a topic report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicUrlEntry {
    /// Fully qualified short URL.
    #[serde(rename = "shortUrl")]
    pub short_url: String,
    #[serde(rename = "totalClicks")]
    pub total_clicks: i64,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: i64,
}

/// Topic-scoped analytics report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicAnalytics {
    pub topic: String,
    #[serde(rename = "totalClicks")]
    pub total_clicks: i64,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: i64,
    #[serde(rename = "clicksByDate")]
    pub clicks_by_date: Vec<DateClickEntry>,
    pub urls: Vec<TopicUrlEntry>,
}

/// OS group in the overall report; carries both an event count and a
/// distinct-visitor count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallOsEntry {
    #[serde(rename = "osName")]
    pub os_name: Option<String>,
    #[serde(rename = "uniqueClicks")]
    pub unique_clicks: i64,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: i64,
}

/// Device-type group in the overall report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallDeviceEntry {
    #[serde(rename = "deviceName")]
    pub device_name: Option<String>,
    #[serde(rename = "uniqueClicks")]
    pub unique_clicks: i64,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: i64,
}

/// Owner-wide analytics report across every alias an identity owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAnalytics {
    #[serde(rename = "totalUrls")]
    pub total_urls: i64,
    #[serde(rename = "totalClicks")]
    pub total_clicks: i64,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: i64,
    #[serde(rename = "clicksByDate")]
    pub clicks_by_date: Vec<DateClickEntry>,
    #[serde(rename = "osType")]
    pub os_type: Vec<OverallOsEntry>,
    #[serde(rename = "deviceType")]
    pub device_type: Vec<OverallDeviceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_analytics_field_names() {
        let report = AliasAnalytics {
            total_clicks: 3,
            unique_users: 2,
            clicks_by_date: vec![DateClickEntry {
                date: "2026-08-30".to_string(),
                click_count: 3,
            }],
            os_type: vec![OsTypeEntry {
                os_name: Some("Windows 10".to_string()),
                unique_clicks: 2,
            }],
            device_type: vec![DeviceTypeEntry {
                device_name: "pc".to_string(),
                unique_clicks: 2,
            }],
        };

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(
            value,
            json!({
                "totalClicks": 3,
                "uniqueUsers": 2,
                "clicksByDate": [{ "date": "2026-08-30", "clickCount": 3 }],
                "osType": [{ "osName": "Windows 10", "uniqueClicks": 2 }],
                "deviceType": [{ "deviceName": "pc", "uniqueClicks": 2 }],
            })
        );
    }

    #[test]
    fn test_overall_analytics_round_trips_through_cache_encoding() {
        let report = OverallAnalytics {
            total_urls: 2,
            total_clicks: 10,
            unique_users: 4,
            clicks_by_date: vec![],
            os_type: vec![OverallOsEntry {
                os_name: None,
                unique_clicks: 10,
                unique_users: 4,
            }],
            device_type: vec![OverallDeviceEntry {
                device_name: None,
                unique_clicks: 10,
                unique_users: 4,
            }],
        };

        let encoded = serde_json::to_string(&report).unwrap();
        let decoded: OverallAnalytics = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, report);
    }

    #[test]
    fn test_topic_analytics_includes_topic_and_urls() {
        let report = TopicAnalytics {
            topic: "marketing".to_string(),
            total_clicks: 5,
            unique_users: 3,
            clicks_by_date: vec![],
            urls: vec![TopicUrlEntry {
                short_url: "https://sho.rt/api/shorten/promo1".to_string(),
                total_clicks: 5,
                unique_users: 3,
            }],
        };

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["topic"], "marketing");
        assert_eq!(value["urls"][0]["shortUrl"], "https://sho.rt/api/shorten/promo1");
    }
}
