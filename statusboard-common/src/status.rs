use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ServiceKind, ServiceStatus, StatusIndicator};

/// A monitoring vantage point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, e.g. "Los Angeles"
    pub name: String,
    /// Short code, e.g. "LAX"
    pub code: String,
    /// (latitude, longitude)
    pub coordinates: (f64, f64),
    /// Region label, e.g. "North America"
    pub region: String,
}

/// One fetched shields-style badge document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBadge {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub label: String,
    /// "99.95%" for uptime badges, "120ms" for response-time badges
    pub message: String,
    #[serde(default)]
    pub color: String,
}

/// One location's derived result for one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatus {
    pub location: Location,
    /// Milliseconds. Only meaningful when `error` is unset.
    pub response_time: u64,
    pub status: ServiceStatus,
    /// Raw uptime string as published, or "N/A" when it could not be fetched
    pub uptime: String,
    pub last_checked: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LocationStatus {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub name: String,
    pub status: String,
    pub created_at: String,
}

/// Richer vendor-provided status, when the service exposes a status API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedServiceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<StatusIndicator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incidents: Vec<Incident>,
}

/// One service's consolidated view for a single poll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedServiceStatus {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub url: String,
    pub overall_status: ServiceStatus,
    pub status_message: String,
    pub status_page_url: String,
    /// Primary location first, remaining entries in configured order
    pub locations: Vec<LocationStatus>,
    pub average_response_time: u64,
    pub overall_uptime: String,
    pub last_checked: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_status: Option<DetailedServiceStatus>,
    pub primary_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary panel figures across all services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOverview {
    pub total: usize,
    pub operational: usize,
    pub degraded: usize,
    pub down: usize,
    pub unknown: usize,
    /// Mean of every service's overall uptime, e.g. "99.3%"
    pub average_uptime: String,
}

impl StatusOverview {
    pub fn from_services(services: &[AggregatedServiceStatus]) -> Self {
        let count = |status: ServiceStatus| {
            services
                .iter()
                .filter(|s| s.overall_status == status)
                .count()
        };

        let average_uptime = if services.is_empty() {
            "0%".to_string()
        } else {
            // Services without a readable uptime count as zero.
            let sum: f64 = services
                .iter()
                .map(|s| {
                    s.overall_uptime
                        .trim()
                        .trim_end_matches('%')
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .unwrap_or(0.0)
                })
                .sum();
            format!("{:.1}%", sum / services.len() as f64)
        };

        Self {
            total: services.len(),
            operational: count(ServiceStatus::Up),
            degraded: count(ServiceStatus::Degraded),
            down: count(ServiceStatus::Down),
            unknown: count(ServiceStatus::Unknown),
            average_uptime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, status: ServiceStatus, uptime: &str) -> AggregatedServiceStatus {
        AggregatedServiceStatus {
            id: id.to_string(),
            name: id.to_string(),
            kind: ServiceKind::Website,
            url: String::new(),
            overall_status: status,
            status_message: status.message().to_string(),
            status_page_url: String::new(),
            locations: Vec::new(),
            average_response_time: 0,
            overall_uptime: uptime.to_string(),
            last_checked: Utc::now(),
            detailed_status: None,
            primary_location: "LAX".to_string(),
            error: None,
        }
    }

    #[test]
    fn test_overview_counts_and_average() {
        let services = vec![
            service("a", ServiceStatus::Up, "100%"),
            service("b", ServiceStatus::Degraded, "97%"),
            service("c", ServiceStatus::Unknown, "N/A"),
        ];
        let overview = StatusOverview::from_services(&services);
        assert_eq!(overview.total, 3);
        assert_eq!(overview.operational, 1);
        assert_eq!(overview.degraded, 1);
        assert_eq!(overview.down, 0);
        assert_eq!(overview.unknown, 1);
        // (100 + 97 + 0) / 3
        assert_eq!(overview.average_uptime, "65.7%");
    }

    #[test]
    fn test_overview_empty() {
        let overview = StatusOverview::from_services(&[]);
        assert_eq!(overview.total, 0);
        assert_eq!(overview.average_uptime, "0%");
    }

    #[test]
    fn test_aggregated_wire_format() {
        let json = serde_json::to_value(service("zapier", ServiceStatus::Up, "99.95%")).unwrap();
        assert_eq!(json["type"], "website");
        assert_eq!(json["overallStatus"], "up");
        assert_eq!(json["overallUptime"], "99.95%");
        assert_eq!(json["primaryLocation"], "LAX");
        assert!(json.get("error").is_none());
        assert!(json.get("detailedStatus").is_none());
    }

    #[test]
    fn test_raw_badge_tolerates_missing_fields() {
        let badge: RawBadge = serde_json::from_str(r#"{"message":"142ms"}"#).unwrap();
        assert_eq!(badge.message, "142ms");
        assert_eq!(badge.schema_version, 0);

        let full: RawBadge = serde_json::from_str(
            r#"{"schemaVersion":1,"label":"uptime","message":"99.95%","color":"brightgreen"}"#,
        )
        .unwrap();
        assert_eq!(full.schema_version, 1);
        assert_eq!(full.color, "brightgreen");
    }
}
