///! Per-location status derivation

use chrono::{DateTime, Utc};
use statusboard_common::{Location, LocationStatus, RawBadge, ServiceStatus};

use crate::error::StatusResult;
use crate::module::badge::{derive_status, parse_response_time, parse_uptime};

/// Uptime string reported when the badge could not be fetched
pub const UNAVAILABLE: &str = "N/A";

/// Turn one location's pair of badge fetch outcomes into a [`LocationStatus`].
///
/// Never fails: fetch errors yield `unknown`/`N/A`/`0`, parse errors keep
/// the raw uptime text and are recorded in `error`.
pub fn derive_location_status(
    location: &Location,
    uptime: StatusResult<RawBadge>,
    response_time: StatusResult<RawBadge>,
    checked_at: DateTime<Utc>,
) -> LocationStatus {
    let (uptime, response_time) = match (uptime, response_time) {
        (Ok(uptime), Ok(response_time)) => (uptime, response_time),
        (Err(e), _) | (_, Err(e)) => {
            return LocationStatus {
                location: location.clone(),
                response_time: 0,
                status: ServiceStatus::Unknown,
                uptime: UNAVAILABLE.to_string(),
                last_checked: checked_at,
                error: Some(e.to_string()),
            };
        }
    };

    let mut errors = Vec::new();

    let status = match parse_uptime(&uptime.message) {
        Ok(percent) => derive_status(percent),
        Err(e) => {
            errors.push(e.to_string());
            ServiceStatus::Unknown
        }
    };

    let response_ms = match parse_response_time(&response_time.message) {
        Ok(ms) => ms,
        Err(e) => {
            errors.push(e.to_string());
            0
        }
    };

    LocationStatus {
        location: location.clone(),
        response_time: response_ms,
        status,
        uptime: uptime.message,
        last_checked: checked_at,
        error: if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatusError;
    use crate::module::registry::primary_location;

    fn badge(message: &str) -> StatusResult<RawBadge> {
        Ok(RawBadge {
            schema_version: 1,
            label: "test".to_string(),
            message: message.to_string(),
            color: "green".to_string(),
        })
    }

    fn derive(uptime: StatusResult<RawBadge>, response: StatusResult<RawBadge>) -> LocationStatus {
        derive_location_status(&primary_location().location, uptime, response, Utc::now())
    }

    #[test]
    fn test_healthy_location() {
        let status = derive(badge("99.95%"), badge("142ms"));
        assert_eq!(status.status, ServiceStatus::Up);
        assert_eq!(status.uptime, "99.95%");
        assert_eq!(status.response_time, 142);
        assert!(status.error.is_none());
    }

    #[test]
    fn test_zero_uptime_is_down_regardless_of_response_time() {
        let status = derive(badge("0%"), badge("12ms"));
        assert_eq!(status.status, ServiceStatus::Down);
        assert_eq!(status.response_time, 12);
    }

    #[test]
    fn test_low_uptime_is_degraded() {
        let status = derive(badge("98.999%"), badge("300ms"));
        assert_eq!(status.status, ServiceStatus::Degraded);
    }

    #[test]
    fn test_fetch_failure() {
        let status = derive(
            Err(StatusError::fetch("connection refused")),
            badge("142ms"),
        );
        assert_eq!(status.status, ServiceStatus::Unknown);
        assert_eq!(status.uptime, "N/A");
        assert_eq!(status.response_time, 0);
        assert_eq!(status.error.as_deref(), Some("connection refused"));

        let status = derive(badge("100%"), Err(StatusError::fetch("Unable to fetch data (HTTP 500)")));
        assert_eq!(status.status, ServiceStatus::Unknown);
        assert_eq!(status.uptime, "N/A");
        assert_eq!(status.error.as_deref(), Some("Unable to fetch data (HTTP 500)"));
    }

    #[test]
    fn test_malformed_uptime_preserves_message() {
        for message in ["99.95", "up", ""] {
            let status = derive(badge(message), badge("100ms"));
            assert_eq!(status.status, ServiceStatus::Unknown);
            assert_eq!(status.uptime, message);
            assert!(status.error.is_some());
        }
    }

    #[test]
    fn test_malformed_response_time_is_flagged() {
        let flagged = derive(badge("100%"), badge("n/a"));
        assert_eq!(flagged.response_time, 0);
        assert!(flagged.error.is_some());
        assert!(!flagged.is_success());
        assert_eq!(flagged.status, ServiceStatus::Up);

        let genuine = derive(badge("100%"), badge("0ms"));
        assert_eq!(genuine.response_time, 0);
        assert!(genuine.error.is_none());
    }

    #[test]
    fn test_both_messages_malformed() {
        let status = derive(badge("broken"), badge("slow"));
        assert_eq!(status.status, ServiceStatus::Unknown);
        let error = status.error.unwrap();
        assert!(error.contains("uptime"));
        assert!(error.contains("response-time"));
    }
}
