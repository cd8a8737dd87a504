///! Per-service fold of location results

use chrono::{DateTime, Utc};
use statusboard_common::{AggregatedServiceStatus, LocationStatus, ServiceKind, ServiceStatus};

use super::derive::UNAVAILABLE;
use crate::error::StatusError;
use crate::module::registry::ServiceDescriptor;

/// Fold one service's location results into its aggregated record.
pub fn aggregate(
    descriptor: &ServiceDescriptor,
    locations: Vec<LocationStatus>,
    checked_at: DateTime<Utc>,
) -> AggregatedServiceStatus {
    let primary = descriptor.primary_location_code.as_str();
    let locations = primary_first(locations, primary);

    let overall_status = overall_status(&locations);

    AggregatedServiceStatus {
        id: descriptor.id.clone(),
        name: descriptor.name.clone(),
        kind: descriptor.kind,
        url: descriptor.public_url.clone(),
        overall_status,
        status_message: overall_status.message().to_string(),
        status_page_url: descriptor.status_page_url.clone(),
        average_response_time: average_response_time(&locations),
        overall_uptime: overall_uptime(&locations, primary),
        locations,
        last_checked: checked_at,
        detailed_status: None,
        primary_location: descriptor.primary_location_code.clone(),
        error: None,
    }
}

/// Record for a service id that is not in the registry
pub fn configuration_missing(id: &str, checked_at: DateTime<Utc>) -> AggregatedServiceStatus {
    AggregatedServiceStatus {
        id: id.to_string(),
        name: id.to_string(),
        kind: ServiceKind::Unknown,
        url: String::new(),
        overall_status: ServiceStatus::Unknown,
        status_message: ServiceStatus::Unknown.message().to_string(),
        status_page_url: String::new(),
        locations: Vec::new(),
        average_response_time: 0,
        overall_uptime: UNAVAILABLE.to_string(),
        last_checked: checked_at,
        detailed_status: None,
        primary_location: String::new(),
        error: Some(StatusError::ConfigurationMissing(id.to_string()).to_string()),
    }
}

/// Worst reading wins; `unknown` only when no location produced a reading.
pub fn overall_status(locations: &[LocationStatus]) -> ServiceStatus {
    locations
        .iter()
        .map(|l| l.status)
        .filter(ServiceStatus::is_known)
        .max_by_key(ServiceStatus::severity)
        .unwrap_or(ServiceStatus::Unknown)
}

/// Primary location's uptime when it has a reading, else the first that does.
pub fn overall_uptime(locations: &[LocationStatus], primary_code: &str) -> String {
    locations
        .iter()
        .find(|l| l.location.code == primary_code && l.status.is_known())
        .or_else(|| locations.iter().find(|l| l.status.is_known()))
        .map(|l| l.uptime.clone())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Mean response time over error-free locations, rounded to the nearest ms.
pub fn average_response_time(locations: &[LocationStatus]) -> u64 {
    let samples: Vec<u64> = locations
        .iter()
        .filter(|l| l.is_success())
        .map(|l| l.response_time)
        .collect();

    if samples.is_empty() {
        return 0;
    }

    let sum: u128 = samples.iter().map(|&ms| ms as u128).sum();
    let count = samples.len() as u128;
    ((sum + count / 2) / count) as u64
}

/// Stable partition moving the primary location to the front.
pub fn primary_first(locations: Vec<LocationStatus>, primary_code: &str) -> Vec<LocationStatus> {
    let (mut primary, rest): (Vec<_>, Vec<_>) = locations
        .into_iter()
        .partition(|l| l.location.code == primary_code);
    primary.extend(rest);
    primary
}
