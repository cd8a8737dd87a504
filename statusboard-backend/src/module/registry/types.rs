use serde::{Deserialize, Serialize};
use statusboard_common::{Location, ServiceKind};

use super::builtin::{PRIMARY_LOCATION_CODE, primary_location};

/// A location a service is checked from, plus where its badges live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDescriptor {
    #[serde(flatten)]
    pub location: Location,

    /// Path segment under the badge base URL for this vantage point,
    /// e.g. "api" -> `/api/<service-dir>/uptime.json`
    #[serde(default = "default_badge_prefix")]
    pub badge_prefix: String,
}

fn default_badge_prefix() -> String {
    "api".to_string()
}

impl LocationDescriptor {
    pub fn new(location: Location, badge_prefix: impl Into<String>) -> Self {
        Self {
            location,
            badge_prefix: badge_prefix.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.location.code
    }
}

/// One monitored service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Identifier as known to the monitoring pipeline, e.g. "Google Cloud"
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub kind: ServiceKind,

    #[serde(default)]
    pub public_url: String,

    #[serde(default)]
    pub status_page_url: String,

    /// Statuspage-style summary endpoint for the detailed status block
    #[serde(default)]
    pub status_api_url: Option<String>,

    /// Explicit badge directory; derived from `id` when absent
    #[serde(default)]
    pub badge_dir: Option<String>,

    #[serde(default = "default_locations")]
    pub locations: Vec<LocationDescriptor>,

    #[serde(default = "default_primary_location_code")]
    pub primary_location_code: String,
}

fn default_locations() -> Vec<LocationDescriptor> {
    vec![primary_location()]
}

fn default_primary_location_code() -> String {
    PRIMARY_LOCATION_CODE.to_string()
}

impl ServiceDescriptor {
    /// Directory holding this service's badge files
    pub fn service_dir(&self) -> String {
        match &self.badge_dir {
            Some(dir) if !dir.trim().is_empty() => dir.trim().to_string(),
            _ => normalize_service_dir(&self.id),
        }
    }
}

/// Map an arbitrary service id to a badge directory name: lowercase, then
/// every character outside `[a-z0-9]` becomes `-`, one for one.
pub fn normalize_service_dir(id: &str) -> String {
    id.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Ordered, read-only set of monitored services
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
}

impl ServiceRegistry {
    pub fn new(services: Vec<ServiceDescriptor>) -> Self {
        Self { services }
    }

    /// The compiled-in service table
    pub fn builtin() -> Self {
        Self::new(super::builtin_services())
    }

    /// Services in registry order
    pub fn list_services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn get(&self, id: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
