use statusboard_common::{Location, ServiceKind};

use super::types::{LocationDescriptor, ServiceDescriptor};

pub(super) const PRIMARY_LOCATION_CODE: &str = "LAX";

/// The default vantage point; listed first on every card
pub fn primary_location() -> LocationDescriptor {
    LocationDescriptor::new(
        Location {
            name: "Los Angeles".to_string(),
            code: PRIMARY_LOCATION_CODE.to_string(),
            coordinates: (34.0522, -118.2437),
            region: "North America".to_string(),
        },
        "api",
    )
}

struct BuiltinService {
    id: &'static str,
    name: &'static str,
    kind: ServiceKind,
    public_url: &'static str,
    status_page_url: &'static str,
    status_api_url: Option<&'static str>,
    badge_dir: &'static str,
}

const BUILTIN_SERVICES: &[BuiltinService] = &[
    BuiltinService {
        id: "Zapier",
        name: "Zapier",
        kind: ServiceKind::StatusApi,
        public_url: "https://status.zapier.com/",
        status_page_url: "https://status.zapier.com/",
        status_api_url: Some("https://status.zapier.com/api/v2/summary.json"),
        badge_dir: "zapier",
    },
    BuiltinService {
        id: "Salesforce",
        name: "Salesforce",
        kind: ServiceKind::StatusApi,
        public_url: "https://api.status.salesforce.com/v1/instances/status",
        status_page_url: "https://status.salesforce.com/",
        status_api_url: None,
        badge_dir: "salesforce",
    },
    BuiltinService {
        id: "Google Cloud",
        name: "Google Cloud",
        kind: ServiceKind::StatusApi,
        public_url: "https://status.cloud.google.com/summary.json",
        status_page_url: "https://status.cloud.google.com/",
        status_api_url: None,
        badge_dir: "google-cloud",
    },
    BuiltinService {
        id: "Microsoft Azure",
        name: "Microsoft Azure",
        kind: ServiceKind::StatusApi,
        public_url: "https://azure.status.microsoft.com/en-us/status/feed/",
        status_page_url: "https://azure.status.microsoft.com/en-us/status/",
        status_api_url: None,
        badge_dir: "microsoft-azure",
    },
    BuiltinService {
        id: "CallRail",
        name: "CallRail",
        kind: ServiceKind::StatusApi,
        public_url: "https://status.callrail.com/api/v2/status.json",
        status_page_url: "https://status.callrail.com/",
        status_api_url: Some("https://status.callrail.com/api/v2/summary.json"),
        badge_dir: "callrail",
    },
    BuiltinService {
        id: "Main WordPress Site (hratchyan.com)",
        name: "WordPress Site",
        kind: ServiceKind::Website,
        public_url: "https://hratchyan.com",
        status_page_url: "https://hratchyan.com",
        status_api_url: None,
        badge_dir: "main-wordpress-site-hratchyan-com",
    },
];

/// Compiled-in service table, in display order
pub fn builtin_services() -> Vec<ServiceDescriptor> {
    BUILTIN_SERVICES
        .iter()
        .map(|s| ServiceDescriptor {
            id: s.id.to_string(),
            name: s.name.to_string(),
            kind: s.kind,
            public_url: s.public_url.to_string(),
            status_page_url: s.status_page_url.to_string(),
            status_api_url: s.status_api_url.map(str::to_string),
            badge_dir: Some(s.badge_dir.to_string()),
            locations: vec![primary_location()],
            primary_location_code: PRIMARY_LOCATION_CODE.to_string(),
        })
        .collect()
}
