///! Statuspage `summary.json` parser

use serde::Deserialize;
use statusboard_common::{Component, DetailedServiceStatus, Incident, StatusIndicator};

use crate::error::{StatusError, StatusResult};

#[derive(Debug, Deserialize)]
struct RawStatus {
    #[serde(default)]
    indicator: Option<StatusIndicator>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawComponent {
    name: String,
    status: String,
    /// Group headers duplicate their children
    #[serde(default)]
    group: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawIncident {
    name: String,
    status: String,
    #[serde(default)]
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    status: Option<RawStatus>,
    #[serde(default)]
    components: Vec<RawComponent>,
    #[serde(default)]
    incidents: Vec<RawIncident>,
}

/// Parse a statuspage summary document into a [`DetailedServiceStatus`].
pub fn parse_summary_json(json: &str) -> StatusResult<DetailedServiceStatus> {
    let resp: SummaryResponse = serde_json::from_str(json)
        .map_err(|e| StatusError::fetch(format!("Invalid status summary: {}", e)))?;

    let (indicator, description) = match resp.status {
        Some(status) => (status.indicator, status.description),
        None => (None, None),
    };

    let components = resp
        .components
        .into_iter()
        .filter(|c| c.group != Some(true))
        .map(|c| Component {
            name: c.name,
            status: c.status,
        })
        .collect();

    let incidents = resp
        .incidents
        .into_iter()
        .map(|i| Incident {
            name: i.name,
            status: i.status,
            created_at: i.created_at,
        })
        .collect();

    Ok(DetailedServiceStatus {
        indicator,
        description,
        components,
        incidents,
    })
}
