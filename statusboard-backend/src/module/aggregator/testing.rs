//! In-memory collaborators for aggregator tests

use async_trait::async_trait;
use statusboard_common::{DetailedServiceStatus, RawBadge, StatusIndicator};
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{StatusError, StatusResult};
use crate::module::badge::{BadgeKind, BadgeSource};
use crate::module::registry::{LocationDescriptor, ServiceDescriptor, ServiceRegistry, primary_location};
use crate::module::statuspage::StatusPageSource;

/// Badge source backed by a map of `(location code, service dir, kind)`.
/// Anything not in the map fails like an HTTP 404.
#[derive(Default)]
pub struct FakeBadgeSource {
    badges: HashMap<(String, String, BadgeKind), String>,
    delays: HashMap<String, Duration>,
    location_delays: HashMap<String, Duration>,
}

impl FakeBadgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_badges(mut self, code: &str, service_dir: &str, uptime: &str, response_time: &str) -> Self {
        self.badges.insert(
            (code.to_string(), service_dir.to_string(), BadgeKind::Uptime),
            uptime.to_string(),
        );
        self.badges.insert(
            (code.to_string(), service_dir.to_string(), BadgeKind::ResponseTime),
            response_time.to_string(),
        );
        self
    }

    /// Hold every fetch for `service_dir` for `delay` before answering
    pub fn with_delay(mut self, service_dir: &str, delay: Duration) -> Self {
        self.delays.insert(service_dir.to_string(), delay);
        self
    }

    /// Hold every fetch at location `code` for `delay` before answering
    pub fn with_location_delay(mut self, code: &str, delay: Duration) -> Self {
        self.location_delays.insert(code.to_string(), delay);
        self
    }
}

#[async_trait]
impl BadgeSource for FakeBadgeSource {
    async fn fetch(
        &self,
        location: &LocationDescriptor,
        service_dir: &str,
        kind: BadgeKind,
    ) -> StatusResult<RawBadge> {
        if let Some(delay) = self.delays.get(service_dir) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(delay) = self.location_delays.get(location.code()) {
            tokio::time::sleep(*delay).await;
        }

        let key = (location.code().to_string(), service_dir.to_string(), kind);
        match self.badges.get(&key) {
            Some(message) => Ok(RawBadge {
                schema_version: 1,
                label: kind.as_str().to_string(),
                message: message.clone(),
                color: "brightgreen".to_string(),
            }),
            None => Err(StatusError::fetch("Unable to fetch data (HTTP 404)")),
        }
    }
}

#[derive(Default)]
pub struct FakeStatusPages {
    summaries: HashMap<String, DetailedServiceStatus>,
}

impl FakeStatusPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summary(mut self, url: &str, indicator: StatusIndicator, description: &str) -> Self {
        self.summaries.insert(
            url.to_string(),
            DetailedServiceStatus {
                indicator: Some(indicator),
                description: Some(description.to_string()),
                components: Vec::new(),
                incidents: Vec::new(),
            },
        );
        self
    }
}

#[async_trait]
impl StatusPageSource for FakeStatusPages {
    async fn fetch_summary(&self, url: &str) -> StatusResult<DetailedServiceStatus> {
        self.summaries
            .get(url)
            .cloned()
            .ok_or_else(|| StatusError::fetch("Unable to fetch status summary (HTTP 503)"))
    }
}

/// Registry of website services, each checked only from the primary location.
/// Badge dirs are the normalized ids.
pub fn single_location_registry(ids: &[&str]) -> ServiceRegistry {
    let services = ids
        .iter()
        .map(|id| {
            let location = primary_location();
            ServiceDescriptor {
                id: id.to_string(),
                name: id.to_string(),
                kind: statusboard_common::ServiceKind::Website,
                public_url: format!("https://{}.example", id.to_lowercase().replace(' ', "-")),
                status_page_url: String::new(),
                status_api_url: None,
                badge_dir: None,
                primary_location_code: location.code().to_string(),
                locations: vec![location],
            }
        })
        .collect();
    ServiceRegistry::new(services)
}
