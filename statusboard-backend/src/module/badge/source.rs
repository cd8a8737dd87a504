use async_trait::async_trait;
use statusboard_common::RawBadge;

use crate::error::StatusResult;
use crate::module::registry::LocationDescriptor;

/// Which of the two per-location badge documents to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeKind {
    Uptime,
    ResponseTime,
}

impl BadgeKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            BadgeKind::Uptime => "uptime.json",
            BadgeKind::ResponseTime => "response-time.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeKind::Uptime => "uptime",
            BadgeKind::ResponseTime => "response-time",
        }
    }
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relative path of one badge: `<prefix>/<service-dir>/<file>`
pub fn badge_path(location: &LocationDescriptor, service_dir: &str, kind: BadgeKind) -> String {
    let prefix = location.badge_prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}/{}", service_dir, kind.file_name())
    } else {
        format!("{}/{}/{}", prefix, service_dir, kind.file_name())
    }
}

/// Where badge documents come from.
///
/// Implementations report every failure as `StatusError::FetchFailure`;
/// interpreting the message is left to the aggregator.
#[async_trait]
pub trait BadgeSource: Send + Sync {
    async fn fetch(
        &self,
        location: &LocationDescriptor,
        service_dir: &str,
        kind: BadgeKind,
    ) -> StatusResult<RawBadge>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::registry::primary_location;

    #[test]
    fn test_badge_path() {
        let location = primary_location();
        assert_eq!(
            badge_path(&location, "google-cloud", BadgeKind::Uptime),
            "api/google-cloud/uptime.json"
        );

        let mut bare = location.clone();
        bare.badge_prefix = "/".to_string();
        assert_eq!(
            badge_path(&bare, "zapier", BadgeKind::ResponseTime),
            "zapier/response-time.json"
        );
    }
}
