///! Local-directory badge source
///!
///! Reads the same relative badge paths from a checkout of the monitoring
///! pipeline's output, for setups where the static files are on disk.

use async_trait::async_trait;
use statusboard_common::RawBadge;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::source::{BadgeKind, BadgeSource, badge_path};
use crate::error::{StatusError, StatusResult};
use crate::module::registry::LocationDescriptor;

pub struct FileBadgeSource {
    root: PathBuf,
}

impl FileBadgeSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn badge_file(&self, location: &LocationDescriptor, service_dir: &str, kind: BadgeKind) -> PathBuf {
        self.root.join(badge_path(location, service_dir, kind))
    }
}

#[async_trait]
impl BadgeSource for FileBadgeSource {
    async fn fetch(
        &self,
        location: &LocationDescriptor,
        service_dir: &str,
        kind: BadgeKind,
    ) -> StatusResult<RawBadge> {
        let path = self.badge_file(location, service_dir, kind);

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StatusError::fetch(format!("Failed to read {:?}: {}", path, e)))?;

        serde_json::from_str(&content)
            .map_err(|e| StatusError::fetch(format!("Invalid {} badge in {:?}: {}", kind, path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::registry::primary_location;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_badge_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("api").join("callrail");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("response-time.json"),
            r#"{"schemaVersion":1,"label":"response time","message":"231 ms","color":"green"}"#,
        )
        .unwrap();

        let source = FileBadgeSource::new(temp_dir.path());
        let badge = source
            .fetch(&primary_location(), "callrail", BadgeKind::ResponseTime)
            .await
            .unwrap();
        assert_eq!(badge.message, "231 ms");
    }

    #[tokio::test]
    async fn test_missing_and_corrupt_files_are_fetch_failures() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileBadgeSource::new(temp_dir.path());

        let missing = source
            .fetch(&primary_location(), "nowhere", BadgeKind::Uptime)
            .await
            .unwrap_err();
        assert!(missing.is_fetch_failure());

        let dir = temp_dir.path().join("api").join("broken");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("uptime.json"), "{ not json").unwrap();
        let corrupt = source
            .fetch(&primary_location(), "broken", BadgeKind::Uptime)
            .await
            .unwrap_err();
        assert!(corrupt.is_fetch_failure());
    }
}
