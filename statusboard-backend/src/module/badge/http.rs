///! HTTP badge source
///!
///! Fetches `<base>/<prefix>/<service-dir>/{uptime,response-time}.json`
///! from wherever the monitoring pipeline publishes its static files.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use statusboard_common::RawBadge;
use std::time::Duration;

use super::source::{BadgeKind, BadgeSource, badge_path};
use crate::error::{StatusError, StatusResult};
use crate::module::registry::LocationDescriptor;

const USER_AGENT: &str = concat!("statusboard/", env!("CARGO_PKG_VERSION"));

pub struct HttpBadgeSource {
    client: Client,
    base_url: String,
}

impl HttpBadgeSource {
    /// `timeout` of `None` keeps the HTTP client's default.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn badge_url(&self, location: &LocationDescriptor, service_dir: &str, kind: BadgeKind) -> String {
        format!("{}/{}", self.base_url, badge_path(location, service_dir, kind))
    }
}

#[async_trait]
impl BadgeSource for HttpBadgeSource {
    async fn fetch(
        &self,
        location: &LocationDescriptor,
        service_dir: &str,
        kind: BadgeKind,
    ) -> StatusResult<RawBadge> {
        let url = self.badge_url(location, service_dir, kind);
        tracing::debug!("Fetching {} badge from {}", kind, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StatusError::fetch(format!("Failed to fetch {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::fetch(format!(
                "Unable to fetch data (HTTP {})",
                status.as_u16()
            )));
        }

        response
            .json::<RawBadge>()
            .await
            .map_err(|e| StatusError::fetch(format!("Invalid {} badge at {}: {}", kind, url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::registry::primary_location;

    #[test]
    fn test_badge_url_join() {
        let source = HttpBadgeSource::new("https://example.com/status/", None).unwrap();
        assert_eq!(
            source.badge_url(&primary_location(), "zapier", BadgeKind::Uptime),
            "https://example.com/status/api/zapier/uptime.json"
        );
    }

    /// Serve one canned HTTP response on a random local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_parses_badge() {
        let base = serve_once(
            "200 OK",
            r#"{"schemaVersion":1,"label":"uptime","message":"99.95%","color":"brightgreen"}"#,
        )
        .await;
        let source = HttpBadgeSource::new(base, Some(Duration::from_secs(5))).unwrap();
        let badge = source
            .fetch(&primary_location(), "zapier", BadgeKind::Uptime)
            .await
            .unwrap();
        assert_eq!(badge.message, "99.95%");
        assert_eq!(badge.label, "uptime");
    }

    #[tokio::test]
    async fn test_http_error_status_is_fetch_failure() {
        let base = serve_once("404 Not Found", "").await;
        let source = HttpBadgeSource::new(base, Some(Duration::from_secs(5))).unwrap();
        let err = source
            .fetch(&primary_location(), "zapier", BadgeKind::ResponseTime)
            .await
            .unwrap_err();
        assert_eq!(err, StatusError::fetch("Unable to fetch data (HTTP 404)"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_fetch_failure() {
        let base = serve_once("200 OK", "<html>not a badge</html>").await;
        let source = HttpBadgeSource::new(base, Some(Duration::from_secs(5))).unwrap();
        let err = source
            .fetch(&primary_location(), "zapier", BadgeKind::Uptime)
            .await
            .unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_failure() {
        // Nothing listens on port 1 locally; the connection is refused.
        let source = HttpBadgeSource::new("http://127.0.0.1:1", Some(Duration::from_secs(5))).unwrap();
        let err = source
            .fetch(&primary_location(), "zapier", BadgeKind::Uptime)
            .await
            .unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(!err.to_string().is_empty());
    }
}
