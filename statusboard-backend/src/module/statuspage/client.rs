use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use statusboard_common::DetailedServiceStatus;
use std::time::Duration;

use super::parser::parse_summary_json;
use crate::error::{StatusError, StatusResult};

/// Source of the optional detailed status block
#[async_trait]
pub trait StatusPageSource: Send + Sync {
    async fn fetch_summary(&self, url: &str) -> StatusResult<DetailedServiceStatus>;
}

pub struct HttpStatusPageSource {
    client: Client,
}

impl HttpStatusPageSource {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("statusboard/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
        })
    }
}

#[async_trait]
impl StatusPageSource for HttpStatusPageSource {
    async fn fetch_summary(&self, url: &str) -> StatusResult<DetailedServiceStatus> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StatusError::fetch(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(StatusError::fetch(format!(
                "Unable to fetch status summary (HTTP {})",
                response.status().as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StatusError::fetch(format!("Failed to read {}: {}", url, e)))?;

        parse_summary_json(&body)
    }
}
