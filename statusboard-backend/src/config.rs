use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::module::registry::{ServiceDescriptor, ServiceRegistry};
use crate::module::scheduled::PollerConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Root URL the badge files are served from
    #[serde(default = "default_badge_base_url")]
    pub badge_base_url: String,

    /// Read badges from a local checkout instead of over HTTP
    #[serde(default)]
    pub badge_dir: Option<String>,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// HTTP client default when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_true")]
    pub fetch_detailed_status: bool,

    #[serde(default = "default_true")]
    pub perform_initial_poll: bool,

    /// Replaces the built-in service table when present
    #[serde(default)]
    pub services: Option<Vec<ServiceDescriptor>>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_badge_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_output_dir() -> String {
    "data".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            badge_base_url: default_badge_base_url(),
            badge_dir: None,
            poll_interval_secs: default_poll_interval_secs(),
            request_timeout_secs: None,
            output_dir: default_output_dir(),
            fetch_detailed_status: true,
            perform_initial_poll: true,
            services: None,
        }
    }
}

impl BackendConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BackendConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &str) -> anyhow::Result<Self> {
        if std::path::Path::new(path).exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be greater than zero");
        }
        if self.badge_dir.is_none() && self.badge_base_url.trim().is_empty() {
            anyhow::bail!("badge_base_url must not be empty");
        }
        if let Some(services) = &self.services {
            for service in services {
                if service.locations.is_empty() {
                    anyhow::bail!("Service '{}' has no locations", service.id);
                }
            }
        }
        Ok(())
    }

    pub fn registry(&self) -> ServiceRegistry {
        match &self.services {
            Some(services) => ServiceRegistry::new(services.clone()),
            None => ServiceRegistry::builtin(),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn poller_config(&self) -> PollerConfig {
        let output_dir = if self.output_dir.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.output_dir))
        };

        PollerConfig {
            poll_interval_secs: self.poll_interval_secs,
            output_dir,
            perform_initial_poll: self.perform_initial_poll,
        }
    }
}
