use statusboard_backend::config::BackendConfig;
use statusboard_backend::module::aggregator::StatusAggregator;
use statusboard_backend::module::badge::{BadgeSource, FileBadgeSource, HttpBadgeSource};
use statusboard_backend::module::scheduled::StatusPoller;
use statusboard_backend::module::snapshot::SnapshotStore;
use statusboard_backend::module::statuspage::{HttpStatusPageSource, StatusPageSource};

use anyhow::Result;
use std::sync::Arc;

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = BackendConfig::load_or_default(CONFIG_PATH)?;

    // Initialize logging
    let _logging_guard = statusboard_backend::logging::init_logging(
        &config.log_dir,
        "statusboard-backend",
        &config.log_level,
    )?;

    tracing::info!("Statusboard Backend starting...");

    let registry = config.registry();
    tracing::info!("Monitoring {} services", registry.len());

    let badges: Arc<dyn BadgeSource> = match &config.badge_dir {
        Some(dir) => {
            tracing::info!("Reading badges from local directory {}", dir);
            Arc::new(FileBadgeSource::new(dir))
        }
        None => {
            tracing::info!("Fetching badges from {}", config.badge_base_url);
            Arc::new(HttpBadgeSource::new(&config.badge_base_url, config.request_timeout())?)
        }
    };

    let status_pages: Option<Arc<dyn StatusPageSource>> = if config.fetch_detailed_status {
        Some(Arc::new(HttpStatusPageSource::new(config.request_timeout())?))
    } else {
        None
    };

    let aggregator = Arc::new(StatusAggregator::new(registry, badges, status_pages));
    let store = Arc::new(SnapshotStore::new());

    let mut poller = StatusPoller::new(config.poller_config(), aggregator, store);
    poller.start()?;
    tracing::info!("Status polling started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received shutdown signal");

    poller.shutdown().await;

    Ok(())
}
