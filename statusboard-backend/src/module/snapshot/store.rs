use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statusboard_common::{AggregatedServiceStatus, StatusOverview};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Immutable result of one poll cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Monotonic cycle number; a larger number is always newer
    pub cycle: u64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub services: Vec<AggregatedServiceStatus>,
    pub overview: StatusOverview,
}

impl StatusSnapshot {
    pub fn new(
        cycle: u64,
        started_at: DateTime<Utc>,
        services: Vec<AggregatedServiceStatus>,
    ) -> Self {
        let overview = StatusOverview::from_services(&services);
        Self {
            cycle,
            started_at,
            completed_at: Utc::now(),
            services,
            overview,
        }
    }
}

/// Latest published snapshot, shared between the poller and readers.
///
/// Publishing is gated on the cycle number so a slow, superseded cycle that
/// finishes late can never replace a newer snapshot.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    latest: RwLock<Option<Arc<StatusSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `snapshot` if it is newer than the current one.
    /// Returns `false` when it was discarded as stale.
    pub async fn publish(&self, snapshot: StatusSnapshot) -> bool {
        let mut latest = self.latest.write().await;

        if let Some(current) = latest.as_ref() {
            if snapshot.cycle <= current.cycle {
                tracing::debug!(
                    "Discarding stale snapshot from cycle {} (current: {})",
                    snapshot.cycle,
                    current.cycle
                );
                return false;
            }
        }

        *latest = Some(Arc::new(snapshot));
        true
    }

    pub async fn latest(&self) -> Option<Arc<StatusSnapshot>> {
        self.latest.read().await.clone()
    }

    /// Full ordered service list for the current cycle; empty before the
    /// first cycle completes.
    pub async fn services(&self) -> Vec<AggregatedServiceStatus> {
        self.latest
            .read()
            .await
            .as_ref()
            .map(|s| s.services.clone())
            .unwrap_or_default()
    }

    pub async fn cycle(&self) -> Option<u64> {
        self.latest.read().await.as_ref().map(|s| s.cycle)
    }
}
