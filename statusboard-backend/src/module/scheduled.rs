///! Poll cycle driver
///!
///! Runs one aggregation pass per tick and publishes the result:
///! - every tick starts an independent cycle task, up to
///!   `MAX_IN_FLIGHT_CYCLES` at once
///! - cycles are numbered when they start, so a late finisher loses to any
///!   newer cycle at the snapshot store
///! - no retries; a failed location is simply retried next tick

use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::aggregator::StatusAggregator;
use super::snapshot::{SnapshotStore, StatusSnapshot, export_snapshot};

/// Cycles allowed to run at once; further ticks are skipped until one ends
pub const MAX_IN_FLIGHT_CYCLES: usize = 3;

/// Configuration for the poller
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Seconds between cycle starts
    pub poll_interval_secs: u64,

    /// Where to mirror each accepted snapshot as static JSON
    pub output_dir: Option<PathBuf>,

    /// Run a cycle immediately on start instead of waiting one interval
    pub perform_initial_poll: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            output_dir: Some(PathBuf::from("data")),
            perform_initial_poll: true,
        }
    }
}

/// What one finished cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle: u64,
    pub services: usize,
    pub unknown: usize,
    /// `false` when a newer cycle had already been published
    pub published: bool,
    pub duration_ms: u64,
}

/// Shared state every cycle task needs
#[derive(Clone)]
struct CycleRunner {
    aggregator: Arc<StatusAggregator>,
    store: Arc<SnapshotStore>,
    output_dir: Option<PathBuf>,
    next_cycle: Arc<AtomicU64>,
    last_exported: Arc<Mutex<u64>>,
}

impl CycleRunner {
    async fn run(&self) -> anyhow::Result<CycleReport> {
        let cycle = self.next_cycle.fetch_add(1, Ordering::SeqCst) + 1;
        let started_at = Utc::now();
        let start_time = std::time::Instant::now();

        tracing::info!("Starting poll cycle {}", cycle);

        let services = self.aggregator.aggregate_all().await;
        let snapshot = StatusSnapshot::new(cycle, started_at, services);

        let mut report = CycleReport {
            cycle,
            services: snapshot.services.len(),
            unknown: snapshot.overview.unknown,
            published: false,
            duration_ms: 0,
        };

        let export_copy = self.output_dir.as_ref().map(|_| snapshot.clone());
        report.published = self.store.publish(snapshot).await;

        if report.published {
            if let (Some(dir), Some(snapshot)) = (&self.output_dir, export_copy) {
                // Exports are serialized and never go backwards in cycle order.
                let mut last_exported = self.last_exported.lock().await;
                if snapshot.cycle > *last_exported {
                    export_snapshot(dir, &snapshot).await?;
                    *last_exported = snapshot.cycle;
                }
            }
        } else {
            tracing::info!("Poll cycle {} superseded by a newer cycle, discarded", cycle);
        }

        report.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(report)
    }
}

/// Spawn one cycle if a slot is free. The slot is held until the cycle ends.
fn try_spawn_cycle(runner: &CycleRunner, slots: &Arc<Semaphore>) -> Option<JoinHandle<()>> {
    let permit = slots.clone().try_acquire_owned().ok()?;
    let runner = runner.clone();

    Some(tokio::spawn(async move {
        let _permit = permit;
        match runner.run().await {
            Ok(report) if report.published => {
                tracing::info!(
                    "Poll cycle {} completed: {} services, {} unknown, {}ms",
                    report.cycle,
                    report.services,
                    report.unknown,
                    report.duration_ms
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Poll cycle failed: {:#}", e);
            }
        }
    }))
}

/// Scheduled poller
pub struct StatusPoller {
    config: PollerConfig,
    runner: CycleRunner,
    task_handle: Option<JoinHandle<()>>,
}

impl StatusPoller {
    pub fn new(
        config: PollerConfig,
        aggregator: Arc<StatusAggregator>,
        store: Arc<SnapshotStore>,
    ) -> Self {
        let runner = CycleRunner {
            aggregator,
            store,
            output_dir: config.output_dir.clone(),
            next_cycle: Arc::new(AtomicU64::new(0)),
            last_exported: Arc::new(Mutex::new(0)),
        };

        Self {
            config,
            runner,
            task_handle: None,
        }
    }

    /// Handle readers use to pull the latest snapshot
    pub fn store(&self) -> Arc<SnapshotStore> {
        self.runner.store.clone()
    }

    /// Run a single cycle to completion on the current task
    pub async fn run_cycle(&self) -> anyhow::Result<CycleReport> {
        self.runner.run().await
    }

    /// Start the background ticker
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.task_handle.is_some() {
            anyhow::bail!("Status poller already started");
        }
        if self.config.poll_interval_secs == 0 {
            anyhow::bail!("Poll interval must be at least one second");
        }

        let runner = self.runner.clone();
        let interval = Duration::from_secs(self.config.poll_interval_secs);
        let perform_initial = self.config.perform_initial_poll;

        tracing::info!(
            "Scheduling status polling (interval: {}s, initial: {})",
            interval.as_secs(),
            perform_initial
        );

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let slots = Arc::new(Semaphore::new(MAX_IN_FLIGHT_CYCLES));

            // The first tick completes immediately.
            if !perform_initial {
                ticker.tick().await;
            }

            loop {
                ticker.tick().await;

                if try_spawn_cycle(&runner, &slots).is_none() {
                    tracing::warn!(
                        "{} poll cycles still running, skipping this tick",
                        MAX_IN_FLIGHT_CYCLES
                    );
                }
            }
        });

        self.task_handle = Some(handle);
        Ok(())
    }

    /// Stop scheduling new cycles
    pub async fn shutdown(mut self) {
        tracing::info!("Shutting down status poller...");

        if let Some(handle) = self.task_handle.take() {
            handle.abort();
            let _ = handle.await;
        }

        tracing::info!("Status poller stopped");
    }
}
