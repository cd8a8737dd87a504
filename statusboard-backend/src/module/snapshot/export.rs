///! Static JSON export of the latest snapshot
///!
///! A static dashboard pulls `status.json` (ordered service list) and
///! `summary.json` (cycle metadata and overview panel) from the output dir.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use statusboard_common::StatusOverview;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::store::StatusSnapshot;

pub const STATUS_FILE: &str = "status.json";
pub const SUMMARY_FILE: &str = "summary.json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotSummary<'a> {
    cycle: u64,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    overview: &'a StatusOverview,
}

/// Ensure the output directory exists
pub async fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .await
            .context(format!("Failed to create output directory: {:?}", dir))?;
        tracing::info!("Created output directory: {:?}", dir);
    }
    Ok(())
}

/// Write both export files. Each file is replaced atomically so readers
/// never observe a half-written document.
pub async fn export_snapshot(dir: &Path, snapshot: &StatusSnapshot) -> Result<()> {
    ensure_output_dir(dir).await?;

    let status = serde_json::to_string_pretty(&snapshot.services)
        .context("Failed to serialize service status list")?;
    write_atomic(&dir.join(STATUS_FILE), &status).await?;

    let summary = SnapshotSummary {
        cycle: snapshot.cycle,
        started_at: snapshot.started_at,
        completed_at: snapshot.completed_at,
        overview: &snapshot.overview,
    };
    let summary = serde_json::to_string_pretty(&summary)
        .context("Failed to serialize snapshot summary")?;
    write_atomic(&dir.join(SUMMARY_FILE), &summary).await?;

    tracing::debug!(
        "Exported cycle {} ({} services) to {:?}",
        snapshot.cycle,
        snapshot.services.len(),
        dir
    );
    Ok(())
}

async fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp_path = tmp_path_for(path);

    fs::write(&tmp_path, content)
        .await
        .context(format!("Failed to write {:?}", tmp_path))?;
    fs::rename(&tmp_path, path)
        .await
        .context(format!("Failed to move {:?} into place", path))?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
