///! Poll-cycle snapshots
///!
///! Each cycle produces a fresh immutable `StatusSnapshot`. The store hands
///! the newest one to readers; the exporter mirrors it to static JSON.

mod export;
mod store;

pub use export::{SUMMARY_FILE, STATUS_FILE, ensure_output_dir, export_snapshot};
pub use store::{SnapshotStore, StatusSnapshot};
