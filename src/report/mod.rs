//! Report sinks
//!
//! CSV export of enriched records plus a plain-text table for the terminal.

pub mod table;

pub use table::render_table;

use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Top-N records as JSON.
pub const ACTIVITY_JSON: &str = "user_activity.json";
/// Top-N records as CSV.
pub const ACTIVITY_CSV: &str = "report_user_activity.csv";
/// Every enriched record as CSV.
pub const USERS_LIST_CSV: &str = "report_posts_users_list.csv";

/// Write `rows` as CSV, header taken from the row's field names.
///
/// Returns the number of rows written.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Export `rows` to a CSV file. Empty input is a no-op.
///
/// Returns whether the file was written; failures are logged.
pub fn export_table<T: Serialize>(path: &Path, rows: &[T]) -> bool {
    if rows.is_empty() {
        warn!("No rows to export to {}", path.display());
        return false;
    }

    info!("Exporting {} row(s) to {}", rows.len(), path.display());
    match write_table(path, rows) {
        Ok(written) => {
            info!("Report written successfully to {} ({} row(s))", path.display(), written);
            true
        }
        Err(e) => {
            error!("Error writing report to {}: {}", path.display(), e);
            false
        }
    }
}

/// Remove a report left over from an earlier run.
///
/// Returns whether a file was removed; failures are logged.
pub fn remove_stale(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }

    match fs::remove_file(path) {
        Ok(()) => {
            warn!("Removed stale report {}", path.display());
            true
        }
        Err(e) => {
            error!("Error removing stale report {}: {}", path.display(), e);
            false
        }
    }
}
