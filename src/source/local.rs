//! Local JSON persistence
//!
//! Files are written pretty-printed with four-space indentation and
//! unescaped UTF-8, so they stay readable and diff cleanly.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Serialize `value` as indented JSON.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write `value` to `path`, atomically replacing any previous file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = to_pretty_json(value)?;
    let temp_file = path.with_extension("json.tmp");
    fs::write(&temp_file, json)?;
    fs::rename(temp_file, path)?;
    Ok(())
}

/// Read a local JSON file, logging and returning `None` on any failure.
pub fn load_local<T: DeserializeOwned>(path: &Path) -> Option<T> {
    info!("Reading json data from {}", path.display());
    match read_json(path) {
        Ok(value) => {
            info!("Json data read successfully from {}", path.display());
            Some(value)
        }
        Err(e) => {
            error!("Error reading json data from {}: {}", path.display(), e);
            None
        }
    }
}

/// Write `data` to a local JSON file. Absent data is a no-op.
///
/// Returns whether the file was written; failures are logged.
pub fn save_local<T: Serialize + ?Sized>(path: &Path, data: Option<&T>) -> bool {
    info!("Writing json data to {}", path.display());
    let Some(data) = data else {
        warn!("No data to write to {}", path.display());
        return false;
    };

    match write_json(path, data) {
        Ok(()) => {
            info!("Json data written successfully to {}", path.display());
            true
        }
        Err(e) => {
            error!("Error writing json data to {}: {}", path.display(), e);
            false
        }
    }
}
