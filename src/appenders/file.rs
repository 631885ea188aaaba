//! Synced append writes to a log file

use crate::core::{LoggerError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Append `data` to `path` and sync it to disk
///
/// The parent directory is created when missing and the file is opened in
/// create+append mode for every call, so a file renamed or removed by a
/// rotation is simply recreated.
pub fn write_synced(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                format!("Failed to create directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::file_appender(path.display().to_string(), format!("Failed to open: {}", e))
        })?;

    file.write_all(data).map_err(|e| {
        LoggerError::file_appender(
            path.display().to_string(),
            format!("Failed to write {} bytes: {}", data.len(), e),
        )
    })?;

    file.sync_all().map_err(|e| {
        LoggerError::file_appender(path.display().to_string(), format!("Failed to sync: {}", e))
    })
}

/// Current on-disk size of `path`, or 0 when it cannot be read
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
