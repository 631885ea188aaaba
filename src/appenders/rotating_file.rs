//! Size-based rotation with a bounded retention window
//!
//! Each flush hands the appender a run of complete lines. While the pending
//! bytes would bring the live file to the size threshold, the appender fills
//! the remaining room (cutting at the last newline that fits, or hard-cutting
//! when none does), renames the live file to a timestamped archive and evicts
//! the oldest archives beyond the configured count. Whatever is left once it
//! fits is appended to the live file.
//!
//! Archive names insert the rotation time before the extension:
//!
//! ```text
//! logs/app.log  ->  logs/app_2025-01-08_10-30-45_123456789.log
//! ```
//!
//! Only archives created by this appender are tracked; files left behind by an
//! earlier process are never counted or removed.

use super::file::{file_size, write_synced};
use crate::core::format::append_rotate_time;
use crate::core::{Appender, ErrorSink, LoggerConfig, LoggerError, LoggerMetrics, Result};
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct RotatingFileAppender {
    config: Arc<LoggerConfig>,
    sink: ErrorSink,
    metrics: Arc<LoggerMetrics>,
    /// Archives created by this appender, oldest first
    archives: VecDeque<PathBuf>,
    /// Time used for the most recent archive name
    last_rotation: Option<DateTime<Local>>,
}

impl RotatingFileAppender {
    pub fn new(config: Arc<LoggerConfig>, sink: ErrorSink, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            config,
            sink,
            metrics,
            archives: VecDeque::new(),
            last_rotation: None,
        }
    }

    /// Archives currently inside the retention window, oldest first
    #[must_use]
    pub fn archives(&self) -> &VecDeque<PathBuf> {
        &self.archives
    }

    fn write_rotating(&mut self, path: &Path, max_size: u64, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            let current = file_size(path);
            if (data.len() as u64).saturating_add(current) < max_size {
                break;
            }

            let room = usize::try_from(max_size.saturating_sub(current)).unwrap_or(usize::MAX);
            let (write_len, consumed) = cut_point(data, room);
            if write_len == 0 && current == 0 {
                // a newline right after the previous cut; nothing to archive
                data = &data[consumed..];
                continue;
            }
            if write_len > 0 {
                if let Err(e) = write_synced(path, &data[..write_len]) {
                    self.sink.report(&e);
                }
            }
            data = &data[consumed..];

            self.rotate(path)?;
        }

        if data.is_empty() {
            return Ok(());
        }
        write_synced(path, data)
    }

    /// Move the live file to a fresh archive name and apply retention
    ///
    /// A failed rename falls back to deleting the live file so the next write
    /// starts empty; a live file that is already gone counts as deleted. If
    /// the file exists and cannot be removed it cannot shrink either, and an
    /// error is returned to stop the current flush.
    fn rotate(&mut self, path: &Path) -> Result<()> {
        let now = self.next_rotation_time();
        let archive = archive_path(path, &now);

        if let Err(e) = fs::rename(path, &archive) {
            self.sink.report(&LoggerError::file_rotation(
                path.display().to_string(),
                format!("Failed to move to '{}': {}", archive.display(), e),
            ));
            return match fs::remove_file(path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(LoggerError::io_operation(
                    "removing log file after failed rotation",
                    format!("'{}' left in place, rest of this flush dropped", path.display()),
                    e,
                )),
            };
        }

        self.metrics.record_rotation();
        self.archives.push_back(archive);
        self.enforce_retention();
        Ok(())
    }

    fn enforce_retention(&mut self) {
        let count = self.config.max_files() as usize;
        if count == 0 {
            return;
        }

        while self.archives.len() >= count {
            let Some(oldest) = self.archives.pop_front() else {
                break;
            };
            match fs::remove_file(&oldest) {
                Ok(()) => {
                    self.metrics.record_archive_removed();
                }
                Err(e) => self.sink.report(&LoggerError::io_operation(
                    "removing expired archive",
                    format!("Failed to remove '{}'", oldest.display()),
                    e,
                )),
            }
        }
    }

    /// Current local time, bumped past the previous rotation if the clock
    /// has not advanced
    fn next_rotation_time(&mut self) -> DateTime<Local> {
        let mut now = Local::now();
        if let Some(last) = self.last_rotation {
            if now <= last {
                now = last + chrono::Duration::nanoseconds(1);
            }
        }
        self.last_rotation = Some(now);
        now
    }
}

impl Appender for RotatingFileAppender {
    fn enabled(&self) -> bool {
        self.config.has_file()
    }

    fn append(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        let path = self.config.file();
        match self.config.max_size() {
            0 => write_synced(&path, data),
            max_size => self.write_rotating(&path, max_size, data),
        }
    }

    fn flush(&mut self) -> Result<()> {
        // every write is synced as it happens
        Ok(())
    }

    fn name(&self) -> &str {
        "RotatingFileAppender"
    }
}

/// Decide how much of `data` goes into a file with `room` bytes left
///
/// Returns `(write_len, consumed)`. When a newline falls inside the room the
/// cut lands on the last one: everything before it is written and the newline
/// itself is consumed, since the file boundary replaces it. Otherwise the cut
/// is a hard one at `room` bytes.
#[must_use]
pub fn cut_point(data: &[u8], room: usize) -> (usize, usize) {
    let room = room.min(data.len());
    match data[..room].iter().rposition(|&b| b == b'\n') {
        Some(idx) => (idx, idx + 1),
        None => (room, room),
    }
}

/// Archive name for `path` rotated at `now`
///
/// `app.log` becomes `app_<YYYY-MM-DD_HH-MM-SS_NNNNNNNNN>.log`; a name without
/// an extension just gets the suffix.
#[must_use]
pub fn archive_path(path: &Path, now: &DateTime<Local>) -> PathBuf {
    let mut stamp = Vec::with_capacity(32);
    append_rotate_time(&mut stamp, now);

    let mut name = OsString::new();
    name.push(path.file_stem().unwrap_or_default());
    name.push("_");
    name.push(&*String::from_utf8_lossy(&stamp));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
