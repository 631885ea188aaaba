//! Shared, lock-free logger configuration
//!
//! Every field is an independent atomic, so a `LoggerConfig` can be read on the
//! hot path and rewritten from any thread while the logger runs. Changes are
//! picked up by the next append (level, flags) or the next flush cycle (file,
//! size, count, interval).
//!
//! # Example
//!
//! ```
//! use rust_buffered_logger::{LogLevel, LoggerConfig};
//! use std::time::Duration;
//!
//! let config = LoggerConfig::disabled()
//!     .with_stdout(true)
//!     .with_level(LogLevel::Info)
//!     .with_flush_interval(Duration::from_millis(100));
//!
//! // Later, while shared with a running logger:
//! config.set_level(LogLevel::Warn).set_caller(false);
//! assert_eq!(config.level(), LogLevel::Warn);
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Lower bound applied to the flush interval when the scheduler arms its timer
pub const MIN_FLUSH_INTERVAL: Duration = Duration::from_millis(50);

pub struct LoggerConfig {
    file: ArcSwap<PathBuf>,
    max_size: AtomicU64,
    max_files: AtomicU32,
    level: AtomicU8,
    stderr: AtomicBool,
    stdout: AtomicBool,
    caller: AtomicBool,
    flush_interval_nanos: AtomicU64,
}

impl LoggerConfig {
    /// Configuration used when a logger is built without one: stderr, stdout
    /// and caller capture on, lowest level, no file, no rotation, no count
    /// limit, floor flush interval.
    #[must_use]
    pub fn new() -> Self {
        Self::disabled()
            .with_stderr(true)
            .with_stdout(true)
            .with_caller(true)
    }

    /// Everything off: no outputs, no caller capture, lowest level
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            file: ArcSwap::from_pointee(PathBuf::new()),
            max_size: AtomicU64::new(0),
            max_files: AtomicU32::new(0),
            level: AtomicU8::new(LogLevel::Trace as u8),
            stderr: AtomicBool::new(false),
            stdout: AtomicBool::new(false),
            caller: AtomicBool::new(false),
            flush_interval_nanos: AtomicU64::new(0),
        }
    }

    // Runtime setters

    /// Target file; an empty path disables file output
    pub fn set_file(&self, path: impl Into<PathBuf>) -> &Self {
        self.file.store(Arc::new(path.into()));
        self
    }

    /// Per-file size threshold in bytes; 0 disables rotation
    pub fn set_max_size(&self, bytes: u64) -> &Self {
        self.max_size.store(bytes, Ordering::Relaxed);
        self
    }

    /// Maximum file count for the retention window; 0 means unlimited
    pub fn set_max_files(&self, count: u32) -> &Self {
        self.max_files.store(count, Ordering::Relaxed);
        self
    }

    pub fn set_level(&self, level: LogLevel) -> &Self {
        self.level.store(level as u8, Ordering::Relaxed);
        self
    }

    pub fn set_stderr(&self, enabled: bool) -> &Self {
        self.stderr.store(enabled, Ordering::Relaxed);
        self
    }

    pub fn set_stdout(&self, enabled: bool) -> &Self {
        self.stdout.store(enabled, Ordering::Relaxed);
        self
    }

    pub fn set_caller(&self, enabled: bool) -> &Self {
        self.caller.store(enabled, Ordering::Relaxed);
        self
    }

    /// Periodic flush interval; values under [`MIN_FLUSH_INTERVAL`] are raised
    /// to it when the timer is armed
    pub fn set_flush_interval(&self, interval: Duration) -> &Self {
        let nanos = u64::try_from(interval.as_nanos()).unwrap_or(u64::MAX);
        self.flush_interval_nanos.store(nanos, Ordering::Relaxed);
        self
    }

    // Construction-time builders

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.set_file(path);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(self, bytes: u64) -> Self {
        self.set_max_size(bytes);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_files(self, count: u32) -> Self {
        self.set_max_files(count);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.set_level(level);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_stderr(self, enabled: bool) -> Self {
        self.set_stderr(enabled);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_stdout(self, enabled: bool) -> Self {
        self.set_stdout(enabled);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_caller(self, enabled: bool) -> Self {
        self.set_caller(enabled);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_flush_interval(self, interval: Duration) -> Self {
        self.set_flush_interval(interval);
        self
    }

    // Getters

    #[inline]
    pub fn file(&self) -> Arc<PathBuf> {
        self.file.load_full()
    }

    /// Whether a non-empty file path is configured, without cloning it
    #[inline]
    pub fn has_file(&self) -> bool {
        !self.file.load().as_os_str().is_empty()
    }

    #[inline]
    pub fn max_size(&self) -> u64 {
        self.max_size.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn max_files(&self) -> u32 {
        self.max_files.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_ordinal(self.level.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn stderr(&self) -> bool {
        self.stderr.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn stdout(&self) -> bool {
        self.stdout.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn caller(&self) -> bool {
        self.caller.load(Ordering::Relaxed)
    }

    /// The configured interval as stored, before the floor is applied
    #[inline]
    pub fn flush_interval(&self) -> Duration {
        Duration::from_nanos(self.flush_interval_nanos.load(Ordering::Relaxed))
    }

    /// The interval the flush scheduler actually waits for
    #[inline]
    pub fn effective_flush_interval(&self) -> Duration {
        self.flush_interval().max(MIN_FLUSH_INTERVAL)
    }

    // Snapshots

    /// Copy every field into a plain serializable value
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            file: self.file().as_ref().clone(),
            max_size: self.max_size(),
            max_files: self.max_files(),
            level: self.level(),
            stderr: self.stderr(),
            stdout: self.stdout(),
            caller: self.caller(),
            flush_interval_ms: u64::try_from(self.flush_interval().as_millis())
                .unwrap_or(u64::MAX),
        }
    }

    /// Store every field of `snapshot`; each field is published independently
    pub fn apply(&self, snapshot: &ConfigSnapshot) -> &Self {
        self.set_file(snapshot.file.clone())
            .set_max_size(snapshot.max_size)
            .set_max_files(snapshot.max_files)
            .set_level(snapshot.level)
            .set_stderr(snapshot.stderr)
            .set_stdout(snapshot.stdout)
            .set_caller(snapshot.caller)
            .set_flush_interval(Duration::from_millis(snapshot.flush_interval_ms))
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &ConfigSnapshot) -> Self {
        let config = Self::disabled();
        config.apply(snapshot);
        config
    }

    /// Parse a JSON document into a configuration; missing keys take the
    /// defaults of [`LoggerConfig::new`]
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON for a
    /// [`ConfigSnapshot`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: ConfigSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(&snapshot))
    }

    /// Read and parse a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger configuration",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("file", &self.file())
            .field("max_size", &self.max_size())
            .field("max_files", &self.max_files())
            .field("level", &self.level())
            .field("stderr", &self.stderr())
            .field("stdout", &self.stdout())
            .field("caller", &self.caller())
            .field("flush_interval", &self.flush_interval())
            .finish()
    }
}

/// Plain-value copy of a [`LoggerConfig`], used for loading and saving
///
/// ```
/// use rust_buffered_logger::LoggerConfig;
///
/// let config = LoggerConfig::from_json_str(r#"{
///     "file": "logs/app.log",
///     "max_size": 52428800,
///     "max_files": 10,
///     "level": "info",
///     "stdout": false
/// }"#).unwrap();
///
/// assert_eq!(config.max_files(), 10);
/// assert!(config.stderr()); // not in the document, so the default applies
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSnapshot {
    pub file: PathBuf,
    pub max_size: u64,
    pub max_files: u32,
    pub level: LogLevel,
    pub stderr: bool,
    pub stdout: bool,
    pub caller: bool,
    pub flush_interval_ms: u64,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        LoggerConfig::new().snapshot()
    }
}
