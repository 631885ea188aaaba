//! Process-wide default logger
//!
//! The default logger is created on first use from [`default_config`], which
//! has stderr, stdout and caller capture enabled. Adjust the configuration
//! before or after the first log call; it is shared, not copied.
//!
//! A static is never dropped, so the host program must call [`shutdown`]
//! before exiting to write out whatever is still buffered.
//!
//! ```
//! use rust_buffered_logger::global;
//!
//! global::default_config().set_stdout(false);
//! global::info("service starting");
//! global::shutdown();
//! ```

use crate::core::{FlushRequest, LogLevel, Logger, LoggerConfig, Payload};
use std::panic::Location;
use std::sync::{Arc, OnceLock};

static DEFAULT_CONFIG: OnceLock<Arc<LoggerConfig>> = OnceLock::new();
static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Configuration shared by the default logger
pub fn default_config() -> &'static Arc<LoggerConfig> {
    DEFAULT_CONFIG.get_or_init(|| Arc::new(LoggerConfig::new()))
}

/// The default logger, started on first call
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(|| Logger::with_config(Arc::clone(default_config())))
}

/// Request a flush of the default logger; does nothing if it was never used
pub fn flush() -> FlushRequest {
    DEFAULT_LOGGER
        .get()
        .map_or(FlushRequest::Closed, Logger::flush)
}

/// Close the default logger, writing out everything buffered
///
/// Safe to call more than once. Lines logged afterwards are never written.
pub fn shutdown() {
    if let Some(logger) = DEFAULT_LOGGER.get() {
        logger.close();
    }
}

#[track_caller]
pub fn log<'a>(level: LogLevel, payload: impl Into<Payload<'a>>) {
    default_logger().log_at(level, Location::caller(), payload);
}

#[track_caller]
pub fn trace<'a>(payload: impl Into<Payload<'a>>) {
    default_logger().log_at(LogLevel::Trace, Location::caller(), payload);
}

#[track_caller]
pub fn debug<'a>(payload: impl Into<Payload<'a>>) {
    default_logger().log_at(LogLevel::Debug, Location::caller(), payload);
}

#[track_caller]
pub fn info<'a>(payload: impl Into<Payload<'a>>) {
    default_logger().log_at(LogLevel::Info, Location::caller(), payload);
}

#[track_caller]
pub fn warn<'a>(payload: impl Into<Payload<'a>>) {
    default_logger().log_at(LogLevel::Warn, Location::caller(), payload);
}

#[track_caller]
pub fn error<'a>(payload: impl Into<Payload<'a>>) {
    default_logger().log_at(LogLevel::Error, Location::caller(), payload);
}

#[track_caller]
pub fn fatal<'a>(payload: impl Into<Payload<'a>>) {
    default_logger().log_at(LogLevel::Fatal, Location::caller(), payload);
}
