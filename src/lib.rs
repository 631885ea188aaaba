//! # Rust Buffered Logger
//!
//! An in-process, append-only logging engine. Producer threads format lines
//! into a shared double buffer without ever touching I/O; a background worker
//! persists them to stdout and to a size-rotated, retention-bounded file.
//!
//! ## Features
//!
//! - **Non-blocking**: log calls take one short lock and never wait on I/O
//! - **Fixed line format**: `2025-01-08 10:30:45.123456 4242 src/main.rs:12 INF | message`
//! - **Rotation**: size threshold with newline-aligned cuts and a bounded archive count
//! - **Live configuration**: every setting is atomic and can change while logging
//!
//! ## Example
//!
//! ```no_run
//! use rust_buffered_logger::prelude::*;
//! use rust_buffered_logger::info;
//!
//! let logger = Logger::builder()
//!     .file("logs/app.log")
//!     .max_size(10 * 1024 * 1024)
//!     .max_files(5)
//!     .build();
//!
//! info!(logger, "listening on {}", 8080);
//! logger.close();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

#[cfg(feature = "global")]
pub mod global;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender};
    pub use crate::core::{
        Appender, Arg, ConfigSnapshot, FlushRequest, LogLevel, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, Payload, Result,
    };
}

pub use appenders::{ConsoleAppender, RotatingFileAppender};
pub use core::{
    Appender, Arg, ConfigSnapshot, FlushRequest, LogLevel, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, Payload, Result, FORMAT_ERROR_MARKER, MIN_FLUSH_INTERVAL,
};
