//! Logging macros for ergonomic log message formatting.
//!
//! Every macro accepts two payload forms:
//!
//! - `info!(logger, "fmt {}", args..)` formats like `println!`
//! - `info!(logger; a, b, c)` concatenates values; a space separates two
//!   neighbours only when neither of them is a string
//!
//! The level is checked before any argument is evaluated or formatted.
//!
//! # Examples
//!
//! ```
//! use rust_buffered_logger::prelude::*;
//! use rust_buffered_logger::info;
//!
//! let logger = Logger::builder().stdout(false).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Value concatenation
//! let user_id = 42;
//! info!(logger; "user=", user_id, " action=", "login");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::builder().stdout(false).build();
/// use rust_buffered_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn; "retries=", 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr; $($value:expr),+ $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, &[$($crate::Arg::from($value)),+]);
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, ::std::format_args!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::builder().stdout(false).build();
/// use rust_buffered_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Trace; $($value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::builder().stdout(false).build();
/// use rust_buffered_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug; $($value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::builder().stdout(false).build();
/// use rust_buffered_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info; $($value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::builder().stdout(false).build();
/// use rust_buffered_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn; $($value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::builder().stdout(false).build();
/// use rust_buffered_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error; $($value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// Only writes the line; the process keeps running.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::builder().stdout(false).build();
/// use rust_buffered_logger::fatal;
/// fatal!(logger, "Critical system failure");
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr; $($value:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Fatal; $($value),+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
