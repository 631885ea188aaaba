//! Core logger types and traits

pub mod appender;
pub mod args;
pub mod buffer_pool;
pub mod config;
pub mod double_buffer;
pub mod error;
pub mod error_sink;
pub mod format;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod scheduler;

pub use appender::Appender;
pub use args::{Arg, Payload, FORMAT_ERROR_MARKER};
pub use buffer_pool::{BufferPool, ScratchBuffer};
pub use config::{ConfigSnapshot, LoggerConfig, MIN_FLUSH_INTERVAL};
pub use double_buffer::DoubleBuffer;
pub use error::{LoggerError, Result};
pub use error_sink::ErrorSink;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use scheduler::{FlushRequest, FlushScheduler, FlushTarget};
