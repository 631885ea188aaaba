//! Console appender implementation

use crate::core::{Appender, LoggerConfig, LoggerError, Result};
use std::io::{self, Write};
use std::sync::Arc;

/// Writes drained buffers to standard output while the stdout flag is set
pub struct ConsoleAppender {
    config: Arc<LoggerConfig>,
    /// Replaces stdout when set
    writer: Option<Box<dyn Write + Send>>,
}

impl ConsoleAppender {
    pub fn new(config: Arc<LoggerConfig>) -> Self {
        Self {
            config,
            writer: None,
        }
    }

    /// Send console output to `writer` instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use rust_buffered_logger::appenders::ConsoleAppender;
    /// use rust_buffered_logger::LoggerConfig;
    /// use std::sync::Arc;
    ///
    /// let appender = ConsoleAppender::new(Arc::new(LoggerConfig::new()))
    ///     .with_writer(Box::new(std::io::sink()));
    /// ```
    #[must_use]
    pub fn with_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.writer = Some(writer);
        self
    }
}

impl Appender for ConsoleAppender {
    fn enabled(&self) -> bool {
        self.config.stdout()
    }

    fn append(&mut self, data: &[u8]) -> Result<()> {
        let written = match self.writer.as_mut() {
            Some(writer) => writer.write_all(data),
            None => io::stdout().lock().write_all(data),
        };
        written.map_err(|e| {
            LoggerError::io_operation(
                "writing to stdout",
                format!("{} bytes dropped", data.len()),
                e,
            )
        })
    }

    fn flush(&mut self) -> Result<()> {
        let flushed = match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => io::stdout().flush(),
        };
        flushed.map_err(|e| LoggerError::io_operation("flushing stdout", "flush failed", e))
    }

    fn name(&self) -> &str {
        "console"
    }
}
