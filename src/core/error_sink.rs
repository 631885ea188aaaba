//! Best-effort diagnostics for failures inside the logger
//!
//! Nothing reported here ever reaches a caller of a logging method. Lines are
//! written as `[LOGGER ERROR] <message>` to stderr (or an override writer),
//! and only while the stderr flag of the shared configuration is set.

use super::args::Payload;
use super::config::LoggerConfig;
use super::error::LoggerError;
use super::metrics::LoggerMetrics;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

const PREFIX: &[u8] = b"[LOGGER ERROR] ";

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

#[derive(Clone)]
pub struct ErrorSink {
    config: Arc<LoggerConfig>,
    metrics: Arc<LoggerMetrics>,
    writer: Option<SharedWriter>,
}

impl ErrorSink {
    pub fn new(config: Arc<LoggerConfig>, metrics: Arc<LoggerMetrics>) -> Self {
        Self {
            config,
            metrics,
            writer: None,
        }
    }

    /// Send diagnostics to `writer` instead of stderr
    #[must_use]
    pub fn with_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.writer = Some(Arc::new(Mutex::new(writer)));
        self
    }

    /// Write one diagnostic line if stderr output is enabled
    pub fn internal_error<'a>(&self, message: impl Into<Payload<'a>>) {
        if !self.config.stderr() {
            return;
        }

        let message = message.into();
        let mut line = Vec::with_capacity(128);
        line.extend_from_slice(PREFIX);
        message.render_into(&mut line);
        line.push(b'\n');

        // nowhere left to report a failure to
        let _ = match &self.writer {
            Some(writer) => writer.lock().write_all(&line),
            None => io::stderr().lock().write_all(&line),
        };
    }

    /// Count a persistence failure and describe it on the sink
    pub fn report(&self, err: &LoggerError) {
        self.metrics.record_io_error();
        self.internal_error(format_args!("{}", err));
    }
}
