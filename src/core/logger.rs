//! Main logger implementation
//!
//! Producers render a line header on their own stack, format the payload into
//! a pooled scratch buffer when it is not already plain text, and copy the
//! finished line into the active buffer under a short lock. A background
//! worker swaps the buffers and persists the drained bytes to stdout and to
//! the rotating file. Logging calls never block on I/O and never fail.

use super::{
    appender::Appender,
    args::Payload,
    buffer_pool::BufferPool,
    config::LoggerConfig,
    double_buffer::{recycle, DoubleBuffer},
    error::LoggerError,
    error_sink::ErrorSink,
    format::{short_caller_path, LineHeader, UNKNOWN_FILE},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    scheduler::{FlushRequest, FlushScheduler, FlushTarget},
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use chrono::Local;
use parking_lot::Mutex;
use std::any::Any;
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use std::time::Duration;

/// State shared between producers and the flush worker
struct Shared {
    config: Arc<LoggerConfig>,
    buffers: DoubleBuffer,
    writer: Mutex<Writer>,
    sink: ErrorSink,
    metrics: Arc<LoggerMetrics>,
}

/// Flush-side outputs, only ever touched by the thread running a cycle
struct Writer {
    console: ConsoleAppender,
    file: RotatingFileAppender,
}

impl Writer {
    fn persist(&mut self, data: &[u8], sink: &ErrorSink) {
        let appenders: [&mut dyn Appender; 2] = [&mut self.console, &mut self.file];
        for appender in appenders {
            if !appender.enabled() {
                continue;
            }
            if let Err(e) = appender.append(data).and_then(|()| appender.flush()) {
                sink.report(&e);
            }
        }
    }
}

impl FlushTarget for Shared {
    fn flush_interval(&self) -> Duration {
        self.config.effective_flush_interval()
    }

    fn flush_cycle(&self) {
        let mut writer = self.writer.lock();
        let mut drained = self.buffers.swap();

        self.metrics.record_flush(drained.len());
        if !drained.is_empty() {
            writer.persist(&drained, &self.sink);
        }

        if recycle(&mut drained) {
            self.metrics.record_buffer_reallocation();
        }
    }
}

pub struct Logger {
    shared: Arc<Shared>,
    pid: u32,
    pool: BufferPool,
    scheduler: FlushScheduler,
    close_once: Once,
}

impl Logger {
    /// Logger with the default configuration: stderr, stdout and caller
    /// capture on, every level enabled, no file
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Logger driven by a shared configuration
    ///
    /// The configuration stays live: changes made through `config` after this
    /// call apply to the next log call or flush cycle.
    #[must_use]
    pub fn with_config(config: Arc<LoggerConfig>) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_buffered_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .stdout(false)
    ///     .build();
    /// assert!(!logger.enabled(LogLevel::Info));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn from_builder(builder: LoggerBuilder) -> Self {
        let LoggerBuilder {
            config,
            console_writer,
            error_writer,
        } = builder;

        let metrics = Arc::new(LoggerMetrics::new());
        let mut sink = ErrorSink::new(Arc::clone(&config), Arc::clone(&metrics));
        if let Some(writer) = error_writer {
            sink = sink.with_writer(writer);
        }

        let mut console = ConsoleAppender::new(Arc::clone(&config));
        if let Some(writer) = console_writer {
            console = console.with_writer(writer);
        }
        let file =
            RotatingFileAppender::new(Arc::clone(&config), sink.clone(), Arc::clone(&metrics));

        let shared = Arc::new(Shared {
            config,
            buffers: DoubleBuffer::new(),
            writer: Mutex::new(Writer { console, file }),
            sink,
            metrics,
        });

        let scheduler = FlushScheduler::start(Arc::clone(&shared)).unwrap_or_else(|e| {
            shared.sink.report(&LoggerError::io_operation(
                "starting flush worker",
                "output is written only when the logger closes",
                e,
            ));
            FlushScheduler::stopped()
        });

        Self {
            shared,
            pid: std::process::id(),
            pool: BufferPool::new(),
            scheduler,
            close_once: Once::new(),
        }
    }

    /// Whether a call at `level` would produce output
    ///
    /// Always false once [`Logger::close`] has finished.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        let config = &self.shared.config;
        level >= config.level()
            && (config.stdout() || config.has_file())
            && !self.close_once.is_completed()
    }

    /// Log `payload` at `level`, attributed to the calling line
    #[track_caller]
    #[inline]
    pub fn log<'a>(&self, level: LogLevel, payload: impl Into<Payload<'a>>) {
        self.log_at(level, Location::caller(), payload);
    }

    /// Log with an explicit call site
    ///
    /// Wrappers either mark themselves `#[track_caller]` and call
    /// [`Logger::log`], or capture `Location::caller()` at their own entry
    /// point and forward it here.
    pub fn log_at<'a>(
        &self,
        level: LogLevel,
        location: &'static Location<'static>,
        payload: impl Into<Payload<'a>>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let (file, line) = if self.shared.config.caller() {
            (short_caller_path(location.file()), location.line())
        } else {
            (UNKNOWN_FILE, 0)
        };
        let header = LineHeader::render(&Local::now(), self.pid, file, line, level);

        let payload = payload.into();
        match payload.as_verbatim() {
            Some(text) => self
                .shared
                .buffers
                .append_line(header.as_bytes(), text.as_bytes()),
            None => {
                let mut scratch = self.pool.acquire();
                payload.render_into(&mut scratch);
                self.shared.buffers.append_line(header.as_bytes(), &scratch);
            }
        }
        self.shared.metrics.record_logged();
    }

    #[track_caller]
    #[inline]
    pub fn trace<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log_at(LogLevel::Trace, Location::caller(), payload);
    }

    #[track_caller]
    #[inline]
    pub fn debug<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log_at(LogLevel::Debug, Location::caller(), payload);
    }

    #[track_caller]
    #[inline]
    pub fn info<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log_at(LogLevel::Info, Location::caller(), payload);
    }

    #[track_caller]
    #[inline]
    pub fn warn<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log_at(LogLevel::Warn, Location::caller(), payload);
    }

    #[track_caller]
    #[inline]
    pub fn error<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log_at(LogLevel::Error, Location::caller(), payload);
    }

    #[track_caller]
    #[inline]
    pub fn fatal<'a>(&self, payload: impl Into<Payload<'a>>) {
        self.log_at(LogLevel::Fatal, Location::caller(), payload);
    }

    /// Ask the worker for a flush cycle without waiting for it
    ///
    /// Requests coalesce: if one is already pending this call returns
    /// immediately and the pending cycle covers it. After [`Logger::close`]
    /// this does nothing.
    pub fn flush(&self) -> FlushRequest {
        let outcome = self.scheduler.request();
        if outcome == FlushRequest::Coalesced {
            self.shared.metrics.record_coalesced_flush();
        }
        outcome
    }

    /// Stop the worker and write out everything buffered so far
    ///
    /// Only the first call does any work; later and concurrent calls return
    /// once it has finished. Lines logged after close are dropped.
    pub fn close(&self) {
        self.close_once.call_once(|| {
            if let Err(payload) = self.scheduler.stop() {
                self.shared.sink.internal_error(format_args!(
                    "flush worker panicked: {}",
                    panic_message(payload.as_ref())
                ));
            }
            self.shared.flush_cycle();
        });
    }

    pub fn is_closed(&self) -> bool {
        self.close_once.is_completed()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_buffered_logger::prelude::*;
    ///
    /// let logger = Logger::builder().stdout(false).file("").build();
    /// let metrics = logger.metrics();
    /// println!("Lines logged: {}", metrics.total_logged());
    /// println!("Rotations: {}", metrics.rotations());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn config(&self) -> &Arc<LoggerConfig> {
        &self.shared.config
    }

    /// Process id written into every header
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Bytes waiting in the active buffer for the next flush cycle
    pub fn pending_bytes(&self) -> usize {
        self.shared.buffers.pending_len()
    }

    /// Archives in the retention window, oldest first
    ///
    /// Waits for a flush cycle in progress to finish.
    pub fn archives(&self) -> Vec<PathBuf> {
        self.shared.writer.lock().file.archives().iter().cloned().collect()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Setters write through to the configuration the logger will share, so a
/// configuration passed to [`LoggerBuilder::config`] picks up any setter
/// called after it.
///
/// # Example
/// ```no_run
/// use rust_buffered_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .file("logs/app.log")
///     .max_size(50 * 1024 * 1024)
///     .max_files(10)
///     .min_level(LogLevel::Info)
///     .flush_interval(Duration::from_millis(200))
///     .build();
/// ```
pub struct LoggerBuilder {
    config: Arc<LoggerConfig>,
    console_writer: Option<Box<dyn Write + Send>>,
    error_writer: Option<Box<dyn Write + Send>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: Arc::new(LoggerConfig::new()),
            console_writer: None,
            error_writer: None,
        }
    }

    /// Share an existing configuration instead of the default one
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: Arc<LoggerConfig>) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file(self, path: impl AsRef<Path>) -> Self {
        self.config.set_file(path.as_ref());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_size(self, bytes: u64) -> Self {
        self.config.set_max_size(bytes);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_files(self, count: u32) -> Self {
        self.config.set_max_files(count);
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(self, level: LogLevel) -> Self {
        self.config.set_level(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stderr(self, enabled: bool) -> Self {
        self.config.set_stderr(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stdout(self, enabled: bool) -> Self {
        self.config.set_stdout(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller(self, enabled: bool) -> Self {
        self.config.set_caller(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(self, interval: Duration) -> Self {
        self.config.set_flush_interval(interval);
        self
    }

    /// Route console output to `writer` instead of stdout
    ///
    /// The stdout flag still decides whether anything is written.
    #[must_use = "builder methods return a new value"]
    pub fn console_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.console_writer = Some(Box::new(writer));
        self
    }

    /// Route internal diagnostics to `writer` instead of stderr
    #[must_use = "builder methods return a new value"]
    pub fn error_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.error_writer = Some(Box::new(writer));
        self
    }

    /// Build the Logger and start its flush worker
    pub fn build(self) -> Logger {
        Logger::from_builder(self)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
