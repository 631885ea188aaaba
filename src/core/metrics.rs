//! Logger metrics for observability
//!
//! Counters for the producer path, the flush cycle and the rotation engine.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_buffered_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_flush(128);
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.bytes_flushed(), 128);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines appended to the active buffer
    total_logged: AtomicU64,

    /// Flush cycles executed, including empty ones
    flush_cycles: AtomicU64,

    /// Bytes taken out of the draining buffer
    bytes_flushed: AtomicU64,

    /// Live files moved to an archive name
    rotations: AtomicU64,

    /// Archives evicted by the retention window
    archives_removed: AtomicU64,

    /// I/O failures reported to the error sink
    io_errors: AtomicU64,

    /// Flush requests folded into one already pending
    coalesced_flushes: AtomicU64,

    /// Drained buffers reallocated down to the default capacity
    buffer_reallocations: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            flush_cycles: AtomicU64::new(0),
            bytes_flushed: AtomicU64::new(0),
            rotations: AtomicU64::new(0),
            archives_removed: AtomicU64::new(0),
            io_errors: AtomicU64::new(0),
            coalesced_flushes: AtomicU64::new(0),
            buffer_reallocations: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_cycles(&self) -> u64 {
        self.flush_cycles.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_flushed(&self) -> u64 {
        self.bytes_flushed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rotations(&self) -> u64 {
        self.rotations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn archives_removed(&self) -> u64 {
        self.archives_removed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn io_errors(&self) -> u64 {
        self.io_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn coalesced_flushes(&self) -> u64 {
        self.coalesced_flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn buffer_reallocations(&self) -> u64 {
        self.buffer_reallocations.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Record one flush cycle that drained `bytes`
    #[inline]
    pub fn record_flush(&self, bytes: usize) -> u64 {
        self.bytes_flushed.fetch_add(bytes as u64, Ordering::Relaxed);
        self.flush_cycles.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rotation(&self) -> u64 {
        self.rotations.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_archive_removed(&self) -> u64 {
        self.archives_removed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_io_error(&self) -> u64 {
        self.io_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_coalesced_flush(&self) -> u64 {
        self.coalesced_flushes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_buffer_reallocation(&self) -> u64 {
        self.buffer_reallocations.fetch_add(1, Ordering::Relaxed)
    }

    /// Average bytes per non-empty flush; 0.0 before the first flush
    pub fn average_flush_bytes(&self) -> f64 {
        let cycles = self.flush_cycles();
        if cycles == 0 {
            return 0.0;
        }
        self.bytes_flushed() as f64 / cycles as f64
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
