//! Appender trait for flush-cycle output destinations

use super::error::Result;

/// A destination the flush cycle hands each drained buffer to
///
/// Appenders run only on the flush path, one at a time, so they are free to
/// keep mutable state without further synchronization.
pub trait Appender: Send {
    /// Whether the current configuration routes output here
    fn enabled(&self) -> bool {
        true
    }

    /// Persist a run of complete, newline-terminated lines
    fn append(&mut self, data: &[u8]) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    fn name(&self) -> &str;
}
