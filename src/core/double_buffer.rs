//! Active/draining byte buffers shared by producers and the flush worker
//!
//! Producers append complete lines to the active buffer under a short lock.
//! The flush worker swaps the two buffers, which is the only point where it
//! touches the active side, then persists the draining buffer without holding
//! the producers' lock.

use parking_lot::{Mutex, MutexGuard};

/// Default capacity of both buffers, and the settled length below which an
/// oversized buffer is reallocated
pub const BUFFER_LOW_WATER: usize = 32 * 1024;

/// Capacity above which a drained buffer becomes a candidate for reallocation
pub const BUFFER_HIGH_WATER: usize = 4 * 1024 * 1024;

pub struct DoubleBuffer {
    active: Mutex<Vec<u8>>,
    draining: Mutex<Vec<u8>>,
}

impl DoubleBuffer {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(Vec::with_capacity(BUFFER_LOW_WATER)),
            draining: Mutex::new(Vec::with_capacity(BUFFER_LOW_WATER)),
        }
    }

    /// Append `header`, `message` and a trailing newline as one unit
    #[inline]
    pub fn append_line(&self, header: &[u8], message: &[u8]) {
        let mut active = self.active.lock();
        active.reserve(header.len() + message.len() + 1);
        active.extend_from_slice(header);
        active.extend_from_slice(message);
        active.push(b'\n');
    }

    /// Exchange the buffers and hand back the one that was active
    ///
    /// The producers' lock is held only for the exchange itself. The returned
    /// guard keeps other drainers out until it is dropped.
    pub fn swap(&self) -> MutexGuard<'_, Vec<u8>> {
        let mut draining = self.draining.lock();
        {
            let mut active = self.active.lock();
            std::mem::swap(&mut *active, &mut *draining);
        }
        draining
    }

    /// Bytes appended since the last swap
    pub fn pending_len(&self) -> usize {
        self.active.lock().len()
    }
}

impl Default for DoubleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Prepare a drained buffer for reuse
///
/// A buffer that grew past [`BUFFER_HIGH_WATER`] during a burst but whose
/// settled length is at most [`BUFFER_LOW_WATER`] is replaced by a fresh one
/// at the default capacity; otherwise it is cleared in place. Returns whether
/// it was reallocated.
pub fn recycle(buf: &mut Vec<u8>) -> bool {
    if buf.capacity() > BUFFER_HIGH_WATER && buf.len() <= BUFFER_LOW_WATER {
        *buf = Vec::with_capacity(BUFFER_LOW_WATER);
        return true;
    }
    buf.clear();
    false
}
