//! Pool of reusable scratch buffers for rendering formatted payloads
//!
//! Buffers are handed out as [`ScratchBuffer`] guards and go back to the pool
//! when the guard drops, including when formatting panics.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::ops::{Deref, DerefMut};

/// Capacity of a freshly allocated scratch buffer
pub const SCRATCH_CAPACITY: usize = 1024;

/// Buffers that grew past this are freed instead of pooled
pub const SCRATCH_RETAIN_LIMIT: usize = 64 * 1024;

/// Upper bound on idle buffers kept by one pool
pub const POOL_LIMIT: usize = 64;

pub struct BufferPool {
    free_tx: Sender<Vec<u8>>,
    free_rx: Receiver<Vec<u8>>,
}

impl BufferPool {
    pub fn new() -> Self {
        let (free_tx, free_rx) = bounded(POOL_LIMIT);
        Self { free_tx, free_rx }
    }

    /// Check out an empty buffer, allocating one if the pool is dry
    pub fn acquire(&self) -> ScratchBuffer<'_> {
        let buf = self
            .free_rx
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(SCRATCH_CAPACITY));
        ScratchBuffer { pool: self, buf }
    }

    fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > SCRATCH_RETAIN_LIMIT {
            return;
        }
        buf.clear();
        // a full pool just lets the buffer go
        let _ = self.free_tx.try_send(buf);
    }

    /// Number of idle buffers currently pooled
    pub fn available(&self) -> usize {
        self.free_rx.len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A checked-out scratch buffer; returns itself to its pool on drop
pub struct ScratchBuffer<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for ScratchBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for ScratchBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for ScratchBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
