//! Reusable byte buffer pool.
//!
//! Buffered strategies stage their encoded output here before copying it to
//! the response sink, so a failure mid-encode never produces a truncated
//! body and repeated renders reuse allocations instead of growing fresh
//! vectors per request.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

/// A concurrency-safe pool of reusable byte buffers.
///
/// [`get`](Self::get) lends a buffer out as a [`PooledBuffer`] guard; dropping
/// the guard clears the buffer and returns it to the pool. The pool never
/// holds more than the capacity it was constructed with; surplus buffers are
/// simply freed on return.
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    capacity: usize,
}

impl BufferPool {
    /// Creates a pool that retains at most `capacity` idle buffers.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Borrows a buffer from the pool, allocating one if none are idle.
    ///
    /// The buffer is empty but may carry capacity from a previous borrow.
    pub fn get(&self) -> PooledBuffer<'_> {
        let buf = self.free.lock().pop().unwrap_or_default();
        PooledBuffer { pool: self, buf }
    }

    /// Number of idle buffers currently held by the pool.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    fn put(&self, mut buf: Vec<u8>) {
        buf.clear();
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(buf);
        }
    }
}

/// RAII guard for a borrowed buffer.
///
/// Derefs to `Vec<u8>`; on drop the buffer is cleared and handed back to the
/// pool on every exit path, so stale bytes never leak into the next borrower.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.buf));
    }
}
