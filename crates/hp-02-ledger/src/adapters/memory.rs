//! In-Memory Storage Adapter
//!
//! Implements `StateStorage` with a write buffer and a separate "durable"
//! image that only changes on flush. Clones share the durable image, so a
//! test can drop a ledger and reload from what was actually flushed.

use crate::domain::StorageError;
use crate::ports::StateStorage;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Volatile stand-in for the state block device.
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    pending: Vec<u8>,
    durable: Arc<Mutex<Vec<u8>>>,
    fail_flush: bool,
    flushes: u64,
}

impl InMemoryStorage {
    /// A zero-filled medium of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self::from_durable(Arc::new(Mutex::new(vec![0u8; capacity])))
    }

    /// Reopen a medium from a durable image shared with another handle.
    pub fn from_durable(durable: Arc<Mutex<Vec<u8>>>) -> Self {
        let pending = durable.lock().clone();
        Self {
            pending,
            durable,
            fail_flush: false,
            flushes: 0,
        }
    }

    /// Make every flush fail with an I/O error.
    pub fn with_failing_flush(mut self) -> Self {
        self.fail_flush = true;
        self
    }

    /// Shared handle on the durable image.
    pub fn durable(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.durable)
    }

    /// Snapshot of the durable image.
    pub fn durable_bytes(&self) -> Vec<u8> {
        self.durable.lock().clone()
    }

    /// Number of successful flushes.
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    fn range(&self, offset: u64, len: usize) -> Result<std::ops::Range<usize>, StorageError> {
        let capacity = self.pending.len() as u64;
        let out_of_bounds = || StorageError::OutOfBounds {
            offset,
            len,
            capacity,
        };
        let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(len).ok_or_else(out_of_bounds)?;
        if end > self.pending.len() {
            return Err(out_of_bounds());
        }
        Ok(start..end)
    }
}

impl StateStorage for InMemoryStorage {
    fn capacity(&mut self) -> Result<u64, StorageError> {
        Ok(self.pending.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError> {
        let range = self.range(offset, buf.len())?;
        buf.copy_from_slice(&self.pending[range]);
        Ok(())
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError> {
        let range = self.range(offset, data.len())?;
        self.pending[range].copy_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        if self.fail_flush {
            return Err(StorageError::Io {
                op: "flush",
                source: io::Error::new(io::ErrorKind::Other, "injected flush failure"),
            });
        }
        self.durable.lock().copy_from_slice(&self.pending);
        self.flushes += 1;
        Ok(())
    }
}
