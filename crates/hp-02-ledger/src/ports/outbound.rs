//! # Outbound Ports
//!
//! The block-structured medium the ledger persists to.

use crate::domain::StorageError;

/// Random-access durable storage.
///
/// Writes are not durable until [`StateStorage::flush`] returns `Ok`. An
/// external reader may observe the medium between any two calls.
pub trait StateStorage {
    /// Size of the medium in bytes.
    fn capacity(&mut self) -> Result<u64, StorageError>;

    /// Fill `buf` from `offset`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` at `offset`.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError>;

    /// Block until every previous write is durable.
    fn flush(&mut self) -> Result<(), StorageError>;
}
