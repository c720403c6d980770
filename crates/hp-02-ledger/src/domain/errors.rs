//! # Domain Errors
//!
//! Storage failures and rejected ledger transitions.

use shared_types::ArithmeticOverflow;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the durable storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The state device does not exist.
    #[error("state device not found: {path}")]
    NotFound {
        /// Device path
        path: PathBuf,
    },

    /// The state device exists but could not be opened.
    #[error("unable to open state device {path}: {source}")]
    Open {
        /// Device path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Another process holds the state device.
    #[error("state device already in use: {path}")]
    Locked {
        /// Device path
        path: PathBuf,
    },

    /// The medium cannot hold one state record.
    #[error("state device too small: {size} bytes, need {required}")]
    TooSmall {
        /// Medium size in bytes
        size: u64,
        /// Record size in bytes
        required: u64,
    },

    /// Access past the end of the medium.
    #[error("access out of bounds: offset {offset} + {len} > {capacity}")]
    OutOfBounds {
        /// Start offset
        offset: u64,
        /// Access length
        len: usize,
        /// Medium size
        capacity: u64,
    },

    /// I/O failure during an operation.
    #[error("state device {op} failed: {source}")]
    Io {
        /// Operation name
        op: &'static str,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Errors from ledger transitions.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The deposit would push the balance past 2^256 - 1.
    #[error("balance overflow")]
    Overflow(#[from] ArithmeticOverflow),

    /// Withdrawal requested with a zero balance.
    #[error("no funds to withdraw")]
    NoFunds,

    /// The state could not be read or made durable.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}
