//! # Domain Errors
//!
//! Error types for the rollup host protocol.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the host device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Device node could not be opened.
    #[error("unable to open rollup device {path}: {source}")]
    Open {
        /// Device path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A device operation was refused by the driver.
    #[error("rollup {op} failed: {source}")]
    Ioctl {
        /// Operation name
        op: &'static str,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// `finish` announced a request type this protocol does not know.
    #[error("unknown request type: {0}")]
    UnknownRequestType(i32),

    /// A read did not match the request announced by `finish`.
    #[error("protocol violation: {0}")]
    Protocol(&'static str),

    /// The device cannot express the requested output.
    #[error("unsupported by rollup device: {0}")]
    Unsupported(&'static str),

    /// The host rejected an output.
    #[error("output rejected by host: {0}")]
    Rejected(String),

    /// The host has no more requests and closed the channel.
    #[error("rollup device closed")]
    Closed,
}

/// Failures that end the request loop.
#[derive(Debug, Error)]
pub enum RollupError {
    /// Host interface is unusable.
    #[error("host device failure: {0}")]
    Device(#[from] DeviceError),

    /// The request handler hit an unrecoverable fault.
    #[error("request handler failure: {0}")]
    Handler(#[source] Box<dyn std::error::Error + Send + Sync>),
}
