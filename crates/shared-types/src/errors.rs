//! # Error Types
//!
//! Errors produced by the shared value types.

use thiserror::Error;

/// Addition carried out of the most significant byte.
///
/// The sum does not fit in 256 bits. Callers must treat this as a rejected
/// transition; there is no wrapped value to fall back on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("256-bit arithmetic overflow")]
pub struct ArithmeticOverflow;

/// Errors when parsing fixed-width byte values from text or slices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBytesError {
    /// Input is not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Input decoded to the wrong number of bytes.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Required byte length
        expected: usize,
        /// Actual byte length
        got: usize,
    },
}
