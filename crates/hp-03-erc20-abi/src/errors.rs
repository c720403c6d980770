//! # Codec Errors

use thiserror::Error;

/// Structural decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Payload is not exactly the fixed record size.
    #[error("invalid payload length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Fixed record size
        expected: usize,
        /// Actual payload size
        got: usize,
    },

    /// The first four bytes are not the expected function selector.
    #[error("unexpected function selector: 0x{0}")]
    UnexpectedSelector(String),

    /// Non-zero bytes where the ABI requires zero padding.
    #[error("non-zero padding in address word")]
    DirtyPadding,
}
