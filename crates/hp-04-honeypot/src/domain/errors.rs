//! # Domain Errors

use hp_02_ledger::StorageError;
use thiserror::Error;

/// Faults that make further request processing unsafe.
///
/// Anything caused by the request itself is a rejection with a status
/// report, never a `HandlerError`.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The ledger could not be made durable. In-memory state was left as it
    /// was before the request.
    #[error("ledger storage failure: {0}")]
    Storage(#[from] StorageError),
}
