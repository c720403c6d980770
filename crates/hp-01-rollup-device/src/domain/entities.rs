//! # Domain Entities
//!
//! Requests delivered by the host and the verdict returned for each one.

use shared_types::Address;

/// Kind of the next request announced by `finish`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// State-mutating input.
    Advance,
    /// Read-only query.
    Inspect,
}

/// What the host will deliver next, as announced by `finish`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NextRequest {
    /// Advance or inspect.
    pub kind: RequestKind,
    /// Payload length in bytes.
    pub payload_len: usize,
}

/// Metadata the host attaches to every advance request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputMetadata {
    /// Account or contract that submitted the input. Sole authorization key.
    pub sender: Address,
    /// Base-layer block that included the input.
    pub block_number: u64,
    /// Base-layer block timestamp.
    pub timestamp: u64,
    /// Epoch the input belongs to.
    pub epoch_index: u64,
    /// Index of the input within the epoch.
    pub input_index: u64,
}

/// A state-mutating input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceRequest {
    /// Host-supplied metadata.
    pub metadata: InputMetadata,
    /// Raw payload bytes, untrusted.
    pub payload: Vec<u8>,
}

/// A read-only query. Never persisted by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InspectRequest {
    /// Raw query bytes.
    pub payload: Vec<u8>,
}

/// Outcome of one request, reported to the host on the next `finish`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Keep the request's effects.
    Accept,
    /// Discard the request's effects.
    Reject,
}

impl Verdict {
    /// True for [`Verdict::Accept`].
    pub fn is_accept(self) -> bool {
        matches!(self, Self::Accept)
    }
}

impl From<bool> for Verdict {
    fn from(accept: bool) -> Self {
        if accept {
            Self::Accept
        } else {
            Self::Reject
        }
    }
}
