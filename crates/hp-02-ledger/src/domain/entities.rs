//! # Domain Entities
//!
//! The persisted dApp state and its on-disk record.

use shared_types::Be256;

/// Byte offset of the state record on the storage medium.
pub const STATE_OFFSET: u64 = 0;

/// Encoded size of [`DappState`].
pub const STATE_RECORD_LEN: usize = Be256::LEN;

/// Everything the dApp persists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DappState {
    /// Tokens held by the dApp.
    pub balance: Be256,
}

impl DappState {
    /// Encode as `[balance:32]`.
    pub fn encode(&self) -> [u8; STATE_RECORD_LEN] {
        self.balance.to_be_bytes()
    }

    /// Decode a record. Every 32-byte record is a valid balance.
    pub fn decode(record: [u8; STATE_RECORD_LEN]) -> Self {
        Self {
            balance: Be256::from_be_bytes(record),
        }
    }
}
