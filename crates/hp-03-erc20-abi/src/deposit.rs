//! # Portal Deposit Notice
//!
//! The ERC-20 portal announces a deposit with a packed
//! `[token:20][sender:20][amount:32]` record.

use crate::errors::AbiError;
use shared_types::{Address, Be256};
use std::ops::Range;

/// Exact size of a deposit notice.
pub const DEPOSIT_PAYLOAD_LEN: usize = 72;

const TOKEN: Range<usize> = 0..20;
const SENDER: Range<usize> = 20..40;
const AMOUNT: Range<usize> = 40..72;

/// A decoded deposit notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Erc20Deposit {
    /// Token contract the deposit was made in.
    pub token: Address,
    /// Account that made the deposit on the base layer.
    pub sender: Address,
    /// Amount deposited.
    pub amount: Be256,
}

impl Erc20Deposit {
    /// Encode back into the portal's packed layout.
    pub fn encode(&self) -> [u8; DEPOSIT_PAYLOAD_LEN] {
        let mut out = [0u8; DEPOSIT_PAYLOAD_LEN];
        out[TOKEN].copy_from_slice(self.token.as_bytes());
        out[SENDER].copy_from_slice(self.sender.as_bytes());
        out[AMOUNT].copy_from_slice(self.amount.as_bytes());
        out
    }
}

/// Decode a deposit notice.
///
/// Only the length is checked. The token is returned as-is for the caller
/// to compare against the accepted one.
pub fn decode_deposit(payload: &[u8]) -> Result<Erc20Deposit, AbiError> {
    let record: &[u8; DEPOSIT_PAYLOAD_LEN] =
        payload.try_into().map_err(|_| AbiError::InvalidLength {
            expected: DEPOSIT_PAYLOAD_LEN,
            got: payload.len(),
        })?;

    let mut token = [0u8; Address::LEN];
    let mut sender = [0u8; Address::LEN];
    let mut amount = [0u8; Be256::LEN];
    token.copy_from_slice(&record[TOKEN]);
    sender.copy_from_slice(&record[SENDER]);
    amount.copy_from_slice(&record[AMOUNT]);

    Ok(Erc20Deposit {
        token: Address::new(token),
        sender: Address::new(sender),
        amount: Be256::from_be_bytes(amount),
    })
}
