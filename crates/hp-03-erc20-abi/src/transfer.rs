//! # Transfer Call
//!
//! `transfer(address,uint256)` calldata, both arguments static. The
//! selector is the first four bytes of
//! `keccak256("transfer(address,uint256)")`, fixed at build time.

use crate::errors::AbiError;
use shared_types::{Address, Be256};
use std::ops::Range;

/// Selector of `transfer(address,uint256)`.
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Selector plus the zero padding of the address word.
const HEADER_LEN: usize = 16;

/// Exact size of the encoded call.
pub const TRANSFER_PAYLOAD_LEN: usize = HEADER_LEN + Address::LEN + Be256::LEN;

const SELECTOR: Range<usize> = 0..4;
const PADDING: Range<usize> = 4..HEADER_LEN;
const DESTINATION: Range<usize> = HEADER_LEN..HEADER_LEN + Address::LEN;
const AMOUNT: Range<usize> = HEADER_LEN + Address::LEN..TRANSFER_PAYLOAD_LEN;

/// Arguments of a transfer call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Erc20Transfer {
    /// Recipient of the tokens.
    pub destination: Address,
    /// Amount transferred.
    pub amount: Be256,
}

impl Erc20Transfer {
    /// Encode as calldata.
    pub fn encode(&self) -> [u8; TRANSFER_PAYLOAD_LEN] {
        encode_transfer(&self.destination, &self.amount)
    }
}

/// Encode `transfer(destination, amount)` calldata.
pub fn encode_transfer(destination: &Address, amount: &Be256) -> [u8; TRANSFER_PAYLOAD_LEN] {
    let mut out = [0u8; TRANSFER_PAYLOAD_LEN];
    out[SELECTOR].copy_from_slice(&TRANSFER_SELECTOR);
    out[DESTINATION].copy_from_slice(destination.as_bytes());
    out[AMOUNT].copy_from_slice(amount.as_bytes());
    out
}

/// Decode `transfer` calldata, checking selector and padding.
pub fn decode_transfer(payload: &[u8]) -> Result<Erc20Transfer, AbiError> {
    if payload.len() != TRANSFER_PAYLOAD_LEN {
        return Err(AbiError::InvalidLength {
            expected: TRANSFER_PAYLOAD_LEN,
            got: payload.len(),
        });
    }
    if payload[SELECTOR] != TRANSFER_SELECTOR {
        return Err(AbiError::UnexpectedSelector(hex::encode(&payload[SELECTOR])));
    }
    if payload[PADDING].iter().any(|b| *b != 0) {
        return Err(AbiError::DirtyPadding);
    }

    let destination = Address::from_slice(&payload[DESTINATION]).ok_or(AbiError::InvalidLength {
        expected: Address::LEN,
        got: payload[DESTINATION].len(),
    })?;
    let amount = Be256::from_slice(&payload[AMOUNT]).ok_or(AbiError::InvalidLength {
        expected: Be256::LEN,
        got: payload[AMOUNT].len(),
    })?;

    Ok(Erc20Transfer {
        destination,
        amount,
    })
}
