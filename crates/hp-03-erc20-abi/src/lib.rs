//! # HP-03 ERC-20 ABI
//!
//! Fixed-layout codecs for the two ERC-20 messages the dApp handles:
//!
//! - the deposit notice the ERC-20 portal sends as an advance payload
//! - the `transfer(address,uint256)` call carried by a withdrawal voucher
//!
//! **Subsystem ID:** 03
//!
//! ## Wire Layouts
//!
//! ```text
//! Deposit (72 bytes)
//! ┌────────────────┬────────────────┬──────────────────────────────┐
//! │ token (20)     │ sender (20)    │ amount, big-endian (32)      │
//! └────────────────┴────────────────┴──────────────────────────────┘
//!
//! Transfer call (68 bytes)
//! ┌──────────┬─────────────┬────────────────┬──────────────────────┐
//! │ a9059cbb │ 0x00 × 12   │ destination(20)│ amount, big-endian   │
//! └──────────┴─────────────┴────────────────┴──────────────────────┘
//! ```
//!
//! Every field is read or written by offset. Nothing here validates meaning
//! (which token is acceptable, who may withdraw); that belongs to the
//! dispatcher in `hp-04-honeypot`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod deposit;
pub mod errors;
pub mod transfer;

pub use deposit::{decode_deposit, Erc20Deposit, DEPOSIT_PAYLOAD_LEN};
pub use errors::AbiError;
pub use transfer::{
    decode_transfer, encode_transfer, Erc20Transfer, TRANSFER_PAYLOAD_LEN, TRANSFER_SELECTOR,
};
