//! # Domain Entities

use hp_03_erc20_abi::DEPOSIT_PAYLOAD_LEN;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;

// =============================================================================
// ADDRESS BOOK
// =============================================================================

/// The three addresses the dApp is deployed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBook {
    /// ERC-20 portal; the only accepted source of deposits.
    pub portal: Address,
    /// The only account allowed to withdraw, and the recipient of every
    /// withdrawal.
    pub withdrawal: Address,
    /// The only ERC-20 contract whose deposits are accepted.
    pub token: Address,
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// What an advance request is, judged by sender and payload length only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestClass {
    /// Portal deposit notice.
    Deposit,
    /// Withdrawal of the whole balance.
    Withdrawal,
    /// Neither.
    Invalid,
}

/// Classify an advance request.
pub fn classify(book: &AddressBook, sender: &Address, payload_len: usize) -> RequestClass {
    if *sender == book.portal && payload_len == DEPOSIT_PAYLOAD_LEN {
        RequestClass::Deposit
    } else if *sender == book.withdrawal && payload_len == 0 {
        RequestClass::Withdrawal
    } else {
        RequestClass::Invalid
    }
}

// =============================================================================
// STATUS CODES
// =============================================================================

/// Outcome of an advance request, reported to the host as one byte.
///
/// `0x01` is left unassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AdvanceStatus {
    /// Deposit credited or withdrawal voucher issued.
    Success = 0x00,
    /// Deposit of a token other than the accepted one.
    DepositInvalidToken = 0x02,
    /// Deposit would overflow the balance.
    DepositBalanceOverflow = 0x03,
    /// Withdrawal with a zero balance.
    WithdrawNoFunds = 0x04,
    /// The host refused the withdrawal voucher.
    WithdrawVoucherFailed = 0x05,
    /// Unknown sender or malformed payload.
    InvalidRequest = 0xFF,
}

impl AdvanceStatus {
    /// Wire value.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parse a wire value.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Success),
            0x02 => Some(Self::DepositInvalidToken),
            0x03 => Some(Self::DepositBalanceOverflow),
            0x04 => Some(Self::WithdrawNoFunds),
            0x05 => Some(Self::WithdrawVoucherFailed),
            0xFF => Some(Self::InvalidRequest),
            _ => None,
        }
    }

    /// The status report payload.
    pub const fn as_report(self) -> [u8; 1] {
        [self.code()]
    }

    /// True only for [`AdvanceStatus::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for AdvanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::DepositInvalidToken => "deposit-invalid-token",
            Self::DepositBalanceOverflow => "deposit-balance-overflow",
            Self::WithdrawNoFunds => "withdraw-no-funds",
            Self::WithdrawVoucherFailed => "withdraw-voucher-failed",
            Self::InvalidRequest => "invalid-request",
        };
        f.write_str(name)
    }
}
