//! # Honeypot Service
//!
//! Turns classified advance requests into ledger transitions, reports and
//! vouchers.
//!
//! ## Withdrawal Ordering
//!
//! ```text
//! balance == 0 ──────────────────────────────► WithdrawNoFunds
//! emit voucher(token, transfer(withdrawal, balance))
//!   └─ refused ──────────────────────────────► WithdrawVoucherFailed (balance kept)
//! zero balance + flush
//!   └─ storage fault ────────────────────────► HandlerError (loop ends, input never accepted)
//! ─────────────────────────────────────────────► Success
//! ```
//!
//! The voucher is issued before the balance is cleared, so a refused voucher
//! never costs the dApp its funds.

use crate::domain::{classify, AddressBook, AdvanceStatus, HandlerError, RequestClass};
use hp_01_rollup_device::{AdvanceRequest, InspectRequest, RequestHandler, RollupOutputs, Verdict};
use hp_02_ledger::{Ledger, LedgerError, StateStorage};
use hp_03_erc20_abi::{decode_deposit, encode_transfer};
use shared_types::Be256;
use tracing::{info, instrument, warn};

/// The honeypot request handler. Owns the ledger for the life of the
/// process.
#[derive(Debug)]
pub struct Honeypot<S: StateStorage> {
    ledger: Ledger<S>,
    addresses: AddressBook,
}

impl<S: StateStorage> Honeypot<S> {
    /// Create a handler over a loaded ledger.
    pub fn new(ledger: Ledger<S>, addresses: AddressBook) -> Self {
        info!(
            portal = %addresses.portal,
            withdrawal = %addresses.withdrawal,
            token = %addresses.token,
            "[hp-04] Honeypot ready, balance {}",
            ledger.balance()
        );
        Self { ledger, addresses }
    }

    /// Current balance.
    pub fn balance(&self) -> Be256 {
        self.ledger.balance()
    }

    /// Configured addresses.
    pub fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    /// Give back the ledger.
    pub fn into_ledger(self) -> Ledger<S> {
        self.ledger
    }

    fn deposit(&mut self, payload: &[u8]) -> Result<AdvanceStatus, HandlerError> {
        let deposit = match decode_deposit(payload) {
            Ok(deposit) => deposit,
            Err(e) => {
                warn!("[hp-04] Undecodable deposit: {}", e);
                return Ok(AdvanceStatus::InvalidRequest);
            }
        };

        if deposit.token != self.addresses.token {
            warn!(
                token = %deposit.token,
                "[hp-04] Deposit of unaccepted token from {}",
                deposit.sender
            );
            return Ok(AdvanceStatus::DepositInvalidToken);
        }

        match self.ledger.apply_deposit(&deposit.amount) {
            Ok(balance) => {
                info!(
                    "[hp-04] Deposit of {} from {}, balance {}",
                    deposit.amount, deposit.sender, balance
                );
                Ok(AdvanceStatus::Success)
            }
            Err(e) => rejection(e, AdvanceStatus::DepositBalanceOverflow),
        }
    }

    fn withdraw(&mut self, outputs: &mut dyn RollupOutputs) -> Result<AdvanceStatus, HandlerError> {
        let balance = self.ledger.balance();
        if balance.is_zero() {
            return Ok(AdvanceStatus::WithdrawNoFunds);
        }

        let call = encode_transfer(&self.addresses.withdrawal, &balance);
        let index = match outputs.emit_voucher(&self.addresses.token, &Be256::ZERO, &call) {
            Ok(index) => index,
            Err(e) => {
                warn!("[hp-04] Withdrawal voucher refused: {}", e);
                return Ok(AdvanceStatus::WithdrawVoucherFailed);
            }
        };

        match self.ledger.apply_withdrawal() {
            Ok(withdrawn) => {
                info!(
                    voucher = index,
                    "[hp-04] Withdrawal of {} to {}", withdrawn, self.addresses.withdrawal
                );
                Ok(AdvanceStatus::Success)
            }
            Err(e) => rejection(e, AdvanceStatus::WithdrawNoFunds),
        }
    }
}

/// Map a ledger error to the request's status, or to a fatal fault when the
/// storage failed.
fn rejection(err: LedgerError, status: AdvanceStatus) -> Result<AdvanceStatus, HandlerError> {
    match err {
        LedgerError::Storage(e) => Err(HandlerError::Storage(e)),
        LedgerError::Overflow(_) | LedgerError::NoFunds => Ok(status),
    }
}

/// Attach the status byte. A refused report does not change the verdict.
fn report_status(outputs: &mut dyn RollupOutputs, status: AdvanceStatus) -> Verdict {
    if let Err(e) = outputs.emit_report(&status.as_report()) {
        warn!("[hp-04] Status report ({}) refused: {}", status, e);
    }
    if !status.is_success() {
        warn!("[hp-04] Advance rejected: {}", status);
    }
    Verdict::from(status.is_success())
}

impl<S: StateStorage> RequestHandler for Honeypot<S> {
    type Error = HandlerError;

    #[instrument(skip_all, fields(input = request.metadata.input_index))]
    fn advance(
        &mut self,
        outputs: &mut dyn RollupOutputs,
        request: &AdvanceRequest,
    ) -> Result<Verdict, HandlerError> {
        let class = classify(
            &self.addresses,
            &request.metadata.sender,
            request.payload.len(),
        );
        let status = match class {
            RequestClass::Deposit => self.deposit(&request.payload)?,
            RequestClass::Withdrawal => self.withdraw(outputs)?,
            RequestClass::Invalid => {
                warn!(
                    sender = %request.metadata.sender,
                    "[hp-04] Unrecognized request, {} byte payload",
                    request.payload.len()
                );
                AdvanceStatus::InvalidRequest
            }
        };
        Ok(report_status(outputs, status))
    }

    fn inspect(
        &mut self,
        outputs: &mut dyn RollupOutputs,
        _request: &InspectRequest,
    ) -> Result<Verdict, HandlerError> {
        match outputs.emit_report(self.ledger.balance().as_bytes()) {
            Ok(()) => Ok(Verdict::Accept),
            Err(e) => {
                warn!("[hp-04] Balance report refused: {}", e);
                Ok(Verdict::Reject)
            }
        }
    }

    fn oversized_advance(
        &mut self,
        outputs: &mut dyn RollupOutputs,
        payload_len: usize,
    ) -> Result<Verdict, HandlerError> {
        warn!("[hp-04] Oversized advance of {} bytes", payload_len);
        Ok(report_status(outputs, AdvanceStatus::InvalidRequest))
    }
}
