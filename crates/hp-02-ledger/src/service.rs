//! # Ledger Service
//!
//! The balance and the two transitions that change it.
//!
//! ## Transition Rules
//!
//! | Operation | Precondition | Effect | On failure |
//! |-----------|--------------|--------|------------|
//! | `apply_deposit(x)` | `balance + x < 2^256` | `balance += x`, flush | unchanged, `Overflow` |
//! | `apply_withdrawal()` | `balance > 0` | `balance = 0`, flush, return old | unchanged, `NoFunds` |
//!
//! In-memory state is replaced only after the new record is flushed, so a
//! failed flush leaves `balance()` equal to what is durable.

use crate::domain::{DappState, LedgerError, StorageError, STATE_OFFSET, STATE_RECORD_LEN};
use crate::ports::StateStorage;
use shared_types::Be256;
use tracing::{debug, info};

/// The dApp ledger, bound to its storage for the life of the process.
#[derive(Debug)]
pub struct Ledger<S: StateStorage> {
    storage: S,
    state: DappState,
}

impl<S: StateStorage> Ledger<S> {
    /// Load the state record from `storage`.
    ///
    /// Fails if the medium cannot hold a full record. This is a deployment
    /// error, not something a request can cause.
    pub fn load(mut storage: S) -> Result<Self, LedgerError> {
        let size = storage.capacity()?;
        let required = STATE_OFFSET + STATE_RECORD_LEN as u64;
        if size < required {
            return Err(StorageError::TooSmall { size, required }.into());
        }

        let mut record = [0u8; STATE_RECORD_LEN];
        storage.read_at(STATE_OFFSET, &mut record)?;
        let state = DappState::decode(record);

        info!("[hp-02] Loaded dApp state, balance {}", state.balance);
        Ok(Self { storage, state })
    }

    /// Current balance.
    pub fn balance(&self) -> Be256 {
        self.state.balance
    }

    /// Add `amount` to the balance and make it durable.
    ///
    /// Returns the new balance.
    pub fn apply_deposit(&mut self, amount: &Be256) -> Result<Be256, LedgerError> {
        let balance = self.state.balance.checked_add(amount)?;
        self.persist(DappState { balance })?;
        debug!("[hp-02] Deposited {}, balance {}", amount, balance);
        Ok(balance)
    }

    /// Reset the balance to zero and make it durable.
    ///
    /// Returns the balance held before the reset.
    pub fn apply_withdrawal(&mut self) -> Result<Be256, LedgerError> {
        let withdrawn = self.state.balance;
        if withdrawn.is_zero() {
            return Err(LedgerError::NoFunds);
        }
        self.persist(DappState::default())?;
        debug!("[hp-02] Withdrew {}, balance reset", withdrawn);
        Ok(withdrawn)
    }

    /// Storage backing this ledger.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Flush once more and hand the storage back.
    pub fn close(mut self) -> Result<S, LedgerError> {
        self.storage.flush()?;
        info!("[hp-02] Ledger closed, balance {}", self.state.balance);
        Ok(self.storage)
    }

    fn persist(&mut self, next: DappState) -> Result<(), LedgerError> {
        self.storage.write_at(STATE_OFFSET, &next.encode())?;
        self.storage.flush()?;
        self.state = next;
        Ok(())
    }
}
