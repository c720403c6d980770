//! # HP-02 Ledger
//!
//! The dApp's only long-lived state: one 256-bit balance, persisted on a
//! block device so it survives restarts and can be read by host tooling.
//!
//! **Subsystem ID:** 02  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Balance never wraps | `Ledger::apply_deposit` uses `Be256::checked_add` |
//! | Failed transitions leave the balance untouched | in-memory state is replaced only after a successful flush |
//! | Flush before success | `Ledger::persist` writes and syncs before returning |
//! | Storage large enough | `Ledger::load` refuses media smaller than one record |
//!
//! ## Durable Layout
//!
//! ```text
//! offset 0                                32
//!        ├──────────── balance (be256) ────┤
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! hp-02-ledger/
//! ├── domain/      # DappState record codec, errors
//! ├── ports/       # StateStorage
//! ├── adapters/    # block device / file storage, in-memory storage
//! └── service.rs   # Ledger
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{BlockDeviceStorage, InMemoryStorage};
pub use domain::{DappState, LedgerError, StorageError, STATE_OFFSET, STATE_RECORD_LEN};
pub use ports::StateStorage;
pub use service::Ledger;
