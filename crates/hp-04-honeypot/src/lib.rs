//! # HP-04 Honeypot
//!
//! The dApp itself: a single ERC-20 balance that grows through portal
//! deposits and can only be emptied, all at once, by one configured address.
//!
//! **Subsystem ID:** 04  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Request Classification
//!
//! | Sender | Payload | Class |
//! |--------|---------|-------|
//! | portal | 72 bytes | deposit |
//! | withdrawal address | empty | withdrawal |
//! | anything else | anything | invalid |
//!
//! Sender equality is the only authorization. A matching sender with a
//! payload of the wrong length is invalid, never partially parsed.
//!
//! ## Outputs
//!
//! Every advance produces exactly one single-byte status report (see
//! [`AdvanceStatus`]). A successful withdrawal also produces one voucher: a
//! `transfer(withdrawal, balance)` call on the token contract. Every inspect
//! produces one 32-byte big-endian balance report.
//!
//! ## Module Structure
//!
//! ```text
//! hp-04-honeypot/
//! ├── domain/      # AddressBook, RequestClass, AdvanceStatus, errors
//! └── service.rs   # Honeypot (RequestHandler)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod service;

// Re-exports
pub use domain::{classify, AddressBook, AdvanceStatus, HandlerError, RequestClass};
pub use service::Honeypot;
