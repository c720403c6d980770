//! # Domain Module
//!
//! Persisted state record and ledger errors.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
