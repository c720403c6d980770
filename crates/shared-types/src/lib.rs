//! # Shared Types Crate
//!
//! Value types used by every honeypot subsystem.
//!
//! ## Design Principles
//!
//! - **Fixed width**: addresses are always 20 bytes and amounts always 32
//!   big-endian bytes. Nothing is truncated or widened implicitly.
//! - **Checked arithmetic**: `Be256` addition reports overflow instead of
//!   wrapping. There is no subtraction; the ledger only ever resets to zero.
//! - **Explicit byte order**: every conversion names its byte order, no raw
//!   memory reinterpretation.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
