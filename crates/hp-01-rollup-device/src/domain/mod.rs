//! # Domain Module
//!
//! Request and verdict types exchanged with the rollup host.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
