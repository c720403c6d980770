//! # Ports Module
//!
//! Hexagonal architecture ports (inbound request handler, outbound device).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
