//! Domain layer for the honeypot dispatcher.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
