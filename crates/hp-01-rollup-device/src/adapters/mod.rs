//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the outbound device port.

#[cfg(target_os = "linux")]
mod linux;
mod mock;

#[cfg(target_os = "linux")]
pub use linux::LinuxRollupDevice;
pub use mock::{MockRollupDevice, RecordedVoucher, ScriptedRequest};
