//! # HP-01 Rollup Device
//!
//! Host protocol for a rollup dApp: finish the previous request, wait for the
//! next one, read it, hand it to a [`RequestHandler`], repeat.
//!
//! **Subsystem ID:** 01  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Protocol
//!
//! ```text
//!   ┌──────────────── finish(accept_previous) ◄───────────────┐
//!   │                        │ blocks until host has input     │
//!   │              NextRequest{kind, payload_len}              │
//!   │                 ┌──────┴──────┐                          │
//!   │              Advance        Inspect                      │
//!   │           read_advance    read_inspect                   │
//!   │                 │              │                         │
//!   │       handler.advance   handler.inspect                  │
//!   │                 └──────┬───────┘                         │
//!   │                     Verdict ─────────────────────────────┘
//! ```
//!
//! The first finish always declares the (nonexistent) previous request
//! accepted. A failing finish or read is fatal and ends the loop.
//!
//! ## Module Structure
//!
//! ```text
//! hp-01-rollup-device/
//! ├── domain/      # NextRequest, AdvanceRequest, Verdict, errors
//! ├── ports/       # RollupDevice, RollupOutputs, RequestHandler
//! ├── adapters/    # /dev/rollup ioctl device, scripted mock device
//! └── service.rs   # RollupLoop
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
#[cfg(target_os = "linux")]
pub use adapters::LinuxRollupDevice;
pub use adapters::{MockRollupDevice, RecordedVoucher, ScriptedRequest};
pub use domain::{
    AdvanceRequest, DeviceError, InputMetadata, InspectRequest, NextRequest, RequestKind,
    RollupError, Verdict,
};
pub use ports::{RequestHandler, RollupDevice, RollupOutputs};
pub use service::{LoopConfig, LoopStats, RollupLoop};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
