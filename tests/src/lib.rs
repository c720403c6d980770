//! # Honeypot Test Suite
//!
//! Cross-subsystem tests. Unit tests live next to the code in each crate;
//! everything here drives the full stack (loop, dispatcher, codec, ledger)
//! through the scripted rollup device.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs    # deposit / withdraw / inspect flows
//!     ├── persistence.rs  # restarts over a file-backed state device
//!     └── properties.rs   # balance accumulation, inspect idempotence
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hp-tests
//! cargo test -p hp-tests integration::scenarios::
//! ```

pub mod integration;
