//! # Honeypot dApp Runtime
//!
//! Wires the subsystems into one owned context and runs it.
//!
//! ## Startup Sequence
//!
//! 1. Load and validate configuration (env, optional JSON file)
//! 2. Open the rollup device
//! 3. Open and lock the state device, load the ledger
//!    - on failure: `throw_exception("unable to load dapp state")`, exit
//! 4. Enter the request loop
//!
//! ## Ownership
//!
//! ```text
//! DappRuntime
//! └── RollupLoop
//!     ├── rollup device           (hp-01)
//!     └── Honeypot                (hp-04)
//!         └── Ledger              (hp-02)
//!             └── state device
//! ```
//!
//! Nothing is global. Dropping the runtime releases both devices.

#![warn(missing_docs)]

pub mod container;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hp_01_rollup_device::{
    DeviceError, LoopConfig, LoopStats, RollupDevice, RollupError, RollupLoop,
};
use hp_02_ledger::{Ledger, LedgerError, StateStorage, StorageError};
use hp_04_honeypot::Honeypot;
use thiserror::Error;
use tracing::{error, info};

pub use container::{ConfigError, DappConfig, Deployment};

/// Message sent to the host when the ledger cannot be loaded.
pub const UNABLE_TO_LOAD_STATE: &str = "unable to load dapp state";

/// The request loop with the honeypot handler.
pub type DappLoop<D, S> = RollupLoop<D, Honeypot<S>>;

/// Failures before the first request is served.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The rollup device could not be opened.
    #[error("rollup device unavailable: {0}")]
    Device(#[from] DeviceError),

    /// The ledger could not be loaded. The host has been told.
    #[error("unable to load dapp state: {0}")]
    State(#[from] LedgerError),
}

/// The running dApp.
pub struct DappRuntime<D: RollupDevice, S: StateStorage> {
    rollup: DappLoop<D, S>,
    shutdown: Arc<AtomicBool>,
}

impl<D: RollupDevice, S: StateStorage> DappRuntime<D, S> {
    /// Load the ledger from `storage` and assemble the request loop.
    ///
    /// If the state cannot be loaded the host receives an exception before
    /// the error is returned.
    pub fn bootstrap(
        mut device: D,
        storage: Result<S, StorageError>,
        config: &DappConfig,
    ) -> Result<Self, StartupError> {
        let ledger = match storage.map_err(LedgerError::from).and_then(Ledger::load) {
            Ok(ledger) => ledger,
            Err(e) => {
                error!("Failed to load dApp state: {}", e);
                if let Err(throw) = device.throw_exception(UNABLE_TO_LOAD_STATE) {
                    error!("Failed to notify host: {}", throw);
                }
                return Err(e.into());
            }
        };

        let honeypot = Honeypot::new(ledger, config.addresses);
        let loop_config = LoopConfig {
            max_payload_len: config.device.max_payload_len,
        };
        let shutdown = Arc::new(AtomicBool::new(false));
        let rollup =
            RollupLoop::new(device, honeypot, loop_config).with_shutdown(Arc::clone(&shutdown));

        Ok(Self { rollup, shutdown })
    }

    /// Replace the shutdown flag with one shared with the caller.
    pub fn with_shutdown(self, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            rollup: self.rollup.with_shutdown(Arc::clone(&shutdown)),
            shutdown,
        }
    }

    /// Serve requests until shutdown or a fatal error.
    pub fn run(&mut self) -> Result<(), RollupError> {
        info!("===========================================");
        info!("  Honeypot dApp v{}", env!("CARGO_PKG_VERSION"));
        info!("  Balance: {}", self.rollup.handler().balance());
        info!("===========================================");
        self.rollup.run()
    }

    /// The request loop.
    pub fn rollup(&self) -> &DappLoop<D, S> {
        &self.rollup
    }

    /// Lifetime counters.
    pub fn stats(&self) -> &LoopStats {
        self.rollup.stats()
    }

    /// Stop serving, flush the ledger and release both devices.
    pub fn shutdown(self) -> Result<LoopStats, LedgerError> {
        self.shutdown.store(true, Ordering::SeqCst);
        let stats = self.rollup.stats().clone();
        let (device, honeypot) = self.rollup.into_parts();
        drop(device);
        drop(honeypot.into_ledger().close()?);
        info!(?stats, "Shutdown complete");
        Ok(stats)
    }
}

/// The runtime over the machine's real devices.
#[cfg(target_os = "linux")]
pub type HostRuntime =
    DappRuntime<hp_01_rollup_device::LinuxRollupDevice, hp_02_ledger::BlockDeviceStorage>;

/// Open the devices named in `config`.
#[cfg(target_os = "linux")]
pub fn open_host(config: &DappConfig) -> Result<HostRuntime, StartupError> {
    let device = hp_01_rollup_device::LinuxRollupDevice::open(&config.device.path)?;
    let storage =
        hp_02_ledger::BlockDeviceStorage::open(&config.storage.state_path, config.storage.lock);
    DappRuntime::bootstrap(device, storage, config)
}
