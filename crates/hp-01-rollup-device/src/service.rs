//! # Rollup Loop Service
//!
//! Owns the finish → read → handle → finish cycle.
//!
//! ## Invariants
//!
//! - The first `finish` declares the previous request accepted.
//! - Every later `finish` carries the verdict of the request just handled.
//! - The loop never blocks anywhere except inside `finish`.
//! - Device failures during finish/read and handler faults end the loop.

use crate::domain::{InspectRequest, NextRequest, RequestKind, RollupError, Verdict};
use crate::ports::inbound::RequestHandler;
use crate::ports::outbound::RollupDevice;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Loop configuration.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Largest payload the loop will read. Larger requests are rejected
    /// without being read.
    pub max_payload_len: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_payload_len: 4096,
        }
    }
}

/// Counters over the lifetime of the loop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoopStats {
    /// Advance requests handled.
    pub advances: u64,
    /// Inspect requests handled.
    pub inspects: u64,
    /// Requests whose payload was left unread because of its size.
    pub oversized: u64,
    /// Requests accepted.
    pub accepted: u64,
    /// Requests rejected.
    pub rejected: u64,
}

/// The request loop.
///
/// Holds the device and the handler for the life of the process. Both are
/// released when the loop is dropped.
pub struct RollupLoop<D: RollupDevice, H: RequestHandler> {
    device: D,
    handler: H,
    config: LoopConfig,
    accept_previous: bool,
    stats: LoopStats,
    shutdown: Arc<AtomicBool>,
}

impl<D: RollupDevice, H: RequestHandler> RollupLoop<D, H> {
    /// Create a loop. Nothing is sent to the host until the first request is
    /// processed.
    pub fn new(device: D, handler: H, config: LoopConfig) -> Self {
        Self {
            device,
            handler,
            config,
            accept_previous: true,
            stats: LoopStats::default(),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a flag that stops the loop before its next `finish`.
    pub fn with_shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Lifetime counters.
    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    /// The device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Give back the device and handler.
    pub fn into_parts(self) -> (D, H) {
        (self.device, self.handler)
    }

    /// Process requests until shutdown is requested or a fatal error occurs.
    ///
    /// Returns `Ok(())` only when the shutdown flag was raised.
    pub fn run(&mut self) -> Result<(), RollupError> {
        info!("[hp-01] Entering request loop");
        while !self.shutdown.load(Ordering::SeqCst) {
            self.process_next_request()?;
        }
        info!(stats = ?self.stats, "[hp-01] Request loop stopped");
        Ok(())
    }

    /// Finish the previous request, wait for the next one and handle it.
    pub fn process_next_request(&mut self) -> Result<Verdict, RollupError> {
        let next = self.device.finish(self.accept_previous)?;
        let verdict = self.handle(next)?;

        self.accept_previous = verdict.is_accept();
        match verdict {
            Verdict::Accept => self.stats.accepted += 1,
            Verdict::Reject => self.stats.rejected += 1,
        }
        debug!(stats = ?self.stats, "[hp-01] Request finished: {:?}", verdict);
        Ok(verdict)
    }

    #[instrument(skip(self), fields(kind = ?next.kind, len = next.payload_len))]
    fn handle(&mut self, next: NextRequest) -> Result<Verdict, RollupError> {
        let oversized = next.payload_len > self.config.max_payload_len;
        if oversized {
            warn!(
                "[hp-01] {:?} payload of {} bytes exceeds limit of {}",
                next.kind, next.payload_len, self.config.max_payload_len
            );
            self.stats.oversized += 1;
        }

        match next.kind {
            RequestKind::Advance => {
                self.stats.advances += 1;
                if oversized {
                    return self
                        .handler
                        .oversized_advance(&mut self.device, next.payload_len)
                        .map_err(|e| RollupError::Handler(Box::new(e)));
                }
                let request = self.device.read_advance(next.payload_len)?;
                debug!(
                    sender = %request.metadata.sender,
                    input_index = request.metadata.input_index,
                    "[hp-01] Advance request"
                );
                self.handler
                    .advance(&mut self.device, &request)
                    .map_err(|e| RollupError::Handler(Box::new(e)))
            }
            RequestKind::Inspect => {
                self.stats.inspects += 1;
                // An oversized query is still answered, with its payload
                // left unread.
                let request = if oversized {
                    InspectRequest::default()
                } else {
                    self.device.read_inspect(next.payload_len)?
                };
                self.handler
                    .inspect(&mut self.device, &request)
                    .map_err(|e| RollupError::Handler(Box::new(e)))
            }
        }
    }
}
