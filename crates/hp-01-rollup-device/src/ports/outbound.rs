//! # Outbound Ports
//!
//! The host device the loop drives. Adapters implement these traits for the
//! real `/dev/rollup` driver and for scripted tests.

use crate::domain::{AdvanceRequest, DeviceError, InspectRequest, NextRequest};
use shared_types::{Address, Be256};

/// Outputs a handler may attach to the request being processed.
pub trait RollupOutputs {
    /// Attach an arbitrary byte record to the current request.
    ///
    /// May be called any number of times per request.
    fn emit_report(&mut self, payload: &[u8]) -> Result<(), DeviceError>;

    /// Schedule a call to `destination` carrying `value` and `payload`.
    ///
    /// Only valid while processing an advance request. Returns the voucher
    /// index assigned by the host.
    fn emit_voucher(
        &mut self,
        destination: &Address,
        value: &Be256,
        payload: &[u8],
    ) -> Result<u64, DeviceError>;
}

/// The host device: request intake plus outputs.
pub trait RollupDevice: RollupOutputs {
    /// Declare the previous request accepted or rejected and block until the
    /// host supplies the next one.
    fn finish(&mut self, accept_previous: bool) -> Result<NextRequest, DeviceError>;

    /// Read the advance request announced by the last `finish`.
    fn read_advance(&mut self, payload_len: usize) -> Result<AdvanceRequest, DeviceError>;

    /// Read the inspect request announced by the last `finish`.
    fn read_inspect(&mut self, payload_len: usize) -> Result<InspectRequest, DeviceError>;

    /// Signal an unrecoverable application fault to the host.
    fn throw_exception(&mut self, message: &str) -> Result<(), DeviceError>;
}
