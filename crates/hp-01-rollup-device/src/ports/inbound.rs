//! # Inbound Ports
//!
//! What the loop needs from the application: turn one request into a verdict.

use crate::domain::{AdvanceRequest, InspectRequest, Verdict};
use crate::ports::outbound::RollupOutputs;

/// Application logic driven by the request loop.
///
/// Returning `Err` is reserved for faults that make further processing
/// unsafe; it terminates the loop. Anything caused by the request itself
/// must come back as `Ok(Verdict::Reject)`.
pub trait RequestHandler {
    /// Fatal handler fault.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Process a state-mutating input.
    fn advance(
        &mut self,
        outputs: &mut dyn RollupOutputs,
        request: &AdvanceRequest,
    ) -> Result<Verdict, Self::Error>;

    /// Process a read-only query.
    fn inspect(
        &mut self,
        outputs: &mut dyn RollupOutputs,
        request: &InspectRequest,
    ) -> Result<Verdict, Self::Error>;

    /// Called instead of [`RequestHandler::advance`] when the announced
    /// payload exceeds the loop's size limit. The payload is never read.
    fn oversized_advance(
        &mut self,
        _outputs: &mut dyn RollupOutputs,
        _payload_len: usize,
    ) -> Result<Verdict, Self::Error> {
        Ok(Verdict::Reject)
    }
}
