//! Scripted Rollup Device
//!
//! Implements `RollupDevice` from a queue of prepared requests and records
//! every output, so handlers and the loop can be exercised without a host.

use crate::domain::{
    AdvanceRequest, DeviceError, InputMetadata, InspectRequest, NextRequest, RequestKind,
};
use crate::ports::outbound::{RollupDevice, RollupOutputs};
use shared_types::{Address, Be256};
use std::collections::VecDeque;

/// A request waiting in the mock host's queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptedRequest {
    /// Delivered as an advance.
    Advance(AdvanceRequest),
    /// Delivered as an inspect.
    Inspect(InspectRequest),
}

impl ScriptedRequest {
    fn next_request(&self) -> NextRequest {
        match self {
            Self::Advance(req) => NextRequest {
                kind: RequestKind::Advance,
                payload_len: req.payload.len(),
            },
            Self::Inspect(req) => NextRequest {
                kind: RequestKind::Inspect,
                payload_len: req.payload.len(),
            },
        }
    }
}

/// A voucher captured by the mock host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedVoucher {
    /// Call target.
    pub destination: Address,
    /// Native value attached.
    pub value: Be256,
    /// Call data.
    pub payload: Vec<u8>,
}

/// In-memory host. Returns [`DeviceError::Closed`] from `finish` once the
/// script is exhausted.
#[derive(Debug, Default)]
pub struct MockRollupDevice {
    pending: VecDeque<ScriptedRequest>,
    current: Option<ScriptedRequest>,
    next_input_index: u64,
    /// `accept_previous` flag of every `finish` call, in order.
    pub finishes: Vec<bool>,
    /// Every report, in emission order.
    pub reports: Vec<Vec<u8>>,
    /// Every voucher, in emission order.
    pub vouchers: Vec<RecordedVoucher>,
    /// Every exception message.
    pub exceptions: Vec<String>,
    /// Reject all voucher emissions.
    pub fail_vouchers: bool,
    /// Reject all report emissions.
    pub fail_reports: bool,
}

impl MockRollupDevice {
    /// Create an empty device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary request.
    pub fn push(&mut self, request: ScriptedRequest) -> &mut Self {
        self.pending.push_back(request);
        self
    }

    /// Queue an advance from `sender`, numbering inputs sequentially.
    pub fn push_advance(&mut self, sender: Address, payload: impl Into<Vec<u8>>) -> &mut Self {
        let metadata = InputMetadata {
            sender,
            block_number: 1 + self.next_input_index,
            timestamp: 1_700_000_000 + self.next_input_index * 12,
            epoch_index: 0,
            input_index: self.next_input_index,
        };
        self.next_input_index += 1;
        self.push(ScriptedRequest::Advance(AdvanceRequest {
            metadata,
            payload: payload.into(),
        }))
    }

    /// Queue an inspect.
    pub fn push_inspect(&mut self, payload: impl Into<Vec<u8>>) -> &mut Self {
        self.push(ScriptedRequest::Inspect(InspectRequest {
            payload: payload.into(),
        }))
    }

    /// Requests still waiting.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Most recent report, if any.
    pub fn last_report(&self) -> Option<&[u8]> {
        self.reports.last().map(Vec::as_slice)
    }
}

impl RollupOutputs for MockRollupDevice {
    fn emit_report(&mut self, payload: &[u8]) -> Result<(), DeviceError> {
        if self.fail_reports {
            return Err(DeviceError::Rejected("mock report failure".to_string()));
        }
        self.reports.push(payload.to_vec());
        Ok(())
    }

    fn emit_voucher(
        &mut self,
        destination: &Address,
        value: &Be256,
        payload: &[u8],
    ) -> Result<u64, DeviceError> {
        if !matches!(self.current, Some(ScriptedRequest::Advance(_))) {
            return Err(DeviceError::Protocol("voucher outside of an advance request"));
        }
        if self.fail_vouchers {
            return Err(DeviceError::Rejected("mock voucher failure".to_string()));
        }
        self.vouchers.push(RecordedVoucher {
            destination: *destination,
            value: *value,
            payload: payload.to_vec(),
        });
        Ok(self.vouchers.len() as u64 - 1)
    }
}

impl RollupDevice for MockRollupDevice {
    fn finish(&mut self, accept_previous: bool) -> Result<NextRequest, DeviceError> {
        self.finishes.push(accept_previous);
        self.current = self.pending.pop_front();
        self.current
            .as_ref()
            .map(ScriptedRequest::next_request)
            .ok_or(DeviceError::Closed)
    }

    fn read_advance(&mut self, payload_len: usize) -> Result<AdvanceRequest, DeviceError> {
        match &self.current {
            Some(ScriptedRequest::Advance(req)) => {
                let mut req = req.clone();
                req.payload.truncate(payload_len);
                Ok(req)
            }
            _ => Err(DeviceError::Protocol("read_advance without pending advance")),
        }
    }

    fn read_inspect(&mut self, payload_len: usize) -> Result<InspectRequest, DeviceError> {
        match &self.current {
            Some(ScriptedRequest::Inspect(req)) => {
                let mut req = req.clone();
                req.payload.truncate(payload_len);
                Ok(req)
            }
            _ => Err(DeviceError::Protocol("read_inspect without pending inspect")),
        }
    }

    fn throw_exception(&mut self, message: &str) -> Result<(), DeviceError> {
        self.exceptions.push(message.to_string());
        Ok(())
    }
}
