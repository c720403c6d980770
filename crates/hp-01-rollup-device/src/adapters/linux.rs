//! Linux Rollup Device Adapter
//!
//! Implements `RollupDevice` on top of the rollup character device exposed by
//! the machine's kernel driver. Every operation is a single ioctl carrying a
//! `#[repr(C)]` argument that mirrors the driver's header.

use crate::domain::{
    AdvanceRequest, DeviceError, InputMetadata, InspectRequest, NextRequest, RequestKind,
};
use crate::ports::outbound::{RollupDevice, RollupOutputs};
use libc::c_int;
use shared_types::{Address, Be256};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

// =============================================================================
// DRIVER ABI
// =============================================================================

const ROLLUP_IOCTL_MAGIC: u32 = 0xd3;

const REQUEST_TYPE_ADVANCE: c_int = 0;
const REQUEST_TYPE_INSPECT: c_int = 1;

/// `_IOWR(0xd3, nr, T)` using the generic Linux ioctl number layout.
const fn iowr(nr: u32, size: usize) -> u32 {
    const IOC_READ_WRITE: u32 = 3;
    (IOC_READ_WRITE << 30) | ((size as u32) << 16) | (ROLLUP_IOCTL_MAGIC << 8) | nr
}

#[repr(C)]
struct RollupBytes {
    data: *mut u8,
    length: u64,
}

impl RollupBytes {
    /// Borrow `buf` for the driver to fill.
    fn writable(buf: &mut [u8]) -> Self {
        Self {
            data: buf.as_mut_ptr(),
            length: buf.len() as u64,
        }
    }

    /// Borrow `buf` for the driver to read. The driver never writes through it.
    fn readable(buf: &[u8]) -> Self {
        Self {
            data: buf.as_ptr() as *mut u8,
            length: buf.len() as u64,
        }
    }
}

#[repr(C)]
struct RollupInputMetadata {
    msg_sender: [u8; 20],
    block_number: u64,
    timestamp: u64,
    epoch_index: u64,
    input_index: u64,
}

#[repr(C)]
struct RollupAdvanceState {
    metadata: RollupInputMetadata,
    payload: RollupBytes,
}

#[repr(C)]
struct RollupInspectState {
    payload: RollupBytes,
}

#[repr(C)]
struct RollupFinish {
    accept_previous_request: bool,
    next_request_type: c_int,
    next_request_payload_length: c_int,
}

#[repr(C)]
struct RollupVoucher {
    destination: [u8; 20],
    payload: RollupBytes,
    index: u64,
}

#[repr(C)]
struct RollupReport {
    payload: RollupBytes,
}

#[repr(C)]
struct RollupException {
    payload: RollupBytes,
}

const IOCTL_ROLLUP_FINISH: u32 = iowr(0, std::mem::size_of::<RollupFinish>());
const IOCTL_ROLLUP_READ_ADVANCE_STATE: u32 = iowr(0, std::mem::size_of::<RollupAdvanceState>());
const IOCTL_ROLLUP_READ_INSPECT_STATE: u32 = iowr(0, std::mem::size_of::<RollupInspectState>());
const IOCTL_ROLLUP_WRITE_VOUCHER: u32 = iowr(1, std::mem::size_of::<RollupVoucher>());
const IOCTL_ROLLUP_WRITE_REPORT: u32 = iowr(3, std::mem::size_of::<RollupReport>());
const IOCTL_ROLLUP_THROW_EXCEPTION: u32 = iowr(4, std::mem::size_of::<RollupException>());

// =============================================================================
// DEVICE
// =============================================================================

/// Handle on the rollup character device.
///
/// The file descriptor is closed when the handle is dropped.
pub struct LinuxRollupDevice {
    file: File,
    path: PathBuf,
}

impl LinuxRollupDevice {
    /// Default device node inside the machine.
    pub const DEFAULT_PATH: &'static str = "/dev/rollup";

    /// Open the device node read/write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| DeviceError::Open {
                path: path.clone(),
                source,
            })?;
        debug!("[hp-01] Opened rollup device {}", path.display());
        Ok(Self { file, path })
    }

    /// Path this handle was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ioctl<T>(&self, op: &'static str, request: u32, arg: &mut T) -> Result<(), DeviceError> {
        // SAFETY: `arg` is a live `#[repr(C)]` value whose layout matches what
        // the driver expects for `request`; any buffers it points to outlive
        // the call.
        let ret = unsafe { libc::ioctl(self.file.as_raw_fd(), request as _, arg as *mut T) };
        if ret < 0 {
            let source = io::Error::last_os_error();
            error!("[hp-01] Unable to perform rollup {}: {}", op, source);
            return Err(DeviceError::Ioctl { op, source });
        }
        Ok(())
    }
}

impl RollupOutputs for LinuxRollupDevice {
    fn emit_report(&mut self, payload: &[u8]) -> Result<(), DeviceError> {
        let mut report = RollupReport {
            payload: RollupBytes::readable(payload),
        };
        self.ioctl("write report", IOCTL_ROLLUP_WRITE_REPORT, &mut report)
    }

    fn emit_voucher(
        &mut self,
        destination: &Address,
        value: &Be256,
        payload: &[u8],
    ) -> Result<u64, DeviceError> {
        if !value.is_zero() {
            return Err(DeviceError::Unsupported("vouchers carrying native value"));
        }
        let mut voucher = RollupVoucher {
            destination: destination.0,
            payload: RollupBytes::readable(payload),
            index: 0,
        };
        self.ioctl("write voucher", IOCTL_ROLLUP_WRITE_VOUCHER, &mut voucher)?;
        Ok(voucher.index)
    }
}

impl RollupDevice for LinuxRollupDevice {
    fn finish(&mut self, accept_previous: bool) -> Result<NextRequest, DeviceError> {
        let mut finish = RollupFinish {
            accept_previous_request: accept_previous,
            next_request_type: 0,
            next_request_payload_length: 0,
        };
        self.ioctl("finish", IOCTL_ROLLUP_FINISH, &mut finish)?;

        let kind = match finish.next_request_type {
            REQUEST_TYPE_ADVANCE => RequestKind::Advance,
            REQUEST_TYPE_INSPECT => RequestKind::Inspect,
            other => return Err(DeviceError::UnknownRequestType(other)),
        };
        let payload_len = usize::try_from(finish.next_request_payload_length)
            .map_err(|_| DeviceError::Protocol("negative payload length"))?;
        Ok(NextRequest { kind, payload_len })
    }

    fn read_advance(&mut self, payload_len: usize) -> Result<AdvanceRequest, DeviceError> {
        let mut payload = vec![0u8; payload_len];
        let mut request = RollupAdvanceState {
            metadata: RollupInputMetadata {
                msg_sender: [0u8; 20],
                block_number: 0,
                timestamp: 0,
                epoch_index: 0,
                input_index: 0,
            },
            payload: RollupBytes::writable(&mut payload),
        };
        self.ioctl("read advance state", IOCTL_ROLLUP_READ_ADVANCE_STATE, &mut request)?;

        let read = usize::try_from(request.payload.length).unwrap_or(usize::MAX);
        payload.truncate(read);
        Ok(AdvanceRequest {
            metadata: InputMetadata {
                sender: Address::new(request.metadata.msg_sender),
                block_number: request.metadata.block_number,
                timestamp: request.metadata.timestamp,
                epoch_index: request.metadata.epoch_index,
                input_index: request.metadata.input_index,
            },
            payload,
        })
    }

    fn read_inspect(&mut self, payload_len: usize) -> Result<InspectRequest, DeviceError> {
        let mut payload = vec![0u8; payload_len];
        let mut request = RollupInspectState {
            payload: RollupBytes::writable(&mut payload),
        };
        self.ioctl("read inspect state", IOCTL_ROLLUP_READ_INSPECT_STATE, &mut request)?;

        let read = usize::try_from(request.payload.length).unwrap_or(usize::MAX);
        payload.truncate(read);
        Ok(InspectRequest { payload })
    }

    fn throw_exception(&mut self, message: &str) -> Result<(), DeviceError> {
        let mut exception = RollupException {
            payload: RollupBytes::readable(message.as_bytes()),
        };
        self.ioctl("throw exception", IOCTL_ROLLUP_THROW_EXCEPTION, &mut exception)
    }
}

impl std::fmt::Debug for LinuxRollupDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinuxRollupDevice")
            .field("path", &self.path)
            .field("fd", &self.file.as_raw_fd())
            .finish()
    }
}
