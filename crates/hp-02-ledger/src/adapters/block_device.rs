//! Block Device Storage Adapter
//!
//! Implements `StateStorage` over an existing block device (or a regular file
//! of fixed size standing in for one). The medium is never created or
//! resized: a missing device is a deployment error.
//!
//! With the `locking` feature the device is held under an exclusive `fs2`
//! lock for the lifetime of the handle.

use crate::domain::StorageError;
use crate::ports::StateStorage;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(feature = "locking")]
use fs2::FileExt;

/// Handle on the state block device.
///
/// Acquired once at startup, released on drop (RAII).
#[derive(Debug)]
pub struct BlockDeviceStorage {
    file: File,
    path: PathBuf,
    locked: bool,
}

impl BlockDeviceStorage {
    /// Default state device inside the machine.
    pub const DEFAULT_PATH: &'static str = "/dev/mtdblock1";

    /// Open an existing device read/write, optionally taking an exclusive lock.
    pub fn open(path: impl AsRef<Path>, lock: bool) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => StorageError::NotFound { path: path.clone() },
                _ => StorageError::Open {
                    path: path.clone(),
                    source,
                },
            })?;

        let locked = lock && Self::try_lock(&file, &path)?;
        info!(
            "[hp-02] Opened state device {} (locked: {})",
            path.display(),
            locked
        );
        Ok(Self { file, path, locked })
    }

    #[cfg(feature = "locking")]
    fn try_lock(file: &File, path: &Path) -> Result<bool, StorageError> {
        file.try_lock_exclusive()
            .map_err(|_| StorageError::Locked {
                path: path.to_path_buf(),
            })?;
        Ok(true)
    }

    #[cfg(not(feature = "locking"))]
    fn try_lock(_file: &File, _path: &Path) -> Result<bool, StorageError> {
        Ok(false)
    }

    /// Device path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_bounds(&mut self, offset: u64, len: usize) -> Result<(), StorageError> {
        let capacity = self.capacity()?;
        match offset.checked_add(len as u64) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(StorageError::OutOfBounds {
                offset,
                len,
                capacity,
            }),
        }
    }

    fn seek_to(&mut self, offset: u64) -> Result<(), StorageError> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map(|_| ())
            .map_err(|source| StorageError::Io { op: "seek", source })
    }
}

impl StateStorage for BlockDeviceStorage {
    fn capacity(&mut self) -> Result<u64, StorageError> {
        // Block devices report a zero metadata length; seeking to the end
        // gives the real size for both devices and regular files.
        self.file
            .seek(SeekFrom::End(0))
            .map_err(|source| StorageError::Io { op: "seek", source })
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), StorageError> {
        self.check_bounds(offset, buf.len())?;
        self.seek_to(offset)?;
        self.file
            .read_exact(buf)
            .map_err(|source| StorageError::Io { op: "read", source })
    }

    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError> {
        self.check_bounds(offset, data.len())?;
        self.seek_to(offset)?;
        self.file
            .write_all(data)
            .map_err(|source| StorageError::Io { op: "write", source })
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.file
            .flush()
            .and_then(|()| self.file.sync_data())
            .map_err(|source| StorageError::Io { op: "flush", source })
    }
}

impl Drop for BlockDeviceStorage {
    fn drop(&mut self) {
        #[cfg(feature = "locking")]
        if self.locked {
            let _ = FileExt::unlock(&self.file);
        }
        debug!("[hp-02] Released state device {}", self.path.display());
    }
}
