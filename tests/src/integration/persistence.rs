//! # Restart Persistence
//!
//! The balance lives on a file standing in for the state block device.
//! Each "process" opens the device, serves a script and is dropped.

use super::fixtures::*;
use dapp_runtime::{DappConfig, DappRuntime, Deployment, StartupError, UNABLE_TO_LOAD_STATE};
use hp_01_rollup_device::MockRollupDevice;
use hp_02_ledger::{BlockDeviceStorage, StorageError};
use shared_types::Be256;
use std::io::Write;
use tempfile::NamedTempFile;

fn state_device(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&vec![0u8; len]).unwrap();
    file.flush().unwrap();
    file
}

fn config() -> DappConfig {
    DappConfig {
        addresses: book(),
        ..DappConfig::for_deployment(Deployment::Localhost).unwrap()
    }
}

fn serve(file: &NamedTempFile, device: MockRollupDevice) -> Harness<BlockDeviceStorage> {
    let storage = BlockDeviceStorage::open(file.path(), true).unwrap();
    let mut rollup = harness(storage, device);
    drain(&mut rollup);
    rollup
}

#[test]
fn test_balance_survives_restart() {
    let file = state_device(4096);

    let mut first = MockRollupDevice::new();
    first
        .push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(100)))
        .push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(250)));
    drop(serve(&file, first));

    let on_disk = std::fs::read(file.path()).unwrap();
    assert_eq!(&on_disk[..32], Be256::from_u64(350).as_bytes());
    assert_eq!(on_disk.len(), 4096);

    let mut second = MockRollupDevice::new();
    second.push_inspect(Vec::new());
    let rollup = serve(&file, second);
    assert_eq!(
        rollup.device().last_report(),
        Some(&Be256::from_u64(350).as_bytes()[..])
    );
}

#[test]
fn test_withdrawal_is_durable() {
    let file = state_device(32);

    let mut first = MockRollupDevice::new();
    first
        .push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(9)))
        .push_advance(WITHDRAWAL, Vec::new());
    drop(serve(&file, first));

    let mut second = MockRollupDevice::new();
    second.push_advance(WITHDRAWAL, Vec::new());
    let rollup = serve(&file, second);
    assert!(rollup.handler().balance().is_zero());
    assert_eq!(rollup.device().last_report(), Some(&[0x04][..]));
}

#[test]
fn test_rejected_request_leaves_disk_untouched() {
    let file = state_device(32);
    let mut first = MockRollupDevice::new();
    first.push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(7)));
    drop(serve(&file, first));
    let before = std::fs::read(file.path()).unwrap();

    let mut second = MockRollupDevice::new();
    second
        .push_advance(PORTAL, deposit(OTHER_TOKEN, Be256::from_u64(1)))
        .push_advance(STRANGER, vec![1, 2, 3]);
    let rollup = serve(&file, second);
    assert_eq!(rollup.device().finishes, vec![true, false, false]);
    assert_eq!(std::fs::read(file.path()).unwrap(), before);
}

#[test]
fn test_device_is_exclusive_while_serving() {
    let file = state_device(32);
    let rollup = serve(&file, MockRollupDevice::new());
    assert!(matches!(
        BlockDeviceStorage::open(file.path(), true),
        Err(StorageError::Locked { .. })
    ));
    drop(rollup);
    assert!(BlockDeviceStorage::open(file.path(), true).is_ok());
}

#[test]
fn test_too_small_device_fails_startup() {
    let file = state_device(16);
    let config = config();
    let storage = BlockDeviceStorage::open(file.path(), true);

    match DappRuntime::bootstrap(MockRollupDevice::new(), storage, &config) {
        Err(StartupError::State(e)) => {
            assert!(e.to_string().contains("too small"));
        }
        Err(e) => panic!("unexpected startup error: {e}"),
        Ok(_) => panic!("undersized device accepted"),
    }
}

#[test]
fn test_missing_device_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = config();
    let storage = BlockDeviceStorage::open(dir.path().join("mtdblock1"), true);

    let err = match DappRuntime::bootstrap(MockRollupDevice::new(), storage, &config) {
        Err(e) => e,
        Ok(_) => panic!("missing device accepted"),
    };
    assert!(err.to_string().starts_with(UNABLE_TO_LOAD_STATE));
}

#[test]
fn test_runtime_serves_from_file_device() {
    let file = state_device(64);
    let config = config();
    let mut device = MockRollupDevice::new();
    device
        .push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(40)))
        .push_inspect(Vec::new());

    let storage = BlockDeviceStorage::open(file.path(), config.storage.lock);
    let mut runtime = DappRuntime::bootstrap(device, storage, &config).unwrap();
    assert!(runtime.run().is_err());
    assert_eq!(runtime.rollup().device().finishes, vec![true, true, true]);
    let stats = runtime.shutdown().unwrap();
    assert_eq!(stats.advances, 1);
    assert_eq!(stats.inspects, 1);

    let on_disk = std::fs::read(file.path()).unwrap();
    assert_eq!(&on_disk[..32], Be256::from_u64(40).as_bytes());
}
