//! # Request Scenarios
//!
//! End-to-end flows through loop → dispatcher → codec → ledger, asserting
//! verdicts, status reports, vouchers and the resulting balance.

use super::fixtures::*;
use hp_01_rollup_device::{MockRollupDevice, Verdict};
use hp_03_erc20_abi::{decode_transfer, TRANSFER_SELECTOR};
use hp_04_honeypot::AdvanceStatus;
use shared_types::Be256;

// =============================================================================
// DEPOSITS
// =============================================================================

#[test]
fn test_deposit_of_other_token_is_rejected() {
    let mut device = MockRollupDevice::new();
    device.push_advance(PORTAL, deposit(OTHER_TOKEN, Be256::from_u64(100)));
    let mut rollup = harness(storage_with(Be256::from_u64(5)), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Reject]);
    assert_eq!(
        rollup.device().reports,
        vec![AdvanceStatus::DepositInvalidToken.as_report().to_vec()]
    );
    assert_eq!(rollup.handler().balance(), Be256::from_u64(5));
}

#[test]
fn test_deposit_at_max_balance_overflows() {
    let mut device = MockRollupDevice::new();
    device.push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(1)));
    let storage = storage_with(Be256::MAX);
    let durable = storage.durable();
    let mut rollup = harness(storage, device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Reject]);
    assert_eq!(rollup.device().last_report(), Some(&[0x03][..]));
    assert_eq!(rollup.handler().balance(), Be256::MAX);
    assert_eq!(durable.lock().as_slice(), Be256::MAX.as_bytes());
}

#[test]
fn test_deposits_then_full_withdrawal() {
    let mut device = MockRollupDevice::new();
    device
        .push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(100)))
        .push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(250)))
        .push_inspect(Vec::new())
        .push_advance(WITHDRAWAL, Vec::new())
        .push_inspect(Vec::new());
    let mut rollup = harness(storage_with(Be256::ZERO), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Accept; 5]);
    assert!(rollup.handler().balance().is_zero());

    let device = rollup.device();
    assert_eq!(device.reports[0], vec![0x00]);
    assert_eq!(device.reports[1], vec![0x00]);
    assert_eq!(device.reports[2], Be256::from_u64(350).to_be_bytes().to_vec());
    assert_eq!(device.reports[3], vec![0x00]);
    assert_eq!(device.reports[4], vec![0u8; 32]);

    assert_eq!(device.vouchers.len(), 1);
    let voucher = &device.vouchers[0];
    assert_eq!(voucher.destination, TOKEN);
    assert!(voucher.value.is_zero());
    assert_eq!(voucher.payload[..4], TRANSFER_SELECTOR);
    let call = decode_transfer(&voucher.payload).unwrap();
    assert_eq!(call.destination, WITHDRAWAL);
    assert_eq!(call.amount, Be256::from_u64(350));
}

// =============================================================================
// WITHDRAWALS
// =============================================================================

#[test]
fn test_withdrawal_at_zero_balance() {
    let mut device = MockRollupDevice::new();
    device.push_advance(WITHDRAWAL, Vec::new());
    let mut rollup = harness(storage_with(Be256::ZERO), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Reject]);
    assert_eq!(
        rollup.device().last_report(),
        Some(&AdvanceStatus::WithdrawNoFunds.as_report()[..])
    );
    assert!(rollup.device().vouchers.is_empty());
}

#[test]
fn test_second_withdrawal_has_no_funds() {
    let mut device = MockRollupDevice::new();
    device
        .push_advance(WITHDRAWAL, Vec::new())
        .push_advance(WITHDRAWAL, Vec::new());
    let mut rollup = harness(storage_with(Be256::from_u64(1)), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Accept, Verdict::Reject]);
    assert_eq!(rollup.device().vouchers.len(), 1);
}

#[test]
fn test_refused_voucher_keeps_funds_for_retry() {
    let mut device = MockRollupDevice::new();
    device.fail_vouchers = true;
    device.push_advance(WITHDRAWAL, Vec::new());
    let mut rollup = harness(storage_with(Be256::from_u64(77)), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Reject]);
    assert_eq!(rollup.device().last_report(), Some(&[0x05][..]));
    assert_eq!(rollup.handler().balance(), Be256::from_u64(77));
}

// =============================================================================
// INSPECT
// =============================================================================

#[test]
fn test_inspect_returns_exact_balance() {
    let balance: Be256 = "0x00000000000000000000000000000000000000000000000000000001000000ff"
        .parse()
        .unwrap();
    let mut device = MockRollupDevice::new();
    device.push_inspect(b"balance?".to_vec());
    let mut rollup = harness(storage_with(balance), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Accept]);
    assert_eq!(rollup.device().last_report(), Some(&balance.as_bytes()[..]));
    assert!(rollup.device().vouchers.is_empty());
}

#[test]
fn test_inspect_with_oversized_payload_still_reports_balance() {
    let mut device = MockRollupDevice::new();
    device.push_inspect(vec![0x42; 5000]);
    let mut rollup = harness(storage_with(Be256::from_u64(350)), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Accept]);
    assert_eq!(
        rollup.device().reports,
        vec![Be256::from_u64(350).to_be_bytes().to_vec()]
    );
    assert_eq!(rollup.stats().oversized, 1);
}

// =============================================================================
// INVALID REQUESTS
// =============================================================================

#[test]
fn test_unknown_sender_is_invalid() {
    let mut device = MockRollupDevice::new();
    device
        .push_advance(STRANGER, vec![0xde, 0xad, 0xbe, 0xef])
        .push_advance(STRANGER, deposit(TOKEN, Be256::from_u64(10)))
        .push_advance(STRANGER, Vec::new());
    let mut rollup = harness(storage_with(Be256::from_u64(3)), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Reject; 3]);
    assert_eq!(rollup.device().reports, vec![vec![0xFF]; 3]);
    assert_eq!(rollup.handler().balance(), Be256::from_u64(3));
}

#[test]
fn test_portal_with_wrong_length_is_invalid() {
    let mut payload = deposit(TOKEN, Be256::from_u64(10));
    payload.push(0);
    let mut device = MockRollupDevice::new();
    device
        .push_advance(PORTAL, payload)
        .push_advance(PORTAL, Vec::new());
    let mut rollup = harness(storage_with(Be256::ZERO), device);

    assert_eq!(drain(&mut rollup), vec![Verdict::Reject; 2]);
    assert_eq!(rollup.device().reports, vec![vec![0xFF]; 2]);
    assert!(rollup.handler().balance().is_zero());
}

#[test]
fn test_reject_is_acknowledged_on_next_finish() {
    let mut device = MockRollupDevice::new();
    device
        .push_advance(STRANGER, vec![1])
        .push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(1)));
    let mut rollup = harness(storage_with(Be256::ZERO), device);

    drain(&mut rollup);
    assert_eq!(rollup.device().finishes, vec![true, false, true]);
    assert_eq!(rollup.stats().accepted, 1);
    assert_eq!(rollup.stats().rejected, 1);
}
