//! # Property Tests
//!
//! Balance accumulation, withdrawal capture and inspect idempotence over
//! random request sequences.

use super::fixtures::*;
use hp_01_rollup_device::{MockRollupDevice, Verdict};
use hp_03_erc20_abi::decode_transfer;
use proptest::prelude::*;
use shared_types::{Address, Be256};

proptest! {
    #[test]
    fn prop_deposits_sum_then_withdraw_captures_total(
        amounts in proptest::collection::vec(1u64..=u64::from(u32::MAX), 1..16)
    ) {
        let mut device = MockRollupDevice::new();
        for amount in &amounts {
            device.push_advance(PORTAL, deposit(TOKEN, Be256::from_u64(*amount)));
        }
        device.push_advance(WITHDRAWAL, Vec::new());
        let mut rollup = harness(storage_with(Be256::ZERO), device);

        let verdicts = drain(&mut rollup);
        prop_assert!(verdicts.iter().all(|v| *v == Verdict::Accept));

        let total: u64 = amounts.iter().sum();
        let vouchers = &rollup.device().vouchers;
        prop_assert_eq!(vouchers.len(), 1);
        let call = decode_transfer(&vouchers[0].payload).unwrap();
        prop_assert_eq!(call.amount, Be256::from_u64(total));
        prop_assert!(rollup.handler().balance().is_zero());
    }

    #[test]
    fn prop_inspect_is_idempotent(balance in any::<[u8; 32]>(), queries in 1usize..8) {
        let balance = Be256::from_be_bytes(balance);
        let mut device = MockRollupDevice::new();
        for i in 0..queries {
            device.push_inspect(vec![i as u8; i]);
        }
        let mut rollup = harness(storage_with(balance), device);

        drain(&mut rollup);
        prop_assert_eq!(rollup.device().reports.len(), queries);
        for report in &rollup.device().reports {
            prop_assert_eq!(report.as_slice(), balance.as_bytes());
        }
        prop_assert_eq!(rollup.handler().balance(), balance);
    }

    #[test]
    fn prop_unknown_senders_never_move_funds(
        sender in any::<[u8; 20]>(),
        payload in proptest::collection::vec(any::<u8>(), 0..128),
    ) {
        let sender = Address::new(sender);
        prop_assume!(sender != PORTAL && sender != WITHDRAWAL);

        let mut device = MockRollupDevice::new();
        device.push_advance(sender, payload);
        let mut rollup = harness(storage_with(Be256::from_u64(1_000)), device);

        prop_assert_eq!(drain(&mut rollup), vec![Verdict::Reject]);
        prop_assert_eq!(rollup.device().last_report(), Some(&[0xFF][..]));
        prop_assert!(rollup.device().vouchers.is_empty());
        prop_assert_eq!(rollup.handler().balance(), Be256::from_u64(1_000));
    }
}
