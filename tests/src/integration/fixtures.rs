//! Shared fixtures: a fixed address book and helpers to build and drain a
//! request loop over the scripted device.

use hp_01_rollup_device::{LoopConfig, MockRollupDevice, RollupError, RollupLoop, Verdict};
use hp_02_ledger::{InMemoryStorage, Ledger, StateStorage, STATE_OFFSET, STATE_RECORD_LEN};
use hp_03_erc20_abi::Erc20Deposit;
use hp_04_honeypot::{AddressBook, Honeypot};
use shared_types::{Address, Be256};

pub const PORTAL: Address = Address::new([0x0A; 20]);
pub const WITHDRAWAL: Address = Address::new([0x0B; 20]);
pub const TOKEN: Address = Address::new([0x0C; 20]);
pub const OTHER_TOKEN: Address = Address::new([0x0D; 20]);
pub const DEPOSITOR: Address = Address::new([0x0E; 20]);
pub const STRANGER: Address = Address::new([0x0F; 20]);

pub type Harness<S> = RollupLoop<MockRollupDevice, Honeypot<S>>;

pub fn book() -> AddressBook {
    AddressBook {
        portal: PORTAL,
        withdrawal: WITHDRAWAL,
        token: TOKEN,
    }
}

pub fn deposit(token: Address, amount: Be256) -> Vec<u8> {
    Erc20Deposit {
        token,
        sender: DEPOSITOR,
        amount,
    }
    .encode()
    .to_vec()
}

/// In-memory medium already holding `balance`.
pub fn storage_with(balance: Be256) -> InMemoryStorage {
    let mut storage = InMemoryStorage::new(STATE_RECORD_LEN);
    storage.write_at(STATE_OFFSET, balance.as_bytes()).unwrap();
    storage.flush().unwrap();
    storage
}

pub fn harness<S: StateStorage>(storage: S, device: MockRollupDevice) -> Harness<S> {
    let ledger = Ledger::load(storage).unwrap();
    RollupLoop::new(device, Honeypot::new(ledger, book()), LoopConfig::default())
}

/// Process requests until the script runs out.
pub fn drain<S: StateStorage>(rollup: &mut Harness<S>) -> Vec<Verdict> {
    let mut verdicts = Vec::new();
    loop {
        match rollup.process_next_request() {
            Ok(verdict) => verdicts.push(verdict),
            Err(RollupError::Device(_)) => return verdicts,
            Err(e) => panic!("request loop failed: {e}"),
        }
    }
}
