//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the `StateStorage` port.

mod block_device;
mod memory;

pub use block_device::BlockDeviceStorage;
pub use memory::InMemoryStorage;
