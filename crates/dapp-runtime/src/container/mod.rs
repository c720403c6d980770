//! # Container
//!
//! Configuration and construction of everything the request loop owns.

pub mod config;

pub use config::{
    ConfigError, DappConfig, Deployment, DeviceConfig, StorageConfig, ENV_CONFIG_FILE,
    ENV_DEPLOYMENT,
};
