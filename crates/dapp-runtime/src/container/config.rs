//! # dApp Configuration
//!
//! Device paths, request limits and the deployment's address book.
//!
//! ## Load Order
//!
//! 1. Deployment preset (`HONEYPOT_DEPLOYMENT`, default `localhost`)
//! 2. JSON file named by `HONEYPOT_CONFIG`, if set
//! 3. Individual environment overrides
//!
//! Later sources win. The result must pass [`DappConfig::validate`] before the
//! runtime will start.

use hp_03_erc20_abi::DEPOSIT_PAYLOAD_LEN;
use hp_04_honeypot::AddressBook;
use serde::Deserialize;
use shared_types::Address;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Selects the deployment preset.
pub const ENV_DEPLOYMENT: &str = "HONEYPOT_DEPLOYMENT";
/// Path of an optional JSON configuration file.
pub const ENV_CONFIG_FILE: &str = "HONEYPOT_CONFIG";

const ENV_PORTAL: &str = "HONEYPOT_PORTAL_ADDRESS";
const ENV_WITHDRAWAL: &str = "HONEYPOT_WITHDRAWAL_ADDRESS";
const ENV_TOKEN: &str = "HONEYPOT_TOKEN_ADDRESS";
const ENV_ROLLUP_DEVICE: &str = "HONEYPOT_ROLLUP_DEVICE";
const ENV_STATE_DEVICE: &str = "HONEYPOT_STATE_DEVICE";
const ENV_MAX_PAYLOAD: &str = "HONEYPOT_MAX_PAYLOAD";

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DappConfig {
    /// Rollup device configuration.
    pub device: DeviceConfig,
    /// State device configuration.
    pub storage: StorageConfig,
    /// Portal, withdrawal and token addresses.
    pub addresses: AddressBook,
}

/// Rollup device configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Device node.
    pub path: PathBuf,
    /// Largest request payload that will be read.
    pub max_payload_len: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/dev/rollup"),
            max_payload_len: 4096,
        }
    }
}

/// State device configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Block device holding the balance record.
    pub state_path: PathBuf,
    /// Hold an exclusive lock on the device while running.
    pub lock: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("/dev/mtdblock1"),
            lock: true,
        }
    }
}

impl DappConfig {
    /// Default devices with the addresses of `deployment`.
    pub fn for_deployment(deployment: Deployment) -> Result<Self, ConfigError> {
        Ok(Self {
            device: DeviceConfig::default(),
            storage: StorageConfig::default(),
            addresses: deployment.addresses()?,
        })
    }

    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let deployment = match lookup(ENV_DEPLOYMENT) {
            Some(name) => name.parse()?,
            None => Deployment::Localhost,
        };
        let mut config = Self::for_deployment(deployment)?;

        if let Some(path) = lookup(ENV_CONFIG_FILE) {
            let path = PathBuf::from(path);
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let file: ConfigFile = serde_json::from_str(&text)
                .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
            config.apply_file(file);
            info!("Loaded configuration file {}", path.display());
        }

        if let Some(value) = lookup(ENV_PORTAL) {
            config.addresses.portal = parse_var(ENV_PORTAL, &value)?;
        }
        if let Some(value) = lookup(ENV_WITHDRAWAL) {
            config.addresses.withdrawal = parse_var(ENV_WITHDRAWAL, &value)?;
        }
        if let Some(value) = lookup(ENV_TOKEN) {
            config.addresses.token = parse_var(ENV_TOKEN, &value)?;
        }
        if let Some(value) = lookup(ENV_ROLLUP_DEVICE) {
            config.device.path = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_STATE_DEVICE) {
            config.storage.state_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_MAX_PAYLOAD) {
            config.device.max_payload_len = parse_var(ENV_MAX_PAYLOAD, &value)?;
        }

        info!(deployment = %deployment, "Configuration loaded");
        Ok(config)
    }

    /// Reject configurations the dApp cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let book = &self.addresses;
        for (role, address) in [
            ("portal", &book.portal),
            ("withdrawal", &book.withdrawal),
            ("token", &book.token),
        ] {
            if address.is_zero() {
                return Err(ConfigError::ZeroAddress(role));
            }
        }
        if book.portal == book.withdrawal {
            return Err(ConfigError::SharedPortalAddress);
        }
        if self.device.max_payload_len < DEPOSIT_PAYLOAD_LEN {
            return Err(ConfigError::PayloadLimitTooSmall {
                limit: self.device.max_payload_len,
                required: DEPOSIT_PAYLOAD_LEN,
            });
        }
        Ok(())
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(path) = file.rollup_device {
            self.device.path = path;
        }
        if let Some(limit) = file.max_payload_len {
            self.device.max_payload_len = limit;
        }
        if let Some(path) = file.state_device {
            self.storage.state_path = path;
        }
        if let Some(lock) = file.lock_state_device {
            self.storage.lock = lock;
        }
        if let Some(portal) = file.portal {
            self.addresses.portal = portal;
        }
        if let Some(withdrawal) = file.withdrawal {
            self.addresses.withdrawal = withdrawal;
        }
        if let Some(token) = file.token {
            self.addresses.token = token;
        }
    }
}

/// On-disk configuration. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    rollup_device: Option<PathBuf>,
    max_payload_len: Option<usize>,
    state_device: Option<PathBuf>,
    lock_state_device: Option<bool>,
    portal: Option<Address>,
    withdrawal: Option<Address>,
    token: Option<Address>,
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// DEPLOYMENTS
// =============================================================================

/// Known deployments of the portal and token contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Local development chain.
    Localhost,
    /// Sepolia testnet.
    Sepolia,
    /// Goerli testnet.
    Goerli,
}

impl Deployment {
    /// Portal, withdrawal and token addresses for this deployment.
    pub fn addresses(self) -> Result<AddressBook, ConfigError> {
        let (portal, withdrawal, token) = match self {
            Self::Localhost => (
                "0xc700D6aDd016eECd59d989C028214Eaa0fCC0051",
                "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
                "0xc6e7DF5E7b4f2A278906862b61205850344D4e7d",
            ),
            Self::Sepolia => (
                "0x4340ac4FcdFC5eF8d34930C96BBac2Af1301DF40",
                "0x5A2636B6553F7B6a0ACBD1b1B78d94Ecc2a65FaB",
                "0x0E1AE9AB7F5feFDFF2587e8e7edB2AFf0c4CDc66",
            ),
            Self::Goerli => (
                "0xA53122bA85D9222945855513F0745aFd49b1966A",
                "0x5A2636B6553F7B6a0ACBD1b1B78d94Ecc2a65FaB",
                "0x0E1AE9AB7F5feFDFF2587e8e7edB2AFf0c4CDc66",
            ),
        };
        Ok(AddressBook {
            portal: parse_var(ENV_PORTAL, portal)?,
            withdrawal: parse_var(ENV_WITHDRAWAL, withdrawal)?,
            token: parse_var(ENV_TOKEN, token)?,
        })
    }
}

impl FromStr for Deployment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "localhost" => Ok(Self::Localhost),
            "sepolia" => Ok(Self::Sepolia),
            "goerli" => Ok(Self::Goerli),
            _ => Err(ConfigError::UnknownDeployment(s.to_string())),
        }
    }
}

impl std::fmt::Display for Deployment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Localhost => "localhost",
            Self::Sepolia => "sepolia",
            Self::Goerli => "goerli",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `HONEYPOT_DEPLOYMENT` names no known deployment.
    #[error("unknown deployment '{0}' (expected localhost, sepolia or goerli)")]
    UnknownDeployment(String),

    /// The configuration file could not be read.
    #[error("unable to read config file {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// An environment variable could not be parsed.
    #[error("invalid {var}='{value}': {reason}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Parse failure
        reason: String,
    },

    /// A role address is all zeroes.
    #[error("{0} address is not set")]
    ZeroAddress(&'static str),

    /// The portal could withdraw, or the withdrawer could deposit.
    #[error("portal and withdrawal addresses must differ")]
    SharedPortalAddress,

    /// Deposits would be rejected unread.
    #[error("max payload length {limit} is below the deposit size {required}")]
    PayloadLimitTooSmall {
        /// Configured limit
        limit: usize,
        /// Deposit record size
        required: usize,
    },
}
