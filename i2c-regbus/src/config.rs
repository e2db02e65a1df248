//! Bus configuration.
//!
//! A [`BusConfig`] names the i2c-dev node and the 7-bit target address a
//! handle binds to. It derives serde so applications can embed it in their
//! own config files, and can also be taken from the environment.

use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

use crate::error::{Error, Result};

/// Highest valid 7-bit target address.
pub const MAX_ADDRESS: u8 = 0x7F;

/// Environment variable naming the bus device node.
pub const DEVICE_ENV: &str = "I2C_REGBUS_DEVICE";

/// Environment variable holding the target address (decimal or 0x-hex).
pub const ADDRESS_ENV: &str = "I2C_REGBUS_ADDRESS";

const DEFAULT_DEVICE: &str = "/dev/i2c-1";

/// Which bus to open and which device on it to talk to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BusConfig {
    /// Bus device node, e.g. /dev/i2c-1
    #[serde(default = "default_device")]
    pub device: PathBuf,

    /// 7-bit target address
    pub address: u8,
}

fn default_device() -> PathBuf {
    PathBuf::from(DEFAULT_DEVICE)
}

impl BusConfig {
    /// Create a validated configuration.
    pub fn new(device: impl Into<PathBuf>, address: u8) -> Result<Self> {
        let config = Self {
            device: device.into(),
            address,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `I2C_REGBUS_DEVICE` and `I2C_REGBUS_ADDRESS`.
    ///
    /// The device defaults to /dev/i2c-1; the address is required.
    pub fn from_env() -> Result<Self> {
        let device = env::var_os(DEVICE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_device);

        let raw = env::var(ADDRESS_ENV)
            .map_err(|_| Error::Config(format!("{ADDRESS_ENV} is not set")))?;
        let address = parse_address(&raw)?;

        Self::new(device, address)
    }

    /// Check the address fits in 7 bits.
    pub fn validate(&self) -> Result<()> {
        if self.address > MAX_ADDRESS {
            return Err(Error::Config(format!(
                "address 0x{:02x} is outside the 7-bit range",
                self.address
            )));
        }
        Ok(())
    }
}

/// Parse an address written as decimal (`72`) or hex (`0x48`).
pub fn parse_address(raw: &str) -> Result<u8> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => raw.parse::<u8>(),
    };
    parsed.map_err(|e| Error::Config(format!("invalid address {raw:?}: {e}")))
}
