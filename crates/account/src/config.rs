//! Immutable parameters of an account logic version.
use std::path::Path;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Parameters baked into one deployment of the account logic.
///
/// Every account pointing at the same logic address shares them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvocadoConfig {
    /// Version and fee registry.
    pub registry: Address,
    /// Signer index notified on signer changes. Zero disables the sync.
    #[serde(default)]
    pub signers_list: Address,
    /// Factory allowed to call `initialize`.
    pub factory: Address,
    /// Lower bound of authorized fees and the fallback fee when the registry misbehaves.
    pub authorized_min_fee: U256,
    /// Upper bound of authorized fees.
    pub authorized_max_fee: U256,
    /// Receiver of the fallback fee.
    pub authorized_fee_collector: Address,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("authorizedMinFee {min} exceeds authorizedMaxFee {max}")]
    FeeBounds { min: U256, max: U256 },
    #[error("{0} must not be the zero address")]
    ZeroAddress(&'static str),
}

impl AvocadoConfig {
    /// Parses and validates a TOML config.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.authorized_min_fee > self.authorized_max_fee {
            return Err(ConfigError::FeeBounds {
                min: self.authorized_min_fee,
                max: self.authorized_max_fee,
            });
        }
        if self.registry.is_zero() {
            return Err(ConfigError::ZeroAddress("registry"));
        }
        if self.factory.is_zero() {
            return Err(ConfigError::ZeroAddress("factory"));
        }
        if self.authorized_fee_collector.is_zero() {
            return Err(ConfigError::ZeroAddress("authorizedFeeCollector"));
        }
        Ok(())
    }

    /// Clamps a registry-computed authorized fee into the configured bounds.
    pub fn clamp_authorized_fee(&self, fee: U256) -> U256 {
        fee.max(self.authorized_min_fee).min(self.authorized_max_fee)
    }
}
