use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, KeyError};

/// Smallest modulus the configuration will ever admit.
const RSA_FLOOR_BITS: usize = 512;

/// KeyConfig carries algorithm parameters that callers may tune.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyConfig {
    /// Modulus size used when generation is asked for zero bits.
    pub default_rsa_bits: usize,
    pub min_rsa_bits: usize,
    pub max_rsa_bits: usize,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            default_rsa_bits: 2048,
            min_rsa_bits: 2048,
            max_rsa_bits: 8192,
        }
    }
}

impl KeyConfig {
    /// from_toml_str parses and validates a TOML document. Missing fields keep
    /// their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_rsa_bits < RSA_FLOOR_BITS || self.min_rsa_bits > self.max_rsa_bits {
            return Err(ConfigError::InvalidRsaBounds {
                min: self.min_rsa_bits,
                max: self.max_rsa_bits,
            });
        }

        if !(self.min_rsa_bits..=self.max_rsa_bits).contains(&self.default_rsa_bits) {
            return Err(ConfigError::InvalidDefaultRsaBits {
                bits: self.default_rsa_bits,
                min: self.min_rsa_bits,
                max: self.max_rsa_bits,
            });
        }

        Ok(())
    }

    pub(crate) fn check_rsa_bits(&self, bits: usize) -> Result<(), KeyError> {
        if (self.min_rsa_bits..=self.max_rsa_bits).contains(&bits) {
            Ok(())
        } else {
            Err(KeyError::InvalidKeySize {
                bits,
                min: self.min_rsa_bits,
                max: self.max_rsa_bits,
            })
        }
    }
}
