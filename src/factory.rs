use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::config::KeyConfig;
use crate::errors::{ConfigError, KeyError};
use crate::key::{KeyPair, PrivateKey, PublicKey};
use crate::keys::{ecdsa, ed25519, rsa, secp256k1};
use crate::pb::KeyType;

/// KeyFactory generates and decodes keys under an explicit configuration.
#[derive(Debug, Clone, Default)]
pub struct KeyFactory {
    config: KeyConfig,
}

impl KeyFactory {
    pub fn new(config: KeyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KeyConfig {
        &self.config
    }

    /// generate creates a key pair from the operating system's random source.
    /// `bits` sizes RSA moduli and is ignored by the fixed-curve algorithms.
    pub fn generate(&self, key_type: KeyType, bits: usize) -> Result<KeyPair, KeyError> {
        self.generate_with_rng(key_type, bits, &mut OsRng)
    }

    /// generate_with_rng creates a key pair drawing randomness from `rng`.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        &self,
        key_type: KeyType,
        bits: usize,
        rng: &mut R,
    ) -> Result<KeyPair, KeyError> {
        let pair = match key_type {
            KeyType::Rsa => rsa::generate_key_pair(rng, bits, &self.config)?,
            KeyType::Ed25519 => ed25519::generate_key_pair(rng)?,
            KeyType::Secp256k1 => secp256k1::generate_key_pair(rng)?,
            KeyType::Ecdsa => ecdsa::generate_key_pair(rng)?,
        };

        debug!(%key_type, "generated key pair");
        Ok(pair)
    }

    /// generate_from_tag generates a key pair for a wire tag, rejecting
    /// tags outside the supported set.
    pub fn generate_from_tag(&self, tag: i32, bits: usize) -> Result<KeyPair, KeyError> {
        self.generate(KeyType::from_tag(tag)?, bits)
    }

    /// private_key_from_raw decodes the algorithm-specific private encoding.
    pub fn private_key_from_raw(
        &self,
        key_type: KeyType,
        raw: &[u8],
    ) -> Result<PrivateKey, KeyError> {
        let key: PrivateKey = match key_type {
            KeyType::Rsa => rsa::unmarshal_private_key(raw, &self.config)?.into(),
            KeyType::Ed25519 => ed25519::unmarshal_private_key(raw)?.into(),
            KeyType::Secp256k1 => secp256k1::unmarshal_private_key(raw)?.into(),
            KeyType::Ecdsa => ecdsa::unmarshal_private_key(raw)?.into(),
        };

        debug!(%key_type, "decoded private key");
        Ok(key)
    }

    /// public_key_from_raw decodes the algorithm-specific public encoding.
    pub fn public_key_from_raw(
        &self,
        key_type: KeyType,
        raw: &[u8],
    ) -> Result<PublicKey, KeyError> {
        let key: PublicKey = match key_type {
            KeyType::Rsa => rsa::unmarshal_public_key(raw, &self.config)?.into(),
            KeyType::Ed25519 => ed25519::unmarshal_public_key(raw)?.into(),
            KeyType::Secp256k1 => secp256k1::unmarshal_public_key(raw)?.into(),
            KeyType::Ecdsa => ecdsa::unmarshal_public_key(raw)?.into(),
        };

        debug!(%key_type, "decoded public key");
        Ok(key)
    }
}

/// generate_key_pair creates a key pair with the default configuration.
pub fn generate_key_pair(key_type: KeyType, bits: usize) -> Result<KeyPair, KeyError> {
    KeyFactory::default().generate(key_type, bits)
}
