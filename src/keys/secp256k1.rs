//! ECDSA over secp256k1 with SHA-256.
//!
//! Private keys encode as the 32-byte scalar, public keys as compressed SEC1
//! points, signatures as DER.

use std::fmt;

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{DerSignature, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use rand::{CryptoRng, RngCore};

use crate::errors::KeyError;
use crate::key::{Key, KeyPair, PrivKey, PubKey, PublicKey};
use crate::keys::random_scalar;
use crate::pb::KeyType;

pub const PRIVATE_KEY_LENGTH: usize = 32;

#[derive(Clone)]
pub struct Secp256k1PrivateKey {
    secret: SecretKey,
}

impl Key for Secp256k1PrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        Ok(self.secret.to_bytes().to_vec())
    }
}

impl PrivKey for Secp256k1PrivateKey {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyError> {
        let signature: Signature = SigningKey::from(&self.secret)
            .try_sign(data)
            .map_err(|err| KeyError::Signing(err.to_string()))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn public_key(&self) -> PublicKey {
        PublicKey::Secp256k1(Secp256k1PublicKey {
            key: self.secret.public_key(),
        })
    }
}

impl fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1PrivateKey").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Secp256k1PublicKey {
    key: k256::PublicKey,
}

impl Key for Secp256k1PublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        Ok(self.key.to_encoded_point(true).as_bytes().to_vec())
    }
}

impl PubKey for Secp256k1PublicKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        let der = DerSignature::try_from(signature)
            .map_err(|err| KeyError::MalformedSignature(err.to_string()))?;
        let Ok(signature) = Signature::try_from(der) else {
            return Ok(false);
        };
        // Accept high-S signatures produced by other implementations.
        let signature = signature.normalize_s().unwrap_or(signature);

        Ok(VerifyingKey::from(&self.key).verify(data, &signature).is_ok())
    }
}

pub fn generate_key_pair<R: RngCore + CryptoRng>(rng: &mut R) -> Result<KeyPair, KeyError> {
    let secret = random_scalar(rng, SecretKey::from_slice)?;
    Ok(KeyPair::from_private(Secp256k1PrivateKey { secret }))
}

/// unmarshal_private_key decodes a 32-byte big-endian scalar.
pub fn unmarshal_private_key(bytes: &[u8]) -> Result<Secp256k1PrivateKey, KeyError> {
    if bytes.len() != PRIVATE_KEY_LENGTH {
        return Err(KeyError::KeyFormat(format!(
            "secp256k1 private key must be {PRIVATE_KEY_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }

    let secret = SecretKey::from_slice(bytes).map_err(KeyError::key_format)?;
    Ok(Secp256k1PrivateKey { secret })
}

/// unmarshal_public_key decodes a compressed or uncompressed SEC1 point.
pub fn unmarshal_public_key(bytes: &[u8]) -> Result<Secp256k1PublicKey, KeyError> {
    let key = k256::PublicKey::from_sec1_bytes(bytes).map_err(KeyError::key_format)?;
    Ok(Secp256k1PublicKey { key })
}
