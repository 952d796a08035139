use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{CryptoRng, RngCore};

use crate::errors::KeyError;
use crate::key::{Key, KeyPair, PrivKey, PubKey, PublicKey};
use crate::keys::random_secret;
use crate::pb::KeyType;

pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
/// Seed followed by the public key.
pub const PRIVATE_KEY_LENGTH: usize = ed25519_dalek::KEYPAIR_LENGTH;
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// Older encoders appended a second copy of the public key.
const LEGACY_PRIVATE_KEY_LENGTH: usize = PRIVATE_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// Ed25519PrivateKey wraps an Ed25519 signing key.
#[derive(Clone)]
pub struct Ed25519PrivateKey {
    key: SigningKey,
}

impl Key for Ed25519PrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        Ok(self.key.to_keypair_bytes().to_vec())
    }
}

impl PrivKey for Ed25519PrivateKey {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyError> {
        let signature: Signature = self
            .key
            .try_sign(data)
            .map_err(|err| KeyError::Signing(err.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }

    fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(Ed25519PublicKey {
            key: self.key.verifying_key(),
        })
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519PrivateKey").finish_non_exhaustive()
    }
}

/// Ed25519PublicKey wraps an Ed25519 verifying key.
#[derive(Debug, Clone)]
pub struct Ed25519PublicKey {
    key: VerifyingKey,
}

impl Key for Ed25519PublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        Ok(self.key.to_bytes().to_vec())
    }
}

impl PubKey for Ed25519PublicKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        let signature = Signature::from_slice(signature).map_err(|_| {
            KeyError::MalformedSignature(format!(
                "ed25519 signature must be {SIGNATURE_LENGTH} bytes, got {}",
                signature.len()
            ))
        })?;

        Ok(self.key.verify(data, &signature).is_ok())
    }
}

pub fn generate_key_pair<R: RngCore + CryptoRng>(rng: &mut R) -> Result<KeyPair, KeyError> {
    let seed = random_secret(rng)?;
    Ok(KeyPair::from_private(Ed25519PrivateKey {
        key: SigningKey::from_bytes(&seed),
    }))
}

/// unmarshal_private_key accepts `seed || public` and the legacy form with a
/// redundant trailing public key.
pub fn unmarshal_private_key(bytes: &[u8]) -> Result<Ed25519PrivateKey, KeyError> {
    let keypair = match bytes.len() {
        PRIVATE_KEY_LENGTH => bytes,
        LEGACY_PRIVATE_KEY_LENGTH => {
            let (keypair, redundant) = bytes.split_at(PRIVATE_KEY_LENGTH);
            if redundant != &keypair[PUBLIC_KEY_LENGTH..] {
                return Err(KeyError::KeyFormat(
                    "ed25519 redundant public key does not match".to_string(),
                ));
            }
            keypair
        }
        len => {
            return Err(KeyError::KeyFormat(format!(
                "ed25519 private key must be {PRIVATE_KEY_LENGTH} or {LEGACY_PRIVATE_KEY_LENGTH} bytes, got {len}"
            )))
        }
    };

    let keypair: &[u8; PRIVATE_KEY_LENGTH] = keypair
        .try_into()
        .map_err(|_| KeyError::KeyFormat("invalid ed25519 key".to_string()))?;
    let key = SigningKey::from_keypair_bytes(keypair).map_err(KeyError::key_format)?;
    Ok(Ed25519PrivateKey { key })
}

pub fn unmarshal_public_key(bytes: &[u8]) -> Result<Ed25519PublicKey, KeyError> {
    let key_bytes: &[u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
        KeyError::KeyFormat(format!(
            "ed25519 public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
            bytes.len()
        ))
    })?;
    let key = VerifyingKey::from_bytes(key_bytes).map_err(KeyError::key_format)?;
    Ok(Ed25519PublicKey { key })
}
