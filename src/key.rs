use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::errors::KeyError;
use crate::keys::{
    EcdsaPrivateKey, EcdsaPublicKey, Ed25519PrivateKey, Ed25519PublicKey, RsaPrivateKey,
    RsaPublicKey, Secp256k1PrivateKey, Secp256k1PublicKey,
};
use crate::pb::KeyType;

impl KeyType {
    /// from_tag maps a wire tag to a key type.
    pub fn from_tag(tag: i32) -> Result<Self, KeyError> {
        KeyType::try_from(tag).map_err(|_| KeyError::UnsupportedKeyType(format!("tag {tag}")))
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

impl FromStr for KeyType {
    type Err = KeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        KeyType::ALL
            .into_iter()
            .find(|key_type| key_type.as_str_name().eq_ignore_ascii_case(value))
            .ok_or_else(|| KeyError::UnsupportedKeyType(value.to_string()))
    }
}

/// Key is the capability shared by every public and private key.
pub trait Key {
    /// key_type returns the algorithm tag fixed at construction.
    fn key_type(&self) -> KeyType;

    /// raw returns the canonical encoding of the key material.
    fn raw(&self) -> Result<Vec<u8>, KeyError>;

    /// equals reports whether both keys share a type and raw encoding.
    fn equals(&self, other: &dyn Key) -> bool {
        if self.key_type() != other.key_type() {
            return false;
        }

        match (self.raw(), other.raw()) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        }
    }
}

/// PrivKey signs data and derives its paired public key.
pub trait PrivKey: Key + Send + Sync {
    /// sign hashes and signs data, returning the algorithm's signature encoding.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyError>;

    /// public_key derives the public half of this key.
    fn public_key(&self) -> PublicKey;
}

/// PubKey verifies signatures.
pub trait PubKey: Key + Send + Sync {
    /// verify returns Ok(false) for a signature that does not match, and an
    /// error only when the signature cannot be parsed at all.
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError>;
}

/// PrivateKey holds private key material for one of the supported algorithms.
#[derive(Clone)]
pub enum PrivateKey {
    Rsa(RsaPrivateKey),
    Ed25519(Ed25519PrivateKey),
    Secp256k1(Secp256k1PrivateKey),
    Ecdsa(EcdsaPrivateKey),
}

impl PrivateKey {
    fn inner(&self) -> &dyn PrivKey {
        match self {
            Self::Rsa(key) => key,
            Self::Ed25519(key) => key,
            Self::Secp256k1(key) => key,
            Self::Ecdsa(key) => key,
        }
    }
}

impl Key for PrivateKey {
    fn key_type(&self) -> KeyType {
        self.inner().key_type()
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        self.inner().raw()
    }
}

impl PrivKey for PrivateKey {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyError> {
        self.inner().sign(data)
    }

    fn public_key(&self) -> PublicKey {
        self.inner().public_key()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for PrivateKey {}

/// Hashes the same (type, raw) pair that equality compares.
impl Hash for PrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_type().hash(state);
        self.raw().ok().hash(state);
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&self.key_type()).finish()
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self::Rsa(key)
    }
}

impl From<Ed25519PrivateKey> for PrivateKey {
    fn from(key: Ed25519PrivateKey) -> Self {
        Self::Ed25519(key)
    }
}

impl From<Secp256k1PrivateKey> for PrivateKey {
    fn from(key: Secp256k1PrivateKey) -> Self {
        Self::Secp256k1(key)
    }
}

impl From<EcdsaPrivateKey> for PrivateKey {
    fn from(key: EcdsaPrivateKey) -> Self {
        Self::Ecdsa(key)
    }
}

/// PublicKey holds public key material for one of the supported algorithms.
#[derive(Debug, Clone)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Ed25519(Ed25519PublicKey),
    Secp256k1(Secp256k1PublicKey),
    Ecdsa(EcdsaPublicKey),
}

impl PublicKey {
    fn inner(&self) -> &dyn PubKey {
        match self {
            Self::Rsa(key) => key,
            Self::Ed25519(key) => key,
            Self::Secp256k1(key) => key,
            Self::Ecdsa(key) => key,
        }
    }
}

impl Key for PublicKey {
    fn key_type(&self) -> KeyType {
        self.inner().key_type()
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        self.inner().raw()
    }
}

impl PubKey for PublicKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        self.inner().verify(data, signature)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_type().hash(state);
        self.raw().ok().hash(state);
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(key: RsaPublicKey) -> Self {
        Self::Rsa(key)
    }
}

impl From<Ed25519PublicKey> for PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        Self::Ed25519(key)
    }
}

impl From<Secp256k1PublicKey> for PublicKey {
    fn from(key: Secp256k1PublicKey) -> Self {
        Self::Secp256k1(key)
    }
}

impl From<EcdsaPublicKey> for PublicKey {
    fn from(key: EcdsaPublicKey) -> Self {
        Self::Ecdsa(key)
    }
}

/// KeyPair associates a private key with its public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private: PrivateKey,
    pub public: PublicKey,
}

impl KeyPair {
    /// from_private rebuilds a pair by deriving the public half.
    pub fn from_private(private: impl Into<PrivateKey>) -> Self {
        let private = private.into();
        let public = private.public_key();
        Self { private, public }
    }

    pub fn key_type(&self) -> KeyType {
        self.private.key_type()
    }

    pub fn into_parts(self) -> (PrivateKey, PublicKey) {
        (self.private, self.public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_type_tags_match_wire_values() {
        assert_eq!(KeyType::Rsa as i32, 0);
        assert_eq!(KeyType::Ed25519 as i32, 1);
        assert_eq!(KeyType::Secp256k1 as i32, 2);
        assert_eq!(KeyType::Ecdsa as i32, 3);
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        assert!(matches!(
            KeyType::from_tag(4),
            Err(KeyError::UnsupportedKeyType(_))
        ));
        assert!(matches!(
            KeyType::from_tag(-1),
            Err(KeyError::UnsupportedKeyType(_))
        ));
        assert_eq!(KeyType::from_tag(3), Ok(KeyType::Ecdsa));
    }

    #[test]
    fn key_type_parses_names() {
        assert_eq!("ecdsa".parse::<KeyType>(), Ok(KeyType::Ecdsa));
        assert_eq!("Ed25519".parse::<KeyType>(), Ok(KeyType::Ed25519));
        assert_eq!(KeyType::Secp256k1.to_string(), "Secp256k1");
        assert!(matches!(
            "dsa".parse::<KeyType>(),
            Err(KeyError::UnsupportedKeyType(_))
        ));
    }
}
