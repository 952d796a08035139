//! RSA with PKCS#1 v1.5 signatures over SHA-256.
//!
//! Private keys encode as PKCS#1 DER, public keys as SubjectPublicKeyInfo DER.

use std::fmt;

use rand::{CryptoRng, RngCore};
use rsa::pkcs1::der::Decode;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, ALGORITHM_OID};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::spki::SubjectPublicKeyInfoRef;
use rsa::pkcs8::EncodePublicKey;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey as InnerPrivateKey, RsaPublicKey as InnerPublicKey};
use sha2::Sha256;
use tracing::warn;

use crate::config::KeyConfig;
use crate::errors::KeyError;
use crate::key::{Key, KeyPair, PrivKey, PubKey, PublicKey};
use crate::keys::random_secret;
use crate::pb::KeyType;

/// RsaPrivateKey wraps an RSA private key.
#[derive(Clone)]
pub struct RsaPrivateKey {
    key: InnerPrivateKey,
}

impl RsaPrivateKey {
    /// bits returns the modulus size.
    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }
}

impl Key for RsaPrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Rsa
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        let document = self.key.to_pkcs1_der().map_err(KeyError::encoding)?;
        Ok(document.as_bytes().to_vec())
    }
}

impl PrivKey for RsaPrivateKey {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyError> {
        let signing_key = SigningKey::<Sha256>::new(self.key.clone());
        let signature = signing_key
            .try_sign(data)
            .map_err(|err| KeyError::Signing(err.to_string()))?;
        Ok(signature.to_vec())
    }

    fn public_key(&self) -> PublicKey {
        PublicKey::Rsa(RsaPublicKey {
            key: self.key.to_public_key(),
        })
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

/// RsaPublicKey wraps an RSA public key.
#[derive(Debug, Clone)]
pub struct RsaPublicKey {
    key: InnerPublicKey,
}

impl RsaPublicKey {
    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }
}

impl Key for RsaPublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Rsa
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        let document = self.key.to_public_key_der().map_err(KeyError::encoding)?;
        Ok(document.as_bytes().to_vec())
    }
}

impl PubKey for RsaPublicKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        if signature.len() != self.key.size() {
            return Err(KeyError::MalformedSignature(format!(
                "rsa signature must be {} bytes, got {}",
                self.key.size(),
                signature.len()
            )));
        }

        let signature = Signature::try_from(signature)
            .map_err(|err| KeyError::MalformedSignature(err.to_string()))?;
        let verifying_key = VerifyingKey::<Sha256>::new(self.key.clone());
        Ok(verifying_key.verify(data, &signature).is_ok())
    }
}

/// generate_key_pair creates an RSA key with a modulus of `bits`, or of the
/// configured default when `bits` is zero.
pub fn generate_key_pair<R: RngCore + CryptoRng>(
    rng: &mut R,
    bits: usize,
    config: &KeyConfig,
) -> Result<KeyPair, KeyError> {
    let bits = if bits == 0 {
        config.default_rsa_bits
    } else {
        bits
    };
    config.check_rsa_bits(bits)?;

    // Prime search draws through the infallible RngCore methods.
    random_secret(rng)?;
    let key = InnerPrivateKey::new(rng, bits)
        .map_err(|err| KeyError::KeyGeneration(err.to_string()))?;
    Ok(KeyPair::from_private(RsaPrivateKey { key }))
}

/// unmarshal_private_key decodes and validates a PKCS#1 DER private key.
pub fn unmarshal_private_key(
    bytes: &[u8],
    config: &KeyConfig,
) -> Result<RsaPrivateKey, KeyError> {
    let key = InnerPrivateKey::from_pkcs1_der(bytes).map_err(KeyError::key_format)?;
    key.validate().map_err(|err| {
        warn!(error = %err, "rejected rsa private key");
        KeyError::key_format(err)
    })?;

    let key = RsaPrivateKey { key };
    config.check_rsa_bits(key.bits())?;
    Ok(key)
}

/// unmarshal_public_key decodes a SubjectPublicKeyInfo DER public key.
pub fn unmarshal_public_key(bytes: &[u8], config: &KeyConfig) -> Result<RsaPublicKey, KeyError> {
    let info = SubjectPublicKeyInfoRef::try_from(bytes).map_err(KeyError::key_format)?;
    if info.algorithm.oid != ALGORITHM_OID {
        return Err(KeyError::InvalidFormat(format!(
            "expected an rsa key, got algorithm {}",
            info.algorithm.oid
        )));
    }

    // The SPKI conversion caps moduli at 4096 bits; the configured bound applies instead.
    let body = rsa::pkcs1::RsaPublicKey::from_der(info.subject_public_key.raw_bytes())
        .map_err(KeyError::key_format)?;
    let modulus = body.modulus.as_bytes();
    config.check_rsa_bits(modulus.len() * 8)?;

    let key = InnerPublicKey::new_with_max_size(
        BigUint::from_bytes_be(modulus),
        BigUint::from_bytes_be(body.public_exponent.as_bytes()),
        config.max_rsa_bits,
    )
    .map_err(KeyError::key_format)?;
    Ok(RsaPublicKey { key })
}
