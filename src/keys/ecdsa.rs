//! ECDSA over NIST P-256 with SHA-256.
//!
//! Private keys encode as PKCS#8 DER, public keys as SubjectPublicKeyInfo DER,
//! signatures as DER `SEQUENCE { r INTEGER, s INTEGER }`.

use std::fmt;

use p256::ecdsa::signature::{RandomizedSigner, Verifier};
use p256::ecdsa::{DerSignature, Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::ALGORITHM_OID;
use p256::pkcs8::spki::SubjectPublicKeyInfoRef;
use p256::pkcs8::{
    AlgorithmIdentifierRef, AssociatedOid, EncodePrivateKey, EncodePublicKey, PrivateKeyInfo,
};
use p256::{NistP256, SecretKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::warn;

use crate::errors::KeyError;
use crate::key::{Key, KeyPair, PrivKey, PubKey, PublicKey};
use crate::keys::random_scalar;
use crate::pb::KeyType;

/// EcdsaPrivateKey is a P-256 secret scalar.
#[derive(Clone)]
pub struct EcdsaPrivateKey {
    secret: SecretKey,
}

impl EcdsaPrivateKey {
    /// derive_public_key computes q = d·G.
    pub fn derive_public_key(&self) -> EcdsaPublicKey {
        EcdsaPublicKey {
            key: self.secret.public_key(),
        }
    }
}

impl Key for EcdsaPrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ecdsa
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        let document = self.secret.to_pkcs8_der().map_err(KeyError::encoding)?;
        Ok(document.as_bytes().to_vec())
    }
}

impl PrivKey for EcdsaPrivateKey {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyError> {
        let signing_key = SigningKey::from(&self.secret);
        let signature: Signature = signing_key
            .try_sign_with_rng(&mut OsRng, data)
            .map_err(|err| KeyError::Signing(err.to_string()))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn public_key(&self) -> PublicKey {
        PublicKey::Ecdsa(self.derive_public_key())
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey").finish_non_exhaustive()
    }
}

/// EcdsaPublicKey is a P-256 curve point.
#[derive(Debug, Clone)]
pub struct EcdsaPublicKey {
    key: p256::PublicKey,
}

impl Key for EcdsaPublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ecdsa
    }

    fn raw(&self) -> Result<Vec<u8>, KeyError> {
        let document = self.key.to_public_key_der().map_err(KeyError::encoding)?;
        Ok(document.as_bytes().to_vec())
    }
}

impl PubKey for EcdsaPublicKey {
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool, KeyError> {
        let der = DerSignature::try_from(signature)
            .map_err(|err| KeyError::MalformedSignature(err.to_string()))?;
        // Zero or out-of-range scalars parse as DER but never verify.
        let Ok(signature) = Signature::try_from(der) else {
            return Ok(false);
        };

        Ok(VerifyingKey::from(&self.key).verify(data, &signature).is_ok())
    }
}

/// generate_key_pair samples a fresh P-256 key pair.
pub fn generate_key_pair<R: RngCore + CryptoRng>(rng: &mut R) -> Result<KeyPair, KeyError> {
    let secret = random_scalar(rng, SecretKey::from_slice)?;
    Ok(KeyPair::from_private(EcdsaPrivateKey { secret }))
}

/// unmarshal_private_key decodes a PKCS#8 DER private key.
pub fn unmarshal_private_key(bytes: &[u8]) -> Result<EcdsaPrivateKey, KeyError> {
    let info = PrivateKeyInfo::try_from(bytes).map_err(KeyError::key_format)?;
    check_algorithm(&info.algorithm)?;

    let secret = SecretKey::try_from(info).map_err(|err| {
        warn!(error = %err, "rejected ecdsa private key");
        KeyError::key_format(err)
    })?;
    Ok(EcdsaPrivateKey { secret })
}

/// unmarshal_public_key decodes a SubjectPublicKeyInfo DER public key.
pub fn unmarshal_public_key(bytes: &[u8]) -> Result<EcdsaPublicKey, KeyError> {
    let info = SubjectPublicKeyInfoRef::try_from(bytes).map_err(KeyError::key_format)?;
    check_algorithm(&info.algorithm)?;

    let key = p256::PublicKey::try_from(info).map_err(|err| {
        warn!(error = %err, "rejected ecdsa public key");
        KeyError::key_format(err)
    })?;
    Ok(EcdsaPublicKey { key })
}

fn check_algorithm(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<(), KeyError> {
    if algorithm.oid != ALGORITHM_OID {
        return Err(KeyError::InvalidFormat(format!(
            "expected an ec key, got algorithm {}",
            algorithm.oid
        )));
    }

    match algorithm.parameters_oid() {
        Ok(curve) if curve == NistP256::OID => Ok(()),
        Ok(curve) => Err(KeyError::InvalidFormat(format!(
            "expected curve P-256, got {curve}"
        ))),
        Err(err) => Err(KeyError::key_format(err)),
    }
}
