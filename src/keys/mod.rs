//! Algorithm implementations behind [`crate::PrivateKey`] and [`crate::PublicKey`].

pub mod ecdsa;
pub mod ed25519;
pub mod rsa;
pub mod secp256k1;

pub use self::ecdsa::{EcdsaPrivateKey, EcdsaPublicKey};
pub use self::ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
pub use self::rsa::{RsaPrivateKey, RsaPublicKey};
pub use self::secp256k1::{Secp256k1PrivateKey, Secp256k1PublicKey};

use rand::{CryptoRng, RngCore};

use crate::errors::KeyError;

/// Draws for a curve scalar before giving up. A uniformly random 32-byte
/// string is out of range for P-256 or secp256k1 with probability below 2^-32.
const SCALAR_ATTEMPTS: usize = 8;

/// random_secret fills 32 bytes from rng, surfacing source failures instead of panicking.
pub(crate) fn random_secret<R: RngCore + CryptoRng>(rng: &mut R) -> Result<[u8; 32], KeyError> {
    let mut secret = [0u8; 32];
    rng.try_fill_bytes(&mut secret)
        .map_err(|err| KeyError::KeyGeneration(err.to_string()))?;
    Ok(secret)
}

/// random_scalar samples bytes until `parse` accepts them as a curve scalar.
pub(crate) fn random_scalar<R, T, E>(
    rng: &mut R,
    parse: impl Fn(&[u8]) -> Result<T, E>,
) -> Result<T, KeyError>
where
    R: RngCore + CryptoRng,
{
    for _ in 0..SCALAR_ATTEMPTS {
        let candidate = random_secret(rng)?;
        if let Ok(scalar) = parse(&candidate) {
            return Ok(scalar);
        }
    }

    Err(KeyError::KeyGeneration(
        "random source produced no valid scalar".to_string(),
    ))
}
