//! Ephemeral P-256 key agreement for session setup.

use p256::ecdh::EphemeralSecret;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::errors::KeyError;

/// EphemeralKeyPair is a single-use Diffie-Hellman key.
pub struct EphemeralKeyPair {
    secret: EphemeralSecret,
    public: Vec<u8>,
}

impl EphemeralKeyPair {
    pub fn generate() -> Self {
        Self::generate_with_rng(&mut OsRng)
    }

    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let secret = EphemeralSecret::random(rng);
        let public = secret.public_key().to_encoded_point(false).as_bytes().to_vec();
        Self { secret, public }
    }

    /// public_key returns the uncompressed SEC1 point to send to the peer.
    pub fn public_key(&self) -> &[u8] {
        &self.public
    }

    /// shared_secret derives the x-coordinate of the shared point.
    pub fn shared_secret(&self, peer_public: &[u8]) -> Result<Vec<u8>, KeyError> {
        let peer = p256::PublicKey::from_sec1_bytes(peer_public).map_err(KeyError::key_format)?;
        let shared = self.secret.diffie_hellman(&peer);
        Ok(shared.raw_secret_bytes().to_vec())
    }
}
