//! Typed key pairs for peer identities.
//!
//! Keys of every supported algorithm share the [`Key`], [`PrivKey`] and
//! [`PubKey`] capabilities and marshal to a single tagged wire record.

mod config;
pub mod ecdh;
mod errors;
mod factory;
mod key;
pub mod keys;
mod marshal;
pub mod pb;

pub use config::KeyConfig;
pub use errors::{ConfigError, KeyError};
pub use factory::{generate_key_pair, KeyFactory};
pub use key::{Key, KeyPair, PrivKey, PrivateKey, PubKey, PublicKey};
pub use marshal::{
    config_decode_key, config_encode_key, marshal_private_key, marshal_public_key,
    public_key_from_proto, public_key_to_proto, unmarshal_private_key, unmarshal_public_key,
};
pub use pb::KeyType;
