//! Type-tagged key records.
//!
//! A marshalled key is a protobuf record holding the [`KeyType`] tag (field 1)
//! followed by the algorithm's raw encoding (field 2).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use prost::Message;
use tracing::warn;

use crate::errors::KeyError;
use crate::factory::KeyFactory;
use crate::key::{Key, PrivateKey, PublicKey};
use crate::pb;
use crate::pb::KeyType;

impl KeyFactory {
    /// unmarshal_private_key decodes a tagged private key record.
    pub fn unmarshal_private_key(&self, bytes: &[u8]) -> Result<PrivateKey, KeyError> {
        let record = pb::PrivateKey::decode(bytes).map_err(KeyError::key_format)?;
        let key_type = KeyType::from_tag(record.r#type)?;
        self.private_key_from_raw(key_type, &record.data)
            .map_err(|err| tag_mismatch(key_type, err))
    }

    /// unmarshal_public_key decodes a tagged public key record.
    pub fn unmarshal_public_key(&self, bytes: &[u8]) -> Result<PublicKey, KeyError> {
        let record = pb::PublicKey::decode(bytes).map_err(KeyError::key_format)?;
        self.public_key_from_proto(&record)
    }

    /// public_key_from_proto converts an embedded public key record.
    pub fn public_key_from_proto(&self, record: &pb::PublicKey) -> Result<PublicKey, KeyError> {
        let key_type = KeyType::from_tag(record.r#type)?;
        self.public_key_from_raw(key_type, &record.data)
            .map_err(|err| tag_mismatch(key_type, err))
    }
}

/// A body that belongs to a different algorithm than its tag is malformed
/// from the record's point of view.
fn tag_mismatch(key_type: KeyType, err: KeyError) -> KeyError {
    match err {
        KeyError::InvalidFormat(reason) => {
            warn!(%key_type, %reason, "key record body does not match its tag");
            KeyError::KeyFormat(format!("{key_type} record: {reason}"))
        }
        other => other,
    }
}

/// marshal_private_key encodes a private key as a tagged record.
pub fn marshal_private_key(key: &PrivateKey) -> Result<Vec<u8>, KeyError> {
    let record = pb::PrivateKey {
        r#type: key.key_type() as i32,
        data: key.raw()?,
    };
    encode_proto(&record)
}

/// marshal_public_key encodes a public key as a tagged record.
pub fn marshal_public_key(key: &PublicKey) -> Result<Vec<u8>, KeyError> {
    encode_proto(&public_key_to_proto(key)?)
}

/// public_key_to_proto builds the record for embedding in other messages.
pub fn public_key_to_proto(key: &PublicKey) -> Result<pb::PublicKey, KeyError> {
    Ok(pb::PublicKey {
        r#type: key.key_type() as i32,
        data: key.raw()?,
    })
}

/// public_key_from_proto converts a record using the default configuration.
pub fn public_key_from_proto(record: &pb::PublicKey) -> Result<PublicKey, KeyError> {
    KeyFactory::default().public_key_from_proto(record)
}

/// unmarshal_private_key decodes a tagged record using the default configuration.
pub fn unmarshal_private_key(bytes: &[u8]) -> Result<PrivateKey, KeyError> {
    KeyFactory::default().unmarshal_private_key(bytes)
}

/// unmarshal_public_key decodes a tagged record using the default configuration.
pub fn unmarshal_public_key(bytes: &[u8]) -> Result<PublicKey, KeyError> {
    KeyFactory::default().unmarshal_public_key(bytes)
}

/// config_encode_key renders marshalled key bytes for text configuration files.
pub fn config_encode_key(marshalled: &[u8]) -> String {
    STANDARD.encode(marshalled)
}

/// config_decode_key reverses [`config_encode_key`].
pub fn config_decode_key(encoded: &str) -> Result<Vec<u8>, KeyError> {
    STANDARD
        .decode(encoded.trim().as_bytes())
        .map_err(KeyError::key_format)
}

fn encode_proto<M: Message>(message: &M) -> Result<Vec<u8>, KeyError> {
    let mut buf = Vec::with_capacity(message.encoded_len());
    message.encode(&mut buf).map_err(KeyError::encoding)?;
    Ok(buf)
}
