//! Wire records for tagged keys.
//!
//! Mirrors `crypto.proto`:
//!
//! ```protobuf
//! enum KeyType { RSA = 0; Ed25519 = 1; Secp256k1 = 2; ECDSA = 3; }
//! message PublicKey  { required KeyType Type = 1; required bytes Data = 2; }
//! message PrivateKey { required KeyType Type = 1; required bytes Data = 2; }
//! ```

/// PublicKey is the serialized form of a public key.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct PublicKey {
    #[prost(enumeration = "KeyType", required, tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", required, tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

/// PrivateKey is the serialized form of a private key.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct PrivateKey {
    #[prost(enumeration = "KeyType", required, tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", required, tag = "2")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}

/// KeyType tags the algorithm of a serialized key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum KeyType {
    Rsa = 0,
    Ed25519 = 1,
    Secp256k1 = 2,
    Ecdsa = 3,
}

impl KeyType {
    /// All supported key types, in tag order.
    pub const ALL: [KeyType; 4] = [
        KeyType::Rsa,
        KeyType::Ed25519,
        KeyType::Secp256k1,
        KeyType::Ecdsa,
    ];

    /// String value of the enum field names used in the ProtoBuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            KeyType::Rsa => "RSA",
            KeyType::Ed25519 => "Ed25519",
            KeyType::Secp256k1 => "Secp256k1",
            KeyType::Ecdsa => "ECDSA",
        }
    }

    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "RSA" => Some(Self::Rsa),
            "Ed25519" => Some(Self::Ed25519),
            "Secp256k1" => Some(Self::Secp256k1),
            "ECDSA" => Some(Self::Ecdsa),
            _ => None,
        }
    }
}
