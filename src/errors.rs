use thiserror::Error;

/// KeyError reports key generation, encoding and signing failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),
    #[error("malformed key: {0}")]
    KeyFormat(String),
    #[error("unexpected key encoding: {0}")]
    InvalidFormat(String),
    #[error("key generation failed: {0}")]
    KeyGeneration(String),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
    #[error("key encoding failed: {0}")]
    Encoding(String),
    #[error("invalid rsa key size {bits}: must be between {min} and {max} bits")]
    InvalidKeySize { bits: usize, min: usize, max: usize },
}

impl KeyError {
    pub(crate) fn key_format(err: impl std::fmt::Display) -> Self {
        Self::KeyFormat(err.to_string())
    }

    pub(crate) fn encoding(err: impl std::fmt::Display) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// ConfigError reports invalid key configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse key config: {0}")]
    Parse(#[source] toml::de::Error),
    #[error("invalid rsa bounds: min {min} max {max}")]
    InvalidRsaBounds { min: usize, max: usize },
    #[error("default rsa size {bits} outside bounds {min}..={max}")]
    InvalidDefaultRsaBits { bits: usize, min: usize, max: usize },
}
