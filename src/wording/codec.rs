//! YAML wire codec for wording documents.
//!
//! The wire format is a nested key/value YAML tree. The only hard requirements
//! are a lossless round-trip of the flattened key-path mapping and stable
//! re-encoding, so persisted files stay diffable across refreshes.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors produced while decoding or encoding wording documents.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Document root must be a mapping, found {0}")]
    UnexpectedRoot(&'static str),
}

/// Decode a typed schema value from YAML wire bytes.
pub fn decode_yaml<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    Ok(serde_yaml::from_slice(bytes)?)
}

/// Encode a typed schema value to YAML wire bytes.
///
/// Key ordering follows the value's serialization order; map-backed types
/// should use `BTreeMap` so re-encoding is canonical.
pub fn encode_yaml<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    Ok(serde_yaml::to_string(value)?.into_bytes())
}
