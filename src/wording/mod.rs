//! Wording documents and their wire codec.
//!
//! A wording document maps dotted key-paths to leaf strings; it is the unit of
//! storage, merging, and notification throughout the crate. The [`Wording`]
//! trait is the capability contract a schema type must satisfy:
//!
//! - decode from / encode to the YAML wire format,
//! - fill its own unset leaves from a fallback document, recursively,
//! - expose a flattened key-path view for completeness checks.
//!
//! [`Document`] is the reference implementation, backed directly by the
//! flattened representation. Applications with a generated typed schema can
//! implement [`Wording`] for it instead; the sync pipeline is generic over the
//! trait and never inspects documents beyond the flattened view.

/// YAML wire codec helpers and codec errors
pub mod codec;
/// Flattened document value type
pub mod document;

pub use codec::CodecError;
pub use document::Document;

use std::collections::BTreeMap;

/// Capability contract for a localized wording document.
pub trait Wording: Clone + PartialEq + Send + Sync + 'static {
    /// Decode a document from wire bytes.
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>
    where
        Self: Sized;

    /// Encode the document to wire bytes with canonical key ordering.
    fn encode(&self) -> Result<Vec<u8>, CodecError>;

    /// Fill only this document's unset leaves from the corresponding leaves of
    /// `fallback`, recursively through nested structure. Leaves that are
    /// already set are never overwritten.
    fn mutate_using_fallback(&mut self, fallback: &Self);

    /// The flattened key-path view of all set leaves.
    fn entries(&self) -> BTreeMap<String, String>;
}
