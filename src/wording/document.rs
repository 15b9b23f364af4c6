//! Flattened wording document.
//!
//! [`Document`] stores the resolved mapping of dotted key-paths to leaf
//! strings for one locale. Decoding flattens the nested YAML tree into that
//! representation; encoding rebuilds the nested tree with sorted keys so the
//! persisted files are stable and diffable.
//!
//! Flattening is a plain recursive walk. Depth is bounded by the authored
//! schema, which is a build-time artifact, so there is no unbounded recursion
//! from untrusted input.

use super::Wording;
use super::codec::CodecError;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Resolved mapping of dotted key-paths to leaf strings for one locale.
///
/// Documents are immutable values from the cache's point of view: merging
/// produces a new document and the store replaces entries wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: BTreeMap<String, String>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a leaf by its dotted key-path.
    pub fn get(&self, key_path: &str) -> Option<&str> {
        self.entries.get(key_path).map(String::as_str)
    }

    /// Set a leaf, replacing any previous value at the same key-path.
    pub fn insert(&mut self, key_path: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key_path.into(), value.into());
    }

    /// Number of set leaves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no set leaves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a document by flattening a parsed nested YAML value.
    pub fn from_yaml_value(value: &Value) -> Result<Self, CodecError> {
        let mut entries = BTreeMap::new();
        match value {
            // An empty file decodes to null; treat it as an empty document.
            Value::Null => {}
            Value::Mapping(mapping) => flatten_mapping(mapping, None, &mut entries),
            Value::Bool(_) => return Err(CodecError::UnexpectedRoot("bool")),
            Value::Number(_) => return Err(CodecError::UnexpectedRoot("number")),
            Value::String(_) => return Err(CodecError::UnexpectedRoot("string")),
            Value::Sequence(_) => return Err(CodecError::UnexpectedRoot("sequence")),
            Value::Tagged(_) => return Err(CodecError::UnexpectedRoot("tagged value")),
        }
        Ok(Self { entries })
    }

    /// Rebuild the nested YAML tree from the flattened entries.
    ///
    /// `BTreeMap` iteration order makes the result canonical: keys come out
    /// sorted at every nesting level.
    fn to_yaml_value(&self) -> Value {
        let mut root = Mapping::new();
        for (key_path, leaf) in &self.entries {
            let segments: Vec<&str> = key_path.split('.').collect();
            insert_nested(&mut root, &segments, leaf);
        }
        Value::Mapping(root)
    }
}

impl Wording for Document {
    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let value: Value = serde_yaml::from_slice(bytes)?;
        Self::from_yaml_value(&value)
    }

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(serde_yaml::to_string(&self.to_yaml_value())?.into_bytes())
    }

    fn mutate_using_fallback(&mut self, fallback: &Self) {
        for (key_path, leaf) in &fallback.entries {
            self.entries
                .entry(key_path.clone())
                .or_insert_with(|| leaf.clone());
        }
    }

    fn entries(&self) -> BTreeMap<String, String> {
        self.entries.clone()
    }
}

impl From<BTreeMap<String, String>> for Document {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn flatten_mapping(mapping: &Mapping, prefix: Option<&str>, out: &mut BTreeMap<String, String>) {
    for (key, value) in mapping {
        let Some(segment) = scalar_to_string(key) else {
            continue;
        };
        let key_path = match prefix {
            Some(prefix) => format!("{prefix}.{segment}"),
            None => segment,
        };
        flatten_value(value, &key_path, out);
    }
}

fn flatten_value(value: &Value, key_path: &str, out: &mut BTreeMap<String, String>) {
    match value {
        // A null leaf is an unset key, to be filled by fallback later.
        Value::Null => {}
        Value::Mapping(mapping) => flatten_mapping(mapping, Some(key_path), out),
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(item, &format!("{key_path}.{index}"), out);
            }
        }
        Value::Tagged(tagged) => flatten_value(&tagged.value, key_path, out),
        scalar => {
            if let Some(leaf) = scalar_to_string(scalar) {
                out.insert(key_path.to_string(), leaf);
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Insert a leaf into the nested tree, creating intermediate mappings.
///
/// When two key-paths conflict (a leaf at `a` and another at `a.b`) the deeper
/// entry wins deterministically: scalars give way to mappings, and a leaf is
/// not written over an existing mapping.
fn insert_nested(root: &mut Mapping, segments: &[&str], leaf: &str) {
    let [segment, rest @ ..] = segments else {
        return;
    };
    let key = Value::String(segment.to_string());

    if rest.is_empty() {
        if !matches!(root.get(&key), Some(Value::Mapping(_))) {
            root.insert(key, Value::String(leaf.to_string()));
        }
        return;
    }

    if !matches!(root.get(&key), Some(Value::Mapping(_))) {
        root.insert(key.clone(), Value::Mapping(Mapping::new()));
    }
    if let Some(Value::Mapping(child)) = root.get_mut(&key) {
        insert_nested(child, rest, leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_flattens_nested_tree() {
        let bytes = b"greeting: Hello\nmenu:\n  file:\n    open: Open\n    close: Close\n";
        let doc = Document::decode(bytes).unwrap();
        assert_eq!(doc.get("greeting"), Some("Hello"));
        assert_eq!(doc.get("menu.file.open"), Some("Open"));
        assert_eq!(doc.get("menu.file.close"), Some("Close"));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_null_leaves_are_unset() {
        let doc = Document::decode(b"greeting:\nfarewell: Bye\n").unwrap();
        assert_eq!(doc.get("greeting"), None);
        assert_eq!(doc.get("farewell"), Some("Bye"));
    }

    #[test]
    fn test_empty_input_is_empty_document() {
        assert!(Document::decode(b"").unwrap().is_empty());
        assert!(Document::decode(b"{}").unwrap().is_empty());
    }

    #[test]
    fn test_non_mapping_root_is_rejected() {
        assert!(matches!(
            Document::decode(b"just a string"),
            Err(CodecError::UnexpectedRoot("string"))
        ));
    }

    #[test]
    fn test_encode_round_trips_flattened_view() {
        let doc: Document = [
            ("menu.file.open", "Open"),
            ("menu.edit.undo", "Undo"),
            ("greeting", "Hello"),
        ]
        .into_iter()
        .collect();
        let encoded = doc.encode().unwrap();
        let decoded = Document::decode(&encoded).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_encode_is_canonical() {
        let a: Document = [("b", "2"), ("a", "1")].into_iter().collect();
        let b: Document = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
    }

    #[test]
    fn test_fallback_fills_only_unset_leaves() {
        let mut doc: Document = [("a", "1")].into_iter().collect();
        let fallback: Document = [("a", "x"), ("b", "y")].into_iter().collect();
        doc.mutate_using_fallback(&fallback);
        assert_eq!(doc.get("a"), Some("1"));
        assert_eq!(doc.get("b"), Some("y"));
    }

    #[test]
    fn test_sequences_flatten_by_index() {
        let doc = Document::decode(b"steps:\n  - First\n  - Second\n").unwrap();
        assert_eq!(doc.get("steps.0"), Some("First"));
        assert_eq!(doc.get("steps.1"), Some("Second"));
    }
}
