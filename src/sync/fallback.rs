//! Fallback merge for localized wording documents.
//!
//! The merge layers up to three sources per key: the freshly decoded raw
//! document, the previously cached localized document, and the complete
//! default-locale document. Precedence per key is raw, then previous (only
//! when the locale is not the default itself), then default. A key left
//! unresolved after merging against a complete default indicates an
//! incomplete default document, which is an invariant violation.

use crate::wording::Wording;

/// Merge a raw document with its fallback layers.
///
/// The previous localized layer is skipped for the default locale: the
/// default never falls back to itself, it only absorbs the complete default
/// layer (a no-op when `raw` came from the default's own source).
///
/// Merging is idempotent: a document that already has every key passes
/// through unchanged regardless of the fallback layers.
pub fn merge<W: Wording>(
    raw: W,
    previous_localized: Option<&W>,
    default_complete: Option<&W>,
    is_default_locale: bool,
) -> W {
    let mut merged = raw;

    if !is_default_locale {
        if let Some(previous) = previous_localized {
            merged.mutate_using_fallback(previous);
        }
    }
    if let Some(default) = default_complete {
        merged.mutate_using_fallback(default);
    }

    merged
}

/// Key-paths present in `reference` but unresolved in `document`.
///
/// Non-empty output after merging against a complete default document means
/// the default itself is missing leaves; callers surface that loudly.
pub fn missing_keys<W: Wording>(document: &W, reference: &W) -> Vec<String> {
    let resolved = document.entries();
    reference
        .entries()
        .into_keys()
        .filter(|key_path| !resolved.contains_key(key_path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wording::Document;

    fn doc(entries: &[(&str, &str)]) -> Document {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_per_key_precedence() {
        let merged = merge(
            doc(&[("a", "1")]),
            Some(&doc(&[("a", "old"), ("b", "2")])),
            Some(&doc(&[("a", "x"), ("b", "y"), ("c", "z")])),
            false,
        );
        assert_eq!(merged, doc(&[("a", "1"), ("b", "2"), ("c", "z")]));
    }

    #[test]
    fn test_complete_document_passes_through() {
        let complete = doc(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let merged = merge(
            complete.clone(),
            Some(&doc(&[("a", "p"), ("b", "q"), ("c", "r")])),
            Some(&doc(&[("a", "x"), ("b", "y"), ("c", "z")])),
            false,
        );
        assert_eq!(merged, complete);
    }

    #[test]
    fn test_default_locale_skips_previous_layer() {
        let merged = merge(
            doc(&[("a", "1")]),
            Some(&doc(&[("b", "stale")])),
            None,
            true,
        );
        assert_eq!(merged, doc(&[("a", "1")]));
    }

    #[test]
    fn test_missing_keys_against_reference() {
        let document = doc(&[("a", "1")]);
        let reference = doc(&[("a", "x"), ("b", "y")]);
        assert_eq!(missing_keys(&document, &reference), vec!["b".to_string()]);
        assert!(missing_keys(&reference, &document).is_empty());
    }
}
