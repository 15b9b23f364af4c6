//! In-memory per-locale wording cache.

use crate::locale::Locale;
use crate::wording::Wording;
use std::collections::HashMap;
use std::sync::RwLock;

/// Mapping of locale to resolved wording document.
///
/// Reads are concurrent; writes are serialized by construction (bootstrap
/// runs alone before the manager is handed out, and refresh is a single
/// sequential task). Entries are replaced wholesale, never patched in place.
///
/// After bootstrap the default locale holds a complete document and every
/// other stored entry is complete transitively, so [`resolve`] never needs
/// its default branch in correct operation; it exists as a safety net.
///
/// [`resolve`]: WordingStore::resolve
#[derive(Debug)]
pub struct WordingStore<W> {
    cache: RwLock<HashMap<Locale, W>>,
}

impl<W> Default for WordingStore<W> {
    fn default() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }
}

impl<W: Wording> WordingStore<W> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The cached document for `locale`, if any.
    pub fn get(&self, locale: &Locale) -> Option<W> {
        self.cache.read().unwrap().get(locale).cloned()
    }

    /// Replace the cached document for `locale`.
    pub fn insert(&self, locale: Locale, document: W) {
        self.cache.write().unwrap().insert(locale, document);
    }

    /// The cached document for `locale`, falling back to the default locale's
    /// entry when the locale has none.
    pub fn resolve(&self, locale: &Locale, default: &Locale) -> Option<W> {
        let cache = self.cache.read().unwrap();
        cache.get(locale).or_else(|| cache.get(default)).cloned()
    }

    /// Locales with a cached entry.
    pub fn locales(&self) -> Vec<Locale> {
        self.cache.read().unwrap().keys().cloned().collect()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.read().unwrap().len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.cache.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wording::Document;

    #[test]
    fn test_resolve_falls_back_to_default_entry() {
        let store = WordingStore::new();
        let en = Locale::from("en");
        let fr = Locale::from("fr");
        let doc: Document = [("greeting", "Hello")].into_iter().collect();
        store.insert(en.clone(), doc.clone());

        assert_eq!(store.resolve(&fr, &en), Some(doc.clone()));
        assert_eq!(store.get(&fr), None);

        let localized: Document = [("greeting", "Bonjour")].into_iter().collect();
        store.insert(fr.clone(), localized.clone());
        assert_eq!(store.resolve(&fr, &en), Some(localized));
    }

    #[test]
    fn test_insert_replaces_wholesale() {
        let store = WordingStore::new();
        let en = Locale::from("en");
        store.insert(
            en.clone(),
            [("a", "1"), ("b", "2")].into_iter().collect::<Document>(),
        );
        let replacement: Document = [("a", "3")].into_iter().collect();
        store.insert(en.clone(), replacement.clone());
        assert_eq!(store.get(&en), Some(replacement));
        assert_eq!(store.len(), 1);
    }
}
