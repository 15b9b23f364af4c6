//! Initial cache population from bundled and persisted wording.
//!
//! Bootstrap runs synchronously at manager construction and walks the
//! supported locales default-first, so every later locale can fill gaps from
//! the already-complete default entry. Per locale it loads the required
//! bundled document, overlays the optional persisted document when one
//! decodes cleanly, merges through the fallback layers, and stores the result.
//!
//! A bundled document that is missing or corrupt is a structural defect: the
//! locale is logged and skipped (it stays unavailable until the package is
//! corrected) and debug builds trip an assertion, but the remaining locales
//! still bootstrap.

use super::{WordingSyncError, fallback, sequencer};
use crate::locale::{Locale, LocaleSet};
use crate::provider::WordingProvider;
use crate::sync::store::WordingStore;
use crate::wording::Wording;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Populates the wording store before the manager is handed out.
pub struct BootstrapLoader<'a, P> {
    provider: &'a P,
    locales: &'a LocaleSet,
}

impl<'a, P: WordingProvider> BootstrapLoader<'a, P> {
    pub fn new(provider: &'a P, locales: &'a LocaleSet) -> Self {
        Self { provider, locales }
    }

    /// Populate the store for every supported locale.
    ///
    /// On return every locale whose bundled document decoded has a complete
    /// entry; no lookup through the default locale can observe an absent
    /// entry unless the default's own bundled document failed to decode.
    pub fn run<W: Wording>(&self, store: &WordingStore<W>) {
        let default = self.locales.default_locale();

        for locale in sequencer::prioritized(self.locales, default) {
            let bundled_path = self.provider.bundled_path(&locale);
            let raw: W = match load_document(&bundled_path) {
                Ok(document) => document,
                Err(e) => {
                    error!(
                        "Failed to populate cache with bundled wording for {} localization: {}",
                        locale, e
                    );
                    debug_assert!(
                        false,
                        "bundled wording for {locale} failed to load: {e}"
                    );
                    continue;
                }
            };

            let persisted: Option<W> = match load_document(&self.provider.persisted_path(&locale)) {
                Ok(document) => Some(document),
                Err(e) => {
                    // The overlay is optional, absence or corruption is fine.
                    debug!("No persisted wording for {} localization: {}", locale, e);
                    None
                }
            };

            // The persisted overlay sits on top of the bundled document, so a
            // stale overlay from an older deployment cannot drop bundled keys.
            let base = match persisted {
                Some(mut overlay) => {
                    overlay.mutate_using_fallback(&raw);
                    overlay
                }
                None => raw,
            };

            let is_default = locale == *default;
            let merged = fallback::merge(
                base,
                store.get(&locale).as_ref(),
                store.get(default).as_ref(),
                is_default,
            );

            if let Some(default_entry) = store.get(default) {
                let missing = fallback::missing_keys(&merged, &default_entry);
                if !missing.is_empty() {
                    warn!(
                        "Merged wording for {} localization is missing {} keys: {:?}",
                        locale,
                        missing.len(),
                        missing
                    );
                    debug_assert!(false, "incomplete merge for {locale}: {missing:?}");
                }
            }

            info!(
                "Successfully populated cache with wording for {} localization",
                locale
            );
            store.insert(locale, merged);
        }
    }
}

/// Read and decode a wording document from a file.
fn load_document<W: Wording>(path: &Path) -> Result<W, WordingSyncError> {
    let bytes = std::fs::read(path)?;
    Ok(W::decode(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DirectoryProvider;
    use crate::wording::Document;
    use std::fs;
    use tempfile::TempDir;

    fn locales() -> LocaleSet {
        LocaleSet::new([Locale::from("en"), Locale::from("fr")], Locale::from("en"))
    }

    fn write_bundled(dir: &TempDir, locale: &str, content: &str) {
        fs::write(dir.path().join(format!("wording_{locale}.yml")), content).unwrap();
    }

    #[test]
    fn test_gaps_fill_from_default() {
        let bundled = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        write_bundled(&bundled, "en", "greeting: Hello\nfarewell: Bye\n");
        write_bundled(&bundled, "fr", "greeting: Bonjour\n");

        let provider = DirectoryProvider::new(bundled.path(), data.path());
        let locales = locales();
        let store = WordingStore::<Document>::new();
        BootstrapLoader::new(&provider, &locales).run(&store);

        let fr = store.get(&Locale::from("fr")).unwrap();
        assert_eq!(fr.get("greeting"), Some("Bonjour"));
        assert_eq!(fr.get("farewell"), Some("Bye"));
    }

    #[test]
    fn test_persisted_overlay_takes_precedence_over_bundled() {
        let bundled = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        write_bundled(&bundled, "en", "greeting: Hello\n");
        write_bundled(&bundled, "fr", "greeting: Bonjour\n");
        let persisted_dir = data.path().join("wording");
        fs::create_dir_all(&persisted_dir).unwrap();
        fs::write(persisted_dir.join("wording_fr.yml"), "greeting: Salut\n").unwrap();

        let provider = DirectoryProvider::new(bundled.path(), data.path());
        let locales = locales();
        let store = WordingStore::<Document>::new();
        BootstrapLoader::new(&provider, &locales).run(&store);

        let fr = store.get(&Locale::from("fr")).unwrap();
        assert_eq!(fr.get("greeting"), Some("Salut"));
    }

    #[test]
    fn test_stale_persisted_overlay_keeps_bundled_keys() {
        let bundled = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        write_bundled(&bundled, "en", "greeting: Hello\nfarewell: Bye\n");
        write_bundled(&bundled, "fr", "greeting: Bonjour\n");
        let persisted_dir = data.path().join("wording");
        fs::create_dir_all(&persisted_dir).unwrap();
        // Overlay written by an older deployment, before the farewell key
        // existed. The bundled document must still supply it.
        fs::write(persisted_dir.join("wording_en.yml"), "greeting: Howdy\n").unwrap();

        let provider = DirectoryProvider::new(bundled.path(), data.path());
        let locales = locales();
        let store = WordingStore::<Document>::new();
        BootstrapLoader::new(&provider, &locales).run(&store);

        let en = store.get(&Locale::from("en")).unwrap();
        assert_eq!(en.get("greeting"), Some("Howdy"));
        assert_eq!(en.get("farewell"), Some("Bye"));

        // The default entry stayed complete, so fr inherits the new key too.
        let fr = store.get(&Locale::from("fr")).unwrap();
        assert_eq!(fr.get("greeting"), Some("Bonjour"));
        assert_eq!(fr.get("farewell"), Some("Bye"));
    }

    #[test]
    fn test_corrupt_persisted_overlay_is_ignored() {
        let bundled = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        write_bundled(&bundled, "en", "greeting: Hello\n");
        write_bundled(&bundled, "fr", "greeting: Bonjour\n");
        let persisted_dir = data.path().join("wording");
        fs::create_dir_all(&persisted_dir).unwrap();
        fs::write(persisted_dir.join("wording_fr.yml"), "- not\n- a\n- mapping\n").unwrap();

        let provider = DirectoryProvider::new(bundled.path(), data.path());
        let locales = locales();
        let store = WordingStore::<Document>::new();
        BootstrapLoader::new(&provider, &locales).run(&store);

        let fr = store.get(&Locale::from("fr")).unwrap();
        assert_eq!(fr.get("greeting"), Some("Bonjour"));
    }

    #[test]
    fn test_every_locale_complete_after_bootstrap() {
        let bundled = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        write_bundled(&bundled, "en", "a: '1'\nb: '2'\nc: '3'\n");
        write_bundled(&bundled, "fr", "a: un\n");

        let provider = DirectoryProvider::new(bundled.path(), data.path());
        let locales = locales();
        let store = WordingStore::<Document>::new();
        BootstrapLoader::new(&provider, &locales).run(&store);

        let default_entry = store.get(locales.default_locale()).unwrap();
        for locale in locales.supported() {
            let entry = store.get(locale).unwrap();
            assert!(
                fallback::missing_keys(&entry, &default_entry).is_empty(),
                "locale {locale} is incomplete"
            );
        }
    }
}
