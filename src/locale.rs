//! Locale identifiers and the supported-locale set.
//!
//! A [`Locale`] is an opaque language tag (`"en"`, `"fr"`, `"pt-BR"`, ...).
//! The crate never interprets the tag beyond equality; one locale in the
//! supported set is designated as the default and acts as the fallback source
//! for every other locale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a language/region variant of the wording content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a language tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The locale identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// The set of supported locales together with the designated default locale.
///
/// The default locale is the fallback source for every other locale: its
/// document must be complete, and bootstrap processes it first so that later
/// locales can fill gaps from it.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    supported: Vec<Locale>,
    default: Locale,
}

impl LocaleSet {
    /// Create a locale set from the supported locales and the default locale.
    ///
    /// If the default locale is not part of `supported` it is inserted at the
    /// front, so the set always contains its own fallback source.
    pub fn new(supported: impl IntoIterator<Item = Locale>, default: Locale) -> Self {
        let mut supported: Vec<Locale> = supported.into_iter().collect();
        if !supported.contains(&default) {
            supported.insert(0, default.clone());
        }
        Self { supported, default }
    }

    /// The supported locales in their declared order.
    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    /// The designated default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Whether the given locale is part of the supported set.
    pub fn contains(&self, locale: &Locale) -> bool {
        self.supported.contains(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inserted_when_missing() {
        let set = LocaleSet::new([Locale::from("fr"), Locale::from("de")], Locale::from("en"));
        assert_eq!(set.supported().len(), 3);
        assert_eq!(set.supported()[0], Locale::from("en"));
        assert_eq!(set.default_locale(), &Locale::from("en"));
    }

    #[test]
    fn test_declared_order_preserved() {
        let set = LocaleSet::new(
            [Locale::from("en"), Locale::from("fr"), Locale::from("de")],
            Locale::from("en"),
        );
        let tags: Vec<&str> = set.supported().iter().map(Locale::as_str).collect();
        assert_eq!(tags, ["en", "fr", "de"]);
    }
}
