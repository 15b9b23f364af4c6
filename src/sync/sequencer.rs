//! Deterministic locale ordering for cache population and refresh.
//!
//! Both bootstrap and refresh walk the supported locales in a priority order:
//! the priority locale first (the default locale during bootstrap, the active
//! locale during refresh), then the default locale, then the remaining
//! supported locales in their declared relative order. Processing the default
//! early guarantees later locales always have a complete fallback source.

use crate::locale::{Locale, LocaleSet};

/// Produce the ordered locale sequence for the given priority locale.
///
/// The priority locale appears first; the default locale, when distinct,
/// appears before the other non-priority locales; the rest keep their declared
/// relative order. No locale appears twice, even when the priority locale is
/// the default. A priority locale outside the supported set is ignored.
pub fn prioritized(locales: &LocaleSet, priority: &Locale) -> Vec<Locale> {
    let default = locales.default_locale();
    let mut ordered = Vec::with_capacity(locales.supported().len());

    if locales.contains(priority) {
        ordered.push(priority.clone());
    }
    if default != priority {
        ordered.push(default.clone());
    }
    for locale in locales.supported() {
        if locale != priority && locale != default {
            ordered.push(locale.clone());
        }
    }

    ordered
}
