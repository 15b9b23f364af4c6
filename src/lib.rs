//! Localized wording cache with bundled bootstrap, remote refresh, and live
//! change notification.
//!
//! The crate keeps one resolved wording document per supported locale. At
//! construction the cache is populated synchronously from bundled defaults
//! and previously persisted overlays, default locale first, so every stored
//! document is complete. A single asynchronous refresh pass then fetches
//! remote wording locale by locale, active locale first, persisting and
//! replacing entries as it goes. Subscribers observe the resolved document
//! for the active locale: the current value immediately, then every change in
//! order, whether it comes from the refresh pass or from the active locale
//! changing.
//!
//! The pipeline is generic over the document schema through the
//! [`Wording`] trait and over storage and transport through the
//! [`WordingProvider`] trait.

/// Locale identifiers and the supported-locale set
pub mod locale;
/// Storage-location and remote-fetch collaborator contract
pub mod provider;
/// Cache population, refresh, and notification pipeline
pub mod sync;
/// Wording documents and their wire codec
pub mod wording;

pub use locale::{Locale, LocaleSet};
pub use provider::{DirectoryProvider, HttpRemoteProvider, ProviderError, WordingProvider};
pub use sync::{
    RefreshConfig, Subscription, WordingManager, WordingNotifier, WordingStore, WordingSyncError,
};
pub use wording::{CodecError, Document, Wording};
