//! Wording synchronization module.
//!
//! This module provides all the core logic for populating, refreshing, and
//! observing the per-locale wording cache. It is composed of several
//! submodules, each responsible for one aspect of the pipeline:
//!
//! - `sequencer`: deterministic locale ordering for bootstrap and refresh.
//! - `fallback`: the per-key fallback merge over raw, previous, and default
//!   layers.
//! - `store`: the in-memory locale-to-document cache.
//! - `bootstrap`: synchronous cache population from bundled and persisted
//!   wording at construction.
//! - `refresh`: the single-pass asynchronous remote refresh task.
//! - `notifier`: the current-document slot and subscriber registry.
//!
//! [`WordingManager`] is the owning facade: it bootstraps the store in its
//! constructor, initializes the notifier from the active locale's entry,
//! tracks active-locale changes, and runs the remote refresh.

/// Initial cache population from bundled and persisted wording
pub mod bootstrap;
/// Per-key fallback merge
pub mod fallback;
/// Current-document slot and subscriber registry
pub mod notifier;
/// Single-pass asynchronous remote refresh
pub mod refresh;
/// Deterministic locale ordering
pub mod sequencer;
/// In-memory locale-to-document cache
pub mod store;

pub use notifier::{Subscription, WordingNotifier};
pub use refresh::{RefreshConfig, RemoteRefresh};
pub use store::WordingStore;

use crate::locale::{Locale, LocaleSet};
use crate::provider::{ProviderError, WordingProvider};
use crate::wording::{CodecError, Wording};
use bootstrap::BootstrapLoader;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// Errors for the wording synchronization pipeline.
#[derive(Debug, thiserror::Error)]
pub enum WordingSyncError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote fetch timed out for {0} localization")]
    FetchTimeout(Locale),

    #[error("No wording cached for the {0} default localization")]
    MissingDefault(Locale),
}

/// Owning facade over the wording cache, refresh task, and change stream.
///
/// Construction bootstraps the store synchronously from bundled and persisted
/// wording, then seeds the notifier from the active locale's entry. Calling
/// [`start`] spawns the remote refresh pass and the active-locale watcher;
/// both tasks are aborted on [`shutdown`] or drop, so no work dangles past
/// the manager's lifetime.
///
/// [`start`]: WordingManager::start
/// [`shutdown`]: WordingManager::shutdown
pub struct WordingManager<W: Wording, P> {
    locales: LocaleSet,
    provider: Arc<P>,
    store: Arc<WordingStore<W>>,
    notifier: Arc<WordingNotifier<W>>,
    active: watch::Receiver<Locale>,
    refresh_config: RefreshConfig,
    tasks: Vec<JoinHandle<()>>,
}

impl<W: Wording, P: WordingProvider + 'static> WordingManager<W, P> {
    /// Create a manager and bootstrap the cache.
    ///
    /// `active` is the externally owned active-locale signal; the manager
    /// only reads it. Fails with [`WordingSyncError::MissingDefault`] when
    /// bootstrap could not produce an entry to resolve the active locale,
    /// which indicates a missing or corrupt bundled default document.
    pub fn new(
        locales: LocaleSet,
        provider: P,
        active: watch::Receiver<Locale>,
    ) -> Result<Self, WordingSyncError> {
        Self::with_config(locales, provider, active, RefreshConfig::default())
    }

    /// Create a manager with an explicit refresh configuration.
    pub fn with_config(
        locales: LocaleSet,
        provider: P,
        active: watch::Receiver<Locale>,
        refresh_config: RefreshConfig,
    ) -> Result<Self, WordingSyncError> {
        let store = Arc::new(WordingStore::new());
        BootstrapLoader::new(&provider, &locales).run(&store);

        let initial = store
            .resolve(&active.borrow(), locales.default_locale())
            .ok_or_else(|| WordingSyncError::MissingDefault(locales.default_locale().clone()))?;
        let notifier = Arc::new(WordingNotifier::new(initial));

        Ok(Self {
            locales,
            provider: Arc::new(provider),
            store,
            notifier,
            active,
            refresh_config,
            tasks: Vec::new(),
        })
    }

    /// Spawn the remote refresh pass and the active-locale watcher.
    ///
    /// Must be called within a tokio runtime, once, after construction. Each
    /// call spawns another refresh pass, so repeated calls are not useful.
    pub fn start(&mut self) {
        self.tasks.push(tokio::spawn(self.make_refresh().run()));

        let mut active = self.active.clone();
        let store = self.store.clone();
        let notifier = self.notifier.clone();
        let default = self.locales.default_locale().clone();
        self.tasks.push(tokio::spawn(async move {
            while active.changed().await.is_ok() {
                let locale = active.borrow_and_update().clone();
                info!("Active localization changed to {}", locale);
                if let Some(document) = store.resolve(&locale, &default) {
                    notifier.publish(document);
                }
            }
        }));
    }

    /// Run one remote refresh pass inline instead of spawning it.
    pub async fn refresh(&self) {
        self.make_refresh().run().await;
    }

    /// The current resolved document for the active locale.
    pub fn current(&self) -> W {
        self.notifier.current()
    }

    /// Subscribe to document changes; the current document is delivered
    /// immediately.
    pub fn subscribe(&self) -> Subscription<W> {
        self.notifier.subscribe()
    }

    /// The resolved document for an arbitrary supported locale, falling back
    /// to the default locale's entry.
    pub fn wording_for(&self, locale: &Locale) -> Option<W> {
        self.store.resolve(locale, self.locales.default_locale())
    }

    /// The supported locale set.
    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Abort the refresh and watcher tasks.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    fn make_refresh(&self) -> RemoteRefresh<W, P> {
        RemoteRefresh::new(
            self.provider.clone(),
            self.locales.clone(),
            self.store.clone(),
            self.notifier.clone(),
            self.active.clone(),
            self.refresh_config.clone(),
        )
    }
}

impl<W: Wording, P> Drop for WordingManager<W, P> {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
