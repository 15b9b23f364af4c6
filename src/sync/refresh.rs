//! Remote wording refresh.
//!
//! The refresh pass runs once after bootstrap, as a single asynchronous task
//! iterating the supported locales active-locale-first so the locale currently
//! on screen is refreshed before the rest. Locales are processed strictly in
//! sequence; the early abort on the "remote not supported" sentinel and the
//! notification ordering both depend on that.
//!
//! Per locale: fetch the remote bytes under a bounded timeout, decode, merge
//! through the fallback layers, persist the merged document (failure here is
//! logged and tolerated), replace the store entry, and publish through the
//! notifier when the refreshed locale is the active one.

use super::{WordingSyncError, fallback, sequencer};
use crate::locale::{Locale, LocaleSet};
use crate::provider::{ProviderError, WordingProvider};
use crate::sync::notifier::WordingNotifier;
use crate::sync::store::WordingStore;
use crate::wording::Wording;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Configuration for the refresh pass.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Upper bound for a single locale's remote fetch.
    pub fetch_timeout: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// Single-pass remote refresh over all supported locales.
pub struct RemoteRefresh<W, P> {
    provider: Arc<P>,
    locales: LocaleSet,
    store: Arc<WordingStore<W>>,
    notifier: Arc<WordingNotifier<W>>,
    active: watch::Receiver<Locale>,
    config: RefreshConfig,
}

impl<W: Wording, P: WordingProvider> RemoteRefresh<W, P> {
    pub fn new(
        provider: Arc<P>,
        locales: LocaleSet,
        store: Arc<WordingStore<W>>,
        notifier: Arc<WordingNotifier<W>>,
        active: watch::Receiver<Locale>,
        config: RefreshConfig,
    ) -> Self {
        Self {
            provider,
            locales,
            store,
            notifier,
            active,
            config,
        }
    }

    /// Run the refresh pass to completion.
    ///
    /// The "remote not supported" sentinel aborts the remaining locales; any
    /// other per-locale failure is logged and the pass continues.
    pub async fn run(self) {
        let priority = self.active.borrow().clone();
        info!(
            "Starting remote wording refresh, {} localization first",
            priority
        );

        for locale in sequencer::prioritized(&self.locales, &priority) {
            match self.refresh_locale(&locale).await {
                Ok(()) => {
                    info!(
                        "Successfully fetched wording for {} localization",
                        locale
                    );
                }
                Err(WordingSyncError::Provider(ProviderError::RemoteNotSupported)) => {
                    info!("Remote wording is not supported, stopping refresh");
                    break;
                }
                Err(e) => {
                    error!(
                        "Failed to update wording for {} localization: {}",
                        locale, e
                    );
                }
            }
        }

        info!("Remote wording refresh completed");
    }

    async fn refresh_locale(&self, locale: &Locale) -> Result<(), WordingSyncError> {
        let fetch = self.provider.remote_fetch(locale);
        let bytes = tokio::time::timeout(self.config.fetch_timeout, fetch)
            .await
            .map_err(|_| WordingSyncError::FetchTimeout(locale.clone()))??;
        let fetched = W::decode(&bytes)?;

        let default = self.locales.default_locale();
        let merged = fallback::merge(
            fetched,
            self.store.get(locale).as_ref(),
            self.store.get(default).as_ref(),
            locale == default,
        );

        // Persist failure must not block the in-memory update.
        if let Err(e) = self.persist(locale, &merged).await {
            warn!(
                "Failed to persist fetched wording for {} localization: {}",
                locale, e
            );
        }

        self.store.insert(locale.clone(), merged.clone());

        // Re-read the active locale, it may have changed mid-pass.
        if *locale == *self.active.borrow() {
            self.notifier.publish(merged);
        }

        Ok(())
    }

    async fn persist(&self, locale: &Locale, document: &W) -> Result<(), WordingSyncError> {
        let path = self.provider.persisted_path(locale);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, document.encode()?).await?;
        Ok(())
    }
}
