//! HTTP-backed remote wording provider.
//!
//! Wraps any path-resolving provider and fetches remote wording over HTTP.
//! Requests carry a bounded timeout so a stalled endpoint cannot hold up the
//! refresh pass indefinitely.

use super::{ProviderError, WordingProvider};
use crate::locale::Locale;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote provider fetching `wording_<locale>.yml` from a base URL.
#[derive(Debug, Clone)]
pub struct HttpRemoteProvider<P> {
    inner: P,
    http_client: Client,
    base_url: String,
}

impl<P> HttpRemoteProvider<P> {
    /// Create a remote provider over the given path provider and base URL.
    pub fn new(inner: P, base_url: impl Into<String>) -> Self {
        Self::with_timeout(inner, base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a remote provider with an explicit per-request timeout.
    pub fn with_timeout(inner: P, base_url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner,
            http_client,
            base_url: base_url.into(),
        }
    }

    fn remote_url(&self, locale: &Locale) -> String {
        format!(
            "{}/wording_{}.yml",
            self.base_url.trim_end_matches('/'),
            locale
        )
    }
}

#[async_trait::async_trait]
impl<P: WordingProvider> WordingProvider for HttpRemoteProvider<P> {
    fn bundled_path(&self, locale: &Locale) -> PathBuf {
        self.inner.bundled_path(locale)
    }

    fn persisted_path(&self, locale: &Locale) -> PathBuf {
        self.inner.persisted_path(locale)
    }

    async fn remote_fetch(&self, locale: &Locale) -> Result<Vec<u8>, ProviderError> {
        let url = self.remote_url(locale);
        debug!("Fetching remote wording from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;

        Ok(bytes.to_vec())
    }
}
