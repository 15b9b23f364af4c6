//! Collaborator contract for wording storage locations and remote fetches.
//!
//! The sync pipeline does not own any storage or transport; it consumes a
//! [`WordingProvider`], which resolves the bundled and persisted file
//! locations for a locale and fetches remote wording bytes. Deployments
//! without remote capability keep the default [`remote_fetch`] implementation,
//! which signals the distinguished [`ProviderError::RemoteNotSupported`]
//! condition; the refresh task reacts to that sentinel by abandoning the whole
//! refresh pass rather than retrying per locale.
//!
//! [`remote_fetch`]: WordingProvider::remote_fetch

/// File-system provider with the standard directory layout
pub mod fs;
/// HTTP-backed remote provider
pub mod http;

pub use fs::DirectoryProvider;
pub use http::HttpRemoteProvider;

use crate::locale::Locale;
use std::path::PathBuf;

/// Errors surfaced by wording providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Remote refresh is not available at all for this deployment. This is a
    /// capability statement, not a transient failure: the refresh task stops
    /// iterating locales entirely when it sees it.
    #[error("Remote wording is not supported for this deployment")]
    RemoteNotSupported,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Whether this is the distinguished "remote not supported" sentinel.
    pub fn is_remote_not_supported(&self) -> bool {
        matches!(self, Self::RemoteNotSupported)
    }
}

/// Resolves wording storage locations and remote content for each locale.
#[async_trait::async_trait]
pub trait WordingProvider: Send + Sync {
    /// Location of the bundled wording file for `locale`. Always resolvable;
    /// the content ships with the deployed package.
    fn bundled_path(&self, locale: &Locale) -> PathBuf;

    /// Location of the persisted wording overlay for `locale`. The file may
    /// not exist; absence is not an error.
    fn persisted_path(&self, locale: &Locale) -> PathBuf;

    /// Fetch the remote wording bytes for `locale`.
    ///
    /// The default implementation signals that remote wording is unsupported,
    /// mirroring deployments that only ship bundled content.
    async fn remote_fetch(&self, locale: &Locale) -> Result<Vec<u8>, ProviderError> {
        let _ = locale;
        Err(ProviderError::RemoteNotSupported)
    }
}
