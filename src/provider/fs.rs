//! File-system provider with the standard wording directory layout.

use super::WordingProvider;
use crate::locale::Locale;
use std::path::PathBuf;

/// Provider resolving wording files from a bundled directory and a writable
/// data directory.
///
/// Bundled files live directly in the bundled directory; persisted overlays
/// live under a `wording/` subdirectory of the data directory. Both use the
/// `wording_<locale>.yml` naming scheme. Remote fetches are unsupported
/// unless the provider is wrapped by a remote-capable one such as
/// [`HttpRemoteProvider`](super::HttpRemoteProvider).
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    bundled_dir: PathBuf,
    data_dir: PathBuf,
}

impl DirectoryProvider {
    /// Create a provider over explicit bundled and data directories.
    pub fn new(bundled_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundled_dir: bundled_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Create a provider using the platform data directory for the given
    /// application name, falling back to the current directory when the
    /// platform does not define one.
    pub fn with_platform_data_dir(bundled_dir: impl Into<PathBuf>, app_name: &str) -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app_name);
        Self::new(bundled_dir, data_dir)
    }

    fn file_name(locale: &Locale) -> String {
        format!("wording_{locale}.yml")
    }
}

#[async_trait::async_trait]
impl WordingProvider for DirectoryProvider {
    fn bundled_path(&self, locale: &Locale) -> PathBuf {
        self.bundled_dir.join(Self::file_name(locale))
    }

    fn persisted_path(&self, locale: &Locale) -> PathBuf {
        self.data_dir.join("wording").join(Self::file_name(locale))
    }
}
