//! Configuration loading and validation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

use crate::filter::DEFAULT_EXTENSIONS;

/// Runtime configuration, deserialized from a YAML file.
///
/// Every field has a usable default except `media-library-path`, which
/// [`validated`](Self::validated) insists on.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Root directory holding the media files and the `db.json` catalog.
    pub media_library_path: PathBuf,
    /// How long a loaded catalog stays fresh before the next poll re-reads it.
    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,
    /// Selection weight of a favorite relative to a normal record.
    pub favorite_weight: u32,
    /// File extensions the display can decode, with or without leading dot.
    pub supported_extensions: Vec<String>,
    /// Deterministic sampler seed; omit to draw from OS entropy.
    pub sampler_seed: Option<u64>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            media_library_path: PathBuf::new(),
            refresh_interval: Self::default_refresh_interval(),
            favorite_weight: Self::default_favorite_weight(),
            supported_extensions: Self::default_supported_extensions(),
            sampler_seed: None,
        }
    }
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.media_library_path.as_os_str().is_empty(),
            "media-library-path must be set"
        );
        ensure!(
            self.refresh_interval > Duration::ZERO,
            "refresh-interval must be positive"
        );
        ensure!(
            self.favorite_weight >= 1,
            "favorite-weight must be at least 1"
        );
        ensure!(
            !self.supported_extensions.is_empty(),
            "supported-extensions must not be empty"
        );
        ensure!(
            self
                .supported_extensions
                .iter()
                .all(|ext| !ext.trim_start_matches('.').is_empty()),
            "supported-extensions entries must not be empty"
        );
        Ok(self)
    }

    const fn default_refresh_interval() -> Duration {
        Duration::from_secs(60 * 60)
    }

    const fn default_favorite_weight() -> u32 {
        10
    }

    fn default_supported_extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_owned()).collect()
    }
}
