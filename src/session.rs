//! Per-frame session state: catalog, refresh gating and the sampler.

use std::path::PathBuf;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::catalog::{Catalog, DB_FILE_NAME, MediaRecord};
use crate::config::Configuration;
use crate::error::Error;
use crate::filter::ExtensionFilter;
use crate::refresh::RefreshTimer;
use crate::sampler::{self, OsEntropy, RandomSource};

/// Owns all state the selection subsystem needs for one running frame.
///
/// A new session starts with an empty catalog; the first
/// [`refresh_if_stale`](Self::refresh_if_stale) populates it. Sampling hands
/// out owned records, so a record stays valid after the catalog it came
/// from has been replaced by a refresh.
pub struct FrameSession {
    media_root: PathBuf,
    favorite_weight: u32,
    filter: ExtensionFilter,
    timer: RefreshTimer,
    catalog: Catalog,
    bits: Box<dyn RandomSource>,
}

impl FrameSession {
    /// Builds a session from validated configuration.
    ///
    /// With `sampler-seed` set the session draws from a seeded generator,
    /// otherwise from OS entropy.
    #[must_use]
    pub fn new(config: &Configuration) -> Self {
        let bits: Box<dyn RandomSource> = match config.sampler_seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(OsEntropy),
        };
        Self::with_random_source(config, bits)
    }

    /// Like [`new`](Self::new) but with a caller-supplied draw source.
    #[must_use]
    pub fn with_random_source(config: &Configuration, bits: Box<dyn RandomSource>) -> Self {
        Self {
            media_root: config.media_library_path.clone(),
            favorite_weight: config.favorite_weight,
            filter: ExtensionFilter::new(config.supported_extensions.iter()),
            timer: RefreshTimer::new(config.refresh_interval),
            catalog: Catalog::default(),
            bits,
        }
    }

    /// Path of the catalog file under the media library root.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.media_root.join(DB_FILE_NAME)
    }

    /// True when the catalog has never been loaded or has gone stale.
    #[must_use]
    pub fn should_refresh(&self) -> bool {
        self.timer.should_refresh(Instant::now())
    }

    /// Re-reads the catalog file unconditionally.
    ///
    /// The refresh instant is stamped before the read, so a broken catalog
    /// file is retried on the next interval rather than on every poll. On
    /// failure the previously loaded catalog stays in place.
    ///
    /// # Errors
    /// Returns [`Error::Io`] or [`Error::Parse`] from the catalog load.
    pub fn refresh(&mut self) -> Result<(), Error> {
        self.timer.mark_refreshed(Instant::now());
        let path = self.db_path();
        debug!(path = %path.display(), "refreshing media catalog");
        let catalog = Catalog::load(&path)?;
        info!(
            favorites = catalog.favorites().len(),
            normal = catalog.normal().len(),
            "media catalog refreshed"
        );
        self.catalog = catalog;
        Ok(())
    }

    /// Re-reads the catalog only when stale; returns whether a reload ran.
    ///
    /// Callers holding a prefetched record should discard it and draw a
    /// fresh one when this returns `true`, since the record may have left
    /// the catalog.
    ///
    /// # Errors
    /// Propagates [`refresh`](Self::refresh) errors.
    pub fn refresh_if_stale(&mut self) -> Result<bool, Error> {
        if !self.should_refresh() {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// One weighted draw over the whole catalog.
    ///
    /// # Errors
    /// Returns [`Error::EmptyCatalog`] before the first successful refresh
    /// and propagates draw failures.
    pub fn sample(&mut self) -> Result<MediaRecord, Error> {
        sampler::sample(&self.catalog, self.favorite_weight, self.bits.as_mut())
    }

    /// Weighted draws until a record passes the extension filter.
    ///
    /// # Errors
    /// As [`sample`](Self::sample), plus [`Error::NoSupportedMedia`] when
    /// the catalog holds nothing displayable.
    pub fn next_media(&mut self) -> Result<MediaRecord, Error> {
        let record = sampler::sample_supported(
            &self.catalog,
            self.favorite_weight,
            &self.filter,
            self.bits.as_mut(),
        )?;
        debug!(
            path = %record.relative_path,
            favorite = record.is_favorite,
            "selected media"
        );
        Ok(record)
    }

    /// Absolute path of a record under the media library root.
    #[must_use]
    pub fn media_path(&self, record: &MediaRecord) -> PathBuf {
        self.media_root.join(&record.relative_path)
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
