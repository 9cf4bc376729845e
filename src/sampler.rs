//! Weighted random selection over the catalog partitions.
//!
//! Selection is a two-stage draw. The first draw picks a partition:
//! favorites win with probability `w*F / (w*F + M)` where `w` is the
//! configured favorite weight, `F` the favorite count and `M` the normal
//! count. The second draw picks uniformly inside the chosen partition. The
//! net effect is that every favorite is `w` times as likely to appear as
//! any normal record, without materializing a weighted flat list.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, TryRngCore};
use tracing::warn;

use crate::catalog::{Catalog, MediaRecord};
use crate::error::Error;
use crate::filter::ExtensionFilter;

/// Divisor that maps a raw `u32` draw onto `[0, 1)`.
const POW_2_32: f64 = (1u64 << 32) as f64;

/// Draw count after which the rejection loop logs a warning.
const RETRY_WARN_AFTER: u32 = 256;

/// Draw count after which the rejection loop gives up.
const MAX_SAMPLE_RETRIES: u32 = 4096;

/// Source of raw 32-bit draws for the sampler.
///
/// A selection consumes exactly two draws. Implementations surface entropy
/// failures instead of substituting fallback values.
pub trait RandomSource {
    /// Produces the next uniformly distributed `u32`.
    ///
    /// # Errors
    /// Returns [`Error::Entropy`] when the underlying source fails.
    fn next_u32(&mut self) -> Result<u32, Error>;
}

/// Draws pulled from the operating system on every call.
///
/// There is no userspace generator state behind this source, so draws are
/// independent across calls and across process restarts.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl RandomSource for OsEntropy {
    fn next_u32(&mut self) -> Result<u32, Error> {
        OsRng
            .try_next_u32()
            .map_err(|err| Error::Entropy(err.to_string()))
    }
}

/// Seeded draws for reproducible runs and tests.
impl RandomSource for StdRng {
    fn next_u32(&mut self) -> Result<u32, Error> {
        Ok(RngCore::next_u32(self))
    }
}

/// Selects one record from the catalog, favorites weighted by
/// `favorite_weight`.
///
/// Returns an owned copy so the caller can keep the record across a later
/// catalog refresh.
///
/// # Errors
/// Returns [`Error::EmptyCatalog`] when both partitions are empty and
/// propagates draw failures from `bits`.
pub fn sample<R>(
    catalog: &Catalog,
    favorite_weight: u32,
    bits: &mut R,
) -> Result<MediaRecord, Error>
where
    R: RandomSource + ?Sized,
{
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }

    let r0 = bits.next_u32()?;
    let r1 = bits.next_u32()?;

    let weighted_favorites = u64::from(favorite_weight) * catalog.favorites().len() as u64;
    let denominator = weighted_favorites + catalog.normal().len() as u64;
    let favorite_probability = if denominator == 0 {
        0.0
    } else {
        weighted_favorites as f64 / denominator as f64
    };

    // The comparison is inclusive: a draw of exactly zero lands on the
    // favorites branch even when the favorite probability is zero.
    let take_favorites = f64::from(r0) / POW_2_32 <= favorite_probability;

    let mut partition = if take_favorites {
        catalog.favorites()
    } else {
        catalog.normal()
    };
    if partition.is_empty() {
        // Only reachable on the zero-draw boundary against an empty
        // favorites partition; the catalog is non-empty, so the other side
        // holds the records.
        partition = if take_favorites {
            catalog.normal()
        } else {
            catalog.favorites()
        };
    }

    let index = (partition.len() as f64 * (f64::from(r1) / POW_2_32)) as usize;
    Ok(partition[index].clone())
}

/// Selects records until one passes the extension filter.
///
/// Unsupported records stay in the catalog and keep their weight; they are
/// simply redrawn. A catalog holding no supported media at all would loop
/// forever, so the loop warns after 256 fruitless draws and gives up after
/// 4096.
///
/// # Errors
/// Propagates [`sample`] errors and returns [`Error::NoSupportedMedia`]
/// when the retry budget is exhausted.
pub fn sample_supported<R>(
    catalog: &Catalog,
    favorite_weight: u32,
    filter: &ExtensionFilter,
    bits: &mut R,
) -> Result<MediaRecord, Error>
where
    R: RandomSource + ?Sized,
{
    let mut attempts: u32 = 0;
    loop {
        let record = sample(catalog, favorite_weight, bits)?;
        if filter.matches(&record.relative_path) {
            return Ok(record);
        }
        attempts += 1;
        if attempts == RETRY_WARN_AFTER {
            warn!(
                attempts,
                "weighted draws keep hitting unsupported media; catalog may hold none"
            );
        }
        if attempts >= MAX_SAMPLE_RETRIES {
            return Err(Error::NoSupportedMedia { attempts });
        }
    }
}
