//! Staleness tracking for the on-disk catalog.

use std::time::{Duration, Instant};

/// Decides when the catalog file should be re-read.
///
/// A fresh timer has no recorded refresh and reports stale immediately, so
/// the first poll always triggers a load. After that the catalog is
/// considered stale only once strictly more than `interval` has elapsed
/// since the last [`mark_refreshed`](Self::mark_refreshed).
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    last_refresh: Option<Instant>,
}

impl RefreshTimer {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_refresh: None,
        }
    }

    /// True when the catalog should be re-read at `now`.
    #[must_use]
    pub fn should_refresh(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.interval,
        }
    }

    /// Records `now` as the most recent refresh.
    pub fn mark_refreshed(&mut self, now: Instant) {
        self.last_refresh = Some(now);
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
