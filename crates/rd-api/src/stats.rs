//! Fetch statistics with atomic counters.
//!
//! [`FetchStats`] is shared between the client and any spawned fetch tasks;
//! [`FetchStatsSnapshot`] is a copyable point-in-time view for display.
//!
//! All counters use relaxed ordering. They are informational only.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for upstream traffic and cache effectiveness.
///
/// # Examples
///
/// ```
/// use rd_api::FetchStats;
///
/// let stats = FetchStats::new();
/// stats.increment_misses();
/// stats.increment_requests();
/// stats.increment_hits();
///
/// let snap = stats.snapshot();
/// assert_eq!(snap.requests, 1);
/// assert!((snap.hit_rate() - 50.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Default)]
pub struct FetchStats {
    requests: AtomicU64,
    failures: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FetchStats {
    /// Creates a new [`FetchStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one upstream request.
    #[inline]
    pub fn increment_requests(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one failed upstream request.
    #[inline]
    pub fn increment_failures(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one details-cache hit.
    #[inline]
    pub fn increment_hits(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one details-cache miss.
    #[inline]
    pub fn increment_misses(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> FetchStatsSnapshot {
        FetchStatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`FetchStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FetchStatsSnapshot {
    /// Upstream requests sent.
    pub requests: u64,
    /// Upstream requests that failed.
    pub failures: u64,
    /// Details served from the cache.
    pub hits: u64,
    /// Details that had to be fetched.
    pub misses: u64,
}

impl FetchStatsSnapshot {
    /// Returns the cache hit rate as a percentage, or 0 when nothing was looked up.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            return 0.0;
        }
        (self.hits as f64 / lookups as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_stats_new() {
        let snap = FetchStats::new().snapshot();
        assert_eq!(snap, FetchStatsSnapshot::default());
        assert!(snap.hit_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_fetch_stats_increment() {
        let stats = FetchStats::new();
        stats.increment_requests();
        stats.increment_requests();
        stats.increment_failures();
        stats.increment_hits();
        stats.increment_hits();
        stats.increment_hits();
        stats.increment_misses();

        let snap = stats.snapshot();
        assert_eq!(snap.requests, 2);
        assert_eq!(snap.failures, 1);
        assert!((snap.hit_rate() - 75.0).abs() < f64::EPSILON);
    }
}
