//! Incremental pagination cursor.
//!
//! The [`Pager`] tracks how many entries of the filtered list are visible.
//! It starts at the catalog's initial page size and grows by a fixed
//! increment each time a load-more completes. Changing any filter resets it.
//!
//! A load-more happens in two steps so that the artificial delay can run on
//! a timer task without borrowing the pager:
//!
//! ```text
//! begin_load()  ──►  sleep(load_delay)  ──►  complete_load(filtered_len)
//!     │                                            │
//!     └─ pending = true                            └─ visible += increment
//! ```
//!
//! While a load is pending, further triggers are ignored.

use std::time::Duration;

use rd_core::{CatalogKind, PagerConfig};
use tracing::debug;

/// Visible-count cursor over a filtered catalog.
///
/// # Examples
///
/// ```
/// use rd_catalog::Pager;
/// use std::time::Duration;
///
/// let mut pager = Pager::new(20, 20, Duration::ZERO);
/// assert_eq!(pager.visible_count(100), 20);
///
/// assert!(pager.begin_load(100).is_some());
/// pager.complete_load(100);
/// assert_eq!(pager.visible_count(100), 40);
///
/// pager.reset();
/// assert_eq!(pager.visible_count(100), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    initial: usize,
    increment: usize,
    load_delay: Duration,
    threshold: usize,
    visible: usize,
    pending: bool,
}

impl Pager {
    /// Creates a pager with the given initial size, increment, and delay.
    #[must_use]
    pub const fn new(initial: usize, increment: usize, load_delay: Duration) -> Self {
        Self {
            initial,
            increment,
            load_delay,
            threshold: 0,
            visible: initial,
            pending: false,
        }
    }

    /// Creates a pager for a catalog from configuration.
    #[must_use]
    pub const fn from_config(config: &PagerConfig, kind: CatalogKind) -> Self {
        let mut pager = Self::new(
            config.initial_page_size(kind),
            config.increment,
            config.load_delay(),
        );
        pager.threshold = config.scroll_threshold;
        pager
    }

    /// Sets how close to the end of the visible slice the selection must be
    /// for [`should_load_more`](Self::should_load_more) to fire.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns the initial page size.
    #[inline]
    #[must_use]
    pub const fn initial(&self) -> usize {
        self.initial
    }

    /// Returns the load-more delay.
    #[inline]
    #[must_use]
    pub const fn load_delay(&self) -> Duration {
        self.load_delay
    }

    /// Returns `true` while a load-more is waiting for its delay.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the number of visible entries, never more than `filtered_len`.
    #[inline]
    #[must_use]
    pub fn visible_count(&self, filtered_len: usize) -> usize {
        self.visible.min(filtered_len)
    }

    /// Returns `true` if there are filtered entries beyond the visible slice.
    #[inline]
    #[must_use]
    pub fn has_more(&self, filtered_len: usize) -> bool {
        self.visible < filtered_len
    }

    /// Returns `true` if selecting `selected` should trigger a load-more.
    ///
    /// Fires when the selection is within the threshold of the last visible
    /// entry, more entries exist, and no load is pending.
    #[must_use]
    pub fn should_load_more(&self, selected: usize, filtered_len: usize) -> bool {
        if self.pending || !self.has_more(filtered_len) {
            return false;
        }
        let last = self.visible_count(filtered_len).saturating_sub(1);
        selected + self.threshold >= last
    }

    /// Starts a load-more. Returns the delay to wait before
    /// [`complete_load`](Self::complete_load), or `None` if the trigger is
    /// ignored (a load is already pending, or nothing is left to load).
    pub fn begin_load(&mut self, filtered_len: usize) -> Option<Duration> {
        if self.pending || !self.has_more(filtered_len) {
            return None;
        }
        self.pending = true;
        debug!(visible = self.visible, filtered_len, "load more started");
        Some(self.load_delay)
    }

    /// Finishes a pending load-more, growing the visible count by the
    /// increment, clamped to `filtered_len`.
    ///
    /// Does nothing if no load is pending (for instance because a filter
    /// change reset the pager in the meantime).
    pub fn complete_load(&mut self, filtered_len: usize) {
        if !self.pending {
            return;
        }
        self.pending = false;
        let grown = self.visible.saturating_add(self.increment);
        self.visible = grown.min(filtered_len.max(self.initial));
        debug!(visible = self.visible, filtered_len, "load more completed");
    }

    /// Runs a whole load-more: begin, wait the delay, complete.
    ///
    /// Returns `true` if the visible count grew.
    pub async fn load_more(&mut self, filtered_len: usize) -> bool {
        let before = self.visible_count(filtered_len);
        let Some(delay) = self.begin_load(filtered_len) else {
            return false;
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.complete_load(filtered_len);
        self.visible_count(filtered_len) > before
    }

    /// Resets the visible count to the initial page size and drops any
    /// pending load.
    pub fn reset(&mut self) {
        self.visible = self.initial;
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager() -> Pager {
        Pager::new(20, 20, Duration::ZERO)
    }

    #[test]
    fn test_initial_visible_is_clamped() {
        let pager = pager();
        assert_eq!(pager.visible_count(151), 20);
        assert_eq!(pager.visible_count(3), 3);
        assert_eq!(pager.visible_count(0), 0);
    }

    #[test]
    fn test_from_config_uses_catalog_page_size() {
        let config = PagerConfig::default();
        assert_eq!(Pager::from_config(&config, CatalogKind::Pokemon).initial(), 20);
        assert_eq!(Pager::from_config(&config, CatalogKind::Item).initial(), 24);
        assert_eq!(
            Pager::from_config(&config, CatalogKind::Item).load_delay(),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn test_load_more_sequence_is_monotonic_and_bounded() {
        let mut pager = pager();
        let filtered_len = 75;
        let mut previous = pager.visible_count(filtered_len);

        for _ in 0..10 {
            if pager.begin_load(filtered_len).is_some() {
                pager.complete_load(filtered_len);
            }
            let current = pager.visible_count(filtered_len);
            assert!(current >= previous);
            assert!(current <= filtered_len);
            previous = current;
        }
        assert_eq!(previous, 75);
        assert!(!pager.has_more(filtered_len));
    }

    #[test]
    fn test_pending_load_ignores_triggers() {
        let mut pager = pager();
        assert!(pager.begin_load(100).is_some());
        assert!(pager.is_pending());
        assert!(pager.begin_load(100).is_none());
        assert!(!pager.should_load_more(19, 100));

        pager.complete_load(100);
        assert_eq!(pager.visible_count(100), 40);
    }

    #[test]
    fn test_reset_restores_initial_and_cancels_pending() {
        let mut pager = pager();
        pager.begin_load(100);
        pager.complete_load(100);
        pager.begin_load(100);
        pager.reset();

        assert_eq!(pager.visible_count(100), 20);
        assert!(!pager.is_pending());

        // A completion arriving after the reset is ignored.
        pager.complete_load(100);
        assert_eq!(pager.visible_count(100), 20);
    }

    #[test]
    fn test_should_load_more_threshold() {
        let pager = pager().with_threshold(3);
        assert!(!pager.should_load_more(15, 100));
        assert!(pager.should_load_more(16, 100));
        assert!(pager.should_load_more(19, 100));
        assert!(!pager.should_load_more(19, 20));
    }

    #[test]
    fn test_no_load_when_everything_visible() {
        let mut pager = pager();
        assert!(pager.begin_load(12).is_none());
        assert_eq!(pager.visible_count(12), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_load_more_waits_delay() {
        let mut pager = Pager::new(24, 20, Duration::from_millis(300));
        let start = tokio::time::Instant::now();

        assert!(pager.load_more(50).await);
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(pager.visible_count(50), 44);

        assert!(pager.load_more(50).await);
        assert_eq!(pager.visible_count(50), 50);

        assert!(!pager.load_more(50).await);
    }
}
