//! Catalog filtering and incremental pagination for RotomDex.
//!
//! Given a catalog index fetched once per session, this crate decides which
//! entries are visible:
//!
//! - [`filter`] narrows the index by generation, type, and search text
//! - [`pager`] grows a visible-count cursor on load-more and resets it when
//!   the filter changes
//! - [`Catalog`] ties an index, a filter, membership sets, and a pager
//!   together, and keeps the filtered list in sync
//!
//! Nothing here performs network I/O. Membership sets are fetched by
//! `rd-api` and handed in.
//!
//! # Example
//!
//! ```
//! use rd_catalog::Catalog;
//! use rd_core::{CatalogKind, EntityRef, PagerConfig};
//!
//! let index: Vec<_> = (1..=151)
//!     .map(|id| EntityRef::new(format!("mon-{id}"), format!("https://pokeapi.co/api/v2/pokemon/{id}/")))
//!     .collect();
//!
//! let mut catalog = Catalog::new(CatalogKind::Pokemon, &PagerConfig::default());
//! catalog.set_index(index);
//! assert_eq!(catalog.visible().len(), 20);
//!
//! catalog.set_search("mon-1");
//! // mon-1, mon-10..mon-19, mon-100..mon-151
//! assert_eq!(catalog.filtered_len(), 63);
//! assert_eq!(catalog.visible().len(), 20);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod filter;
pub mod pager;

pub use filter::{
    EntityPredicate, FilterState, GenerationRange, IdSet, MemberSet, Memberships, SearchText,
    apply_filters, filter_indices,
};
pub use pager::Pager;

use rd_core::{CatalogIndex, CatalogKind, EntityRef, FxHashSet, Generation, PagerConfig};
use tracing::debug;

/// One browsable catalog: index, filter, memberships, and pager.
///
/// Every mutation that changes the filter recomputes the filtered list and
/// resets the pager to its initial page size.
#[derive(Debug, Clone)]
pub struct Catalog {
    kind: CatalogKind,
    index: CatalogIndex,
    filter: FilterState,
    memberships: Memberships,
    filtered: Vec<usize>,
    pager: Pager,
}

impl Catalog {
    /// Creates an empty catalog of the given kind.
    #[must_use]
    pub fn new(kind: CatalogKind, config: &PagerConfig) -> Self {
        Self {
            kind,
            index: CatalogIndex::new(),
            filter: FilterState::default(),
            memberships: Memberships::default(),
            filtered: Vec::new(),
            pager: Pager::from_config(config, kind),
        }
    }

    /// Returns the catalog kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Replaces the index and refilters.
    pub fn set_index(&mut self, index: CatalogIndex) {
        debug!(kind = ?self.kind, total = index.len(), "catalog index set");
        self.index = index;
        self.refilter();
        self.pager.reset();
    }

    /// Returns `true` once an index has been loaded.
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        !self.index.is_empty()
    }

    /// Returns the current filter.
    #[inline]
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Returns the current membership sets.
    #[inline]
    #[must_use]
    pub const fn memberships(&self) -> &Memberships {
        &self.memberships
    }

    /// Returns the pager.
    #[inline]
    #[must_use]
    pub const fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Replaces the whole filter.
    pub fn set_filter(&mut self, filter: FilterState) {
        if filter.type_filter != self.filter.type_filter {
            self.memberships.type_members = None;
        }
        if filter.generation_filter != self.filter.generation_filter {
            self.memberships.generation_members = None;
        }
        self.filter = filter;
        self.filter_changed();
    }

    /// Sets the search text.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
        self.filter_changed();
    }

    /// Sets the type filter. Any previous type membership is discarded.
    pub fn set_type(&mut self, type_name: Option<String>) {
        self.filter.type_filter = type_name;
        self.memberships.type_members = None;
        self.filter_changed();
    }

    /// Sets the generation filter. Any previous generation membership is
    /// discarded, so the static id ranges apply until a new one is supplied.
    pub fn set_generation(&mut self, generation: Option<Generation>) {
        self.filter.generation_filter = generation;
        self.memberships.generation_members = None;
        self.filter_changed();
    }

    /// Clears every filter.
    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.memberships = Memberships::default();
        self.filter_changed();
    }

    /// Supplies the members of `type_name`.
    ///
    /// Ignored if the type filter has changed since the members were
    /// requested.
    pub fn set_type_members(&mut self, type_name: &str, members: FxHashSet<String>) {
        if self.filter.type_filter.as_deref() != Some(type_name) {
            debug!(type_name, "discarding stale type members");
            return;
        }
        self.memberships.type_members = Some(members);
        self.refilter();
    }

    /// Supplies the species ids upstream lists for `generation`.
    ///
    /// Ignored if the generation filter has changed since the members were
    /// requested.
    pub fn set_generation_members(&mut self, generation: Generation, ids: FxHashSet<u32>) {
        if self.filter.generation_filter != Some(generation) {
            debug!(%generation, "discarding stale generation members");
            return;
        }
        self.memberships.generation_members = Some(ids);
        self.refilter();
    }

    /// Returns the total number of entries in the index.
    #[inline]
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of entries passing the filter.
    #[inline]
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Returns the number of visible entries.
    #[inline]
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.pager.visible_count(self.filtered.len())
    }

    /// Returns the visible slice, in index order.
    #[must_use]
    pub fn visible(&self) -> Vec<&EntityRef> {
        self.filtered
            .iter()
            .take(self.visible_len())
            .filter_map(|&i| self.index.get(i))
            .collect()
    }

    /// Returns the visible entry at `position`.
    #[must_use]
    pub fn visible_at(&self, position: usize) -> Option<&EntityRef> {
        if position >= self.visible_len() {
            return None;
        }
        self.filtered.get(position).and_then(|&i| self.index.get(i))
    }

    /// Returns `true` if the type filter is waiting for its member set.
    #[inline]
    #[must_use]
    pub fn is_waiting_for_members(&self) -> bool {
        self.memberships.is_pending(&self.filter)
    }

    /// Returns `true` if selecting `selected` should trigger a load-more.
    #[must_use]
    pub fn should_load_more(&self, selected: usize) -> bool {
        self.pager.should_load_more(selected, self.filtered.len())
    }

    /// Starts a load-more; see [`Pager::begin_load`].
    pub fn begin_load(&mut self) -> Option<std::time::Duration> {
        self.pager.begin_load(self.filtered.len())
    }

    /// Completes a load-more; see [`Pager::complete_load`].
    pub fn complete_load(&mut self) {
        self.pager.complete_load(self.filtered.len());
    }

    /// Runs a whole load-more including its delay.
    pub async fn load_more(&mut self) -> bool {
        let filtered_len = self.filtered.len();
        self.pager.load_more(filtered_len).await
    }

    fn filter_changed(&mut self) {
        self.refilter();
        self.pager.reset();
    }

    fn refilter(&mut self) {
        self.filtered = filter_indices(&self.index, &self.filter, &self.memberships);
    }
}
