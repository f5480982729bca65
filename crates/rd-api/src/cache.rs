//! Session-scoped details cache.
//!
//! [`DetailsCache`] maps `(catalog, name)` to a resolved [`EntityDetails`]
//! record. It is bounded: once `capacity` records are held, inserting a new
//! one evicts the least recently used. Entries are never invalidated in any
//! other way, since upstream data does not change during a session.
//!
//! # Safety Pattern
//!
//! The map sits behind a `parking_lot` mutex. Every public method takes the
//! lock for a single operation and returns owned data, so no guard ever
//! escapes and nothing is held across an `.await`.
//!
//! # Examples
//!
//! ```
//! use rd_api::DetailsCache;
//! use rd_core::{CatalogKind, EntityDetails, ItemDetails};
//!
//! let cache = DetailsCache::new(2);
//! cache.insert(EntityDetails::Item(ItemDetails { name: "potion".into(), ..ItemDetails::default() }));
//!
//! assert!(cache.contains(CatalogKind::Item, "potion"));
//! assert!(!cache.contains(CatalogKind::Pokemon, "potion"));
//! ```

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use rd_core::{CatalogKind, EntityDetails};

type CacheKey = (CatalogKind, String);

fn key(kind: CatalogKind, name: &str) -> CacheKey {
    (kind, name.to_lowercase())
}

/// A bounded, thread-safe LRU map of resolved details.
#[derive(Debug)]
pub struct DetailsCache {
    entries: Mutex<LruCache<CacheKey, EntityDetails>>,
}

impl DetailsCache {
    /// Creates a cache holding at most `capacity` records.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns a clone of the record, marking it as recently used.
    #[must_use]
    pub fn get(&self, kind: CatalogKind, name: &str) -> Option<EntityDetails> {
        self.entries.lock().get(&key(kind, name)).cloned()
    }

    /// Returns `true` if a record is cached, without touching its recency.
    #[must_use]
    pub fn contains(&self, kind: CatalogKind, name: &str) -> bool {
        self.entries.lock().contains(&key(kind, name))
    }

    /// Inserts or replaces a record, keyed by its kind and name.
    ///
    /// Returns the record evicted to make room, if any.
    pub fn insert(&self, details: EntityDetails) -> Option<EntityDetails> {
        let k = key(details.kind(), details.name());
        let mut entries = self.entries.lock();
        match entries.push(k.clone(), details) {
            Some((evicted_key, evicted)) if evicted_key != k => Some(evicted),
            _ => None,
        }
    }

    /// Returns the number of cached records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns the maximum number of records.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}

impl Default for DetailsCache {
    fn default() -> Self {
        Self::new(rd_core::CacheConfig::default().capacity)
    }
}
