//! Fast hash map and hash set type aliases.
//!
//! Membership sets (type members, generation members) and the in-flight
//! request set are keyed by entity name, so the workspace uses the Fx hash
//! from `rustc-hash` instead of SipHash. None of these maps hold untrusted
//! keys chosen by a remote peer, so denial-of-service resistance is not needed.
//!
//! # Examples
//!
//! ```
//! use rd_core::{FxHashSet, fx_hash_set};
//!
//! let mut electric: FxHashSet<String> = fx_hash_set();
//! electric.insert("pikachu".to_owned());
//! assert!(electric.contains("pikachu"));
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new empty [`FxHashMap`].
#[inline]
#[must_use]
pub fn fx_hash_map<K, V>() -> FxHashMap<K, V> {
    FxHashMap::default()
}

/// Creates a new empty [`FxHashSet`].
#[inline]
#[must_use]
pub fn fx_hash_set<V>() -> FxHashSet<V> {
    FxHashSet::default()
}

/// Collects names into an [`FxHashSet`] of owned strings.
///
/// # Examples
///
/// ```
/// use rd_core::hash::name_set;
///
/// let set = name_set(["pikachu", "raichu"]);
/// assert_eq!(set.len(), 2);
/// ```
#[must_use]
pub fn name_set<I, S>(names: I) -> FxHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_map_roundtrip() {
        let mut map: FxHashMap<String, u32> = fx_hash_map();
        map.insert("bulbasaur".to_owned(), 1);
        assert_eq!(map.get("bulbasaur"), Some(&1));
    }

    #[test]
    fn test_name_set_dedupes() {
        let set = name_set(["pikachu", "pikachu", "raichu"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("raichu"));
    }
}
