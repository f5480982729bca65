//! Catalog filtering.
//!
//! A catalog index is narrowed by up to three stages, always in this order:
//!
//! 1. **Generation** - the entity belongs to the selected generation, either
//!    by static national-dex id range or by an upstream membership list.
//! 2. **Type** - the entity is a member of the selected type.
//! 3. **Search** - the name contains the search text, case-insensitively.
//!
//! Every stage is an [`EntityPredicate`]. Stages only ever remove entries, so
//! the result keeps the index order and is a subset of every active stage's
//! membership.
//!
//! # Examples
//!
//! ```
//! use rd_catalog::{FilterState, Memberships, apply_filters};
//! use rd_core::EntityRef;
//!
//! let index = vec![
//!     EntityRef::new("charmander", "https://pokeapi.co/api/v2/pokemon/4/"),
//!     EntityRef::new("squirtle", "https://pokeapi.co/api/v2/pokemon/7/"),
//! ];
//! let filter = FilterState::with_search("CHAR");
//!
//! let visible = apply_filters(&index, &filter, &Memberships::default());
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].name, "charmander");
//! ```

use rd_core::{EntityRef, FxHashSet, Generation};

/// A single filtering stage.
///
/// Implementations must be pure: the same entity always gives the same answer.
pub trait EntityPredicate: Send + Sync {
    /// Returns `true` if the entity passes this stage.
    fn matches(&self, entity: &EntityRef) -> bool;
}

/// Generation stage backed by the static national-dex id ranges.
///
/// Entities whose URL carries no numeric id never match.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRange(pub Generation);

impl EntityPredicate for GenerationRange {
    #[inline]
    fn matches(&self, entity: &EntityRef) -> bool {
        entity.id().is_some_and(|id| self.0.contains_id(id))
    }
}

/// Stage backed by an explicit set of member names.
#[derive(Debug, Clone, Copy)]
pub struct MemberSet<'a>(pub &'a FxHashSet<String>);

impl EntityPredicate for MemberSet<'_> {
    #[inline]
    fn matches(&self, entity: &EntityRef) -> bool {
        self.0.contains(&entity.name)
    }
}

/// Stage backed by a set of national-dex ids.
///
/// Matching by id keeps form-named entries (`deoxys-normal`) alongside the
/// species names upstream lists report.
#[derive(Debug, Clone, Copy)]
pub struct IdSet<'a>(pub &'a FxHashSet<u32>);

impl EntityPredicate for IdSet<'_> {
    #[inline]
    fn matches(&self, entity: &EntityRef) -> bool {
        entity.id().is_some_and(|id| self.0.contains(&id))
    }
}

/// Case-insensitive substring match on the entity name.
#[derive(Debug, Clone)]
pub struct SearchText {
    needle: String,
}

impl SearchText {
    /// Creates a search stage. Returns `None` for blank text.
    #[must_use]
    pub fn new(text: &str) -> Option<Self> {
        let needle = text.trim().to_lowercase();
        (!needle.is_empty()).then_some(Self { needle })
    }
}

impl EntityPredicate for SearchText {
    fn matches(&self, entity: &EntityRef) -> bool {
        entity.name.to_lowercase().contains(&self.needle)
    }
}

/// Filter configuration state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search on names.
    pub search_text: String,

    /// Selected type name (`"electric"`), if any.
    pub type_filter: Option<String>,

    /// Selected generation, if any.
    pub generation_filter: Option<Generation>,
}

impl FilterState {
    /// Creates a filter with only a search text.
    #[must_use]
    pub fn with_search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if any filter is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search_text.trim().is_empty()
            || self.type_filter.is_some()
            || self.generation_filter.is_some()
    }

    /// Clears all filters.
    pub fn clear(&mut self) {
        self.search_text.clear();
        self.type_filter = None;
        self.generation_filter = None;
    }

    /// Cycles the type filter through `types`, then back to none.
    pub fn cycle_type(&mut self, types: &[String]) {
        let next = match &self.type_filter {
            None => types.first(),
            Some(current) => types
                .iter()
                .position(|t| t == current)
                .and_then(|i| types.get(i + 1)),
        };
        self.type_filter = next.cloned();
    }

    /// Cycles the generation filter I → IX, then back to none.
    pub fn cycle_generation(&mut self) {
        self.generation_filter = match self.generation_filter {
            None => Some(Generation::I),
            Some(current) => Generation::from_number(current.number() + 1),
        };
    }

    /// Returns a compact summary of the active filters (`gen I · electric · "pi"`).
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(generation) = self.generation_filter {
            parts.push(generation.label().to_owned());
        }
        if let Some(type_name) = &self.type_filter {
            parts.push(type_name.clone());
        }
        let text = self.search_text.trim();
        if !text.is_empty() {
            parts.push(format!("\"{text}\""));
        }
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

/// Resolved membership sets for the active type and generation filters.
///
/// A type filter needs its member set; until it has been fetched the type
/// stage matches nothing. The generation set is optional: without it the
/// static id ranges are used.
#[derive(Debug, Clone, Default)]
pub struct Memberships {
    /// Members of the selected type.
    pub type_members: Option<FxHashSet<String>>,

    /// Species ids of the selected generation, per the upstream list.
    pub generation_members: Option<FxHashSet<u32>>,
}

impl Memberships {
    /// Returns `true` if `filter` selects a type whose members are missing.
    #[must_use]
    pub fn is_pending(&self, filter: &FilterState) -> bool {
        filter.type_filter.is_some() && self.type_members.is_none()
    }
}

struct Nothing;

impl EntityPredicate for Nothing {
    fn matches(&self, _entity: &EntityRef) -> bool {
        false
    }
}

/// Returns the index positions that pass every active stage, in index order.
#[must_use]
pub fn filter_indices(
    index: &[EntityRef],
    filter: &FilterState,
    memberships: &Memberships,
) -> Vec<usize> {
    let mut stages: Vec<Box<dyn EntityPredicate + '_>> = Vec::with_capacity(3);

    if let Some(generation) = filter.generation_filter {
        match &memberships.generation_members {
            Some(ids) => stages.push(Box::new(IdSet(ids))),
            None => stages.push(Box::new(GenerationRange(generation))),
        }
    }
    if filter.type_filter.is_some() {
        match &memberships.type_members {
            Some(members) => stages.push(Box::new(MemberSet(members))),
            None => stages.push(Box::new(Nothing)),
        }
    }
    if let Some(search) = SearchText::new(&filter.search_text) {
        stages.push(Box::new(search));
    }

    index
        .iter()
        .enumerate()
        .filter(|(_, entity)| stages.iter().all(|stage| stage.matches(entity)))
        .map(|(i, _)| i)
        .collect()
}

/// Returns the entities that pass every active stage, in index order.
#[must_use]
pub fn apply_filters<'a>(
    index: &'a [EntityRef],
    filter: &FilterState,
    memberships: &Memberships,
) -> Vec<&'a EntityRef> {
    filter_indices(index, filter, memberships)
        .into_iter()
        .filter_map(|i| index.get(i))
        .collect()
}
