//! Resource references and catalog kinds.
//!
//! An [`EntityRef`] is the `{name, url}` pair returned by every PokeAPI
//! listing endpoint. It identifies a resource without fetching it.

use serde::{Deserialize, Serialize};

/// A named reference to an upstream resource.
///
/// # Examples
///
/// ```
/// use rd_core::EntityRef;
///
/// let pikachu = EntityRef::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25/");
/// assert_eq!(pikachu.id(), Some(25));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Resource name (lower-case slug, e.g. `"mr-mime"`).
    pub name: String,
    /// Absolute URL of the detail endpoint.
    pub url: String,
}

impl EntityRef {
    /// Creates a new reference.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Returns the numeric id encoded as the last path segment of the URL.
    ///
    /// Returns `None` if the URL does not end in a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rd_core::EntityRef;
    ///
    /// assert_eq!(EntityRef::new("a", "https://x/pokemon/151/").id(), Some(151));
    /// assert_eq!(EntityRef::new("a", "https://x/pokemon/151").id(), Some(151));
    /// assert_eq!(EntityRef::new("a", "https://x/pokemon/mew/").id(), None);
    /// ```
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// The full list of references for one catalog, fetched once per session.
pub type CatalogIndex = Vec<EntityRef>;

/// Which catalog is being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Pokémon catalog (`/pokemon`).
    #[default]
    Pokemon,
    /// Item catalog (`/item`).
    Item,
}

impl CatalogKind {
    /// Both catalogs, in tab order.
    pub const ALL: [Self; 2] = [Self::Pokemon, Self::Item];

    /// Returns the upstream resource segment for this catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use rd_core::CatalogKind;
    ///
    /// assert_eq!(CatalogKind::Pokemon.resource(), "pokemon");
    /// assert_eq!(CatalogKind::Item.resource(), "item");
    /// ```
    #[inline]
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Pokemon => "pokemon",
            Self::Item => "item",
        }
    }

    /// Returns a human-readable label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pokemon => "Pokémon",
            Self::Item => "Items",
        }
    }

    /// Returns the other catalog.
    #[inline]
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Pokemon => Self::Item,
            Self::Item => Self::Pokemon,
        }
    }

    /// Returns `true` if type and generation filters apply to this catalog.
    #[inline]
    #[must_use]
    pub const fn supports_species_filters(self) -> bool {
        matches!(self, Self::Pokemon)
    }
}
