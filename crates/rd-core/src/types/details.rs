//! Fully resolved detail records.
//!
//! These are the values stored in the details cache and rendered in the
//! detail pane. Upstream fields that are missing degrade to defaults when the
//! records are built, so every field here is always present.

use serde::{Deserialize, Serialize};

use super::entity::CatalogKind;

/// A single base stat (`hp`, `attack`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    /// Stat name.
    pub name: String,
    /// Base value.
    pub value: u32,
}

/// Resolved Pokémon record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokemonDetails {
    /// National-dex id.
    pub id: u32,
    /// Pokémon name.
    pub name: String,
    /// Type names in slot order.
    pub types: Vec<String>,
    /// Front default sprite.
    pub sprite_url: Option<String>,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Base experience yield.
    pub base_experience: Option<u32>,
    /// Base stats in upstream order.
    pub stats: Vec<BaseStat>,
    /// Ability names.
    pub abilities: Vec<String>,
    /// Species name, used to resolve the evolution chain.
    pub species: String,
}

impl PokemonDetails {
    /// Returns `true` if the Pokémon has the given type.
    #[must_use]
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(type_name))
    }

    /// Returns the types joined with `/` (`grass/poison`).
    #[must_use]
    pub fn type_label(&self) -> String {
        self.types.join("/")
    }
}

/// Resolved item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDetails {
    /// Item id.
    pub id: u32,
    /// Item name.
    pub name: String,
    /// Shop price, if the item can be bought.
    pub cost: Option<u32>,
    /// Category name.
    pub category: String,
    /// Attribute names (`holdable`, `consumable`, ...).
    pub attributes: Vec<String>,
    /// English short effect, or English flavor text when no effect exists.
    pub effect: Option<String>,
    /// Default sprite.
    pub sprite_url: Option<String>,
}

impl Default for ItemDetails {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            cost: None,
            category: "general".to_owned(),
            attributes: Vec::new(),
            effect: None,
            sprite_url: None,
        }
    }
}

impl ItemDetails {
    /// Returns the price label: `"{cost}₽"`, or `"—"` when there is no price.
    ///
    /// # Examples
    ///
    /// ```
    /// use rd_core::ItemDetails;
    ///
    /// let potion = ItemDetails { cost: Some(200), ..ItemDetails::default() };
    /// assert_eq!(potion.cost_label(), "200₽");
    /// assert_eq!(ItemDetails::default().cost_label(), "—");
    /// ```
    #[must_use]
    pub fn cost_label(&self) -> String {
        self.cost
            .map_or_else(|| "—".to_owned(), |cost| format!("{cost}₽"))
    }
}

/// A resolved record of either catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityDetails {
    /// A Pokémon.
    Pokemon(PokemonDetails),
    /// An item.
    Item(ItemDetails),
}

impl EntityDetails {
    /// Returns the entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Pokemon(p) => &p.name,
            Self::Item(i) => &i.name,
        }
    }

    /// Returns the entity id.
    #[must_use]
    pub const fn id(&self) -> u32 {
        match self {
            Self::Pokemon(p) => p.id,
            Self::Item(i) => i.id,
        }
    }

    /// Returns the catalog the entity belongs to.
    #[must_use]
    pub const fn kind(&self) -> CatalogKind {
        match self {
            Self::Pokemon(_) => CatalogKind::Pokemon,
            Self::Item(_) => CatalogKind::Item,
        }
    }

    /// Returns the entity sprite, if any.
    #[must_use]
    pub fn sprite_url(&self) -> Option<&str> {
        match self {
            Self::Pokemon(p) => p.sprite_url.as_deref(),
            Self::Item(i) => i.sprite_url.as_deref(),
        }
    }

    /// Returns the Pokémon record, if this is one.
    #[must_use]
    pub const fn as_pokemon(&self) -> Option<&PokemonDetails> {
        match self {
            Self::Pokemon(p) => Some(p),
            Self::Item(_) => None,
        }
    }

    /// Returns the item record, if this is one.
    #[must_use]
    pub const fn as_item(&self) -> Option<&ItemDetails> {
        match self {
            Self::Item(i) => Some(i),
            Self::Pokemon(_) => None,
        }
    }
}
