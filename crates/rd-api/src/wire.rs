//! Upstream JSON shapes.
//!
//! Only the fields RotomDex reads are declared. Everything is defaulted so
//! that partial or unusual records still decode; conversion into the
//! `rd-core` records happens here as well.

use rd_core::{
    BaseStat, EntityRef, EvolutionDetail, EvolutionNode, ItemDetails, PokemonDetails,
};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NamedResource {
    pub name: String,
    pub url: String,
}

impl From<NamedResource> for EntityRef {
    fn from(resource: NamedResource) -> Self {
        Self::new(resource.name, resource.url)
    }
}

/// `GET /{resource}?limit=&offset=`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ResourceList {
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PokemonType {
    slot: u32,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PokemonSprites {
    front_default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PokemonStat {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PokemonAbility {
    ability: NamedResource,
}

/// `GET /pokemon/{name}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Pokemon {
    id: u32,
    name: String,
    types: Vec<PokemonType>,
    sprites: PokemonSprites,
    height: u32,
    weight: u32,
    base_experience: Option<u32>,
    stats: Vec<PokemonStat>,
    abilities: Vec<PokemonAbility>,
    species: NamedResource,
}

impl From<Pokemon> for PokemonDetails {
    fn from(mut wire: Pokemon) -> Self {
        wire.types.sort_by_key(|t| t.slot);
        let species = if wire.species.name.is_empty() {
            wire.name.clone()
        } else {
            wire.species.name
        };
        Self {
            id: wire.id,
            name: wire.name,
            types: wire.types.into_iter().map(|t| t.kind.name).collect(),
            sprite_url: wire.sprites.front_default,
            height: wire.height,
            weight: wire.weight,
            base_experience: wire.base_experience,
            stats: wire
                .stats
                .into_iter()
                .map(|s| BaseStat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
            abilities: wire.abilities.into_iter().map(|a| a.ability.name).collect(),
            species,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemSprites {
    default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EffectEntry {
    short_effect: String,
    language: NamedResource,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlavorTextEntry {
    text: String,
    language: NamedResource,
}

/// `GET /item/{name}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Item {
    id: u32,
    name: String,
    cost: Option<u32>,
    category: Option<NamedResource>,
    attributes: Vec<NamedResource>,
    effect_entries: Vec<EffectEntry>,
    flavor_text_entries: Vec<FlavorTextEntry>,
    sprites: ItemSprites,
}

const ENGLISH: &str = "en";

impl From<Item> for ItemDetails {
    fn from(wire: Item) -> Self {
        let effect = wire
            .effect_entries
            .into_iter()
            .find(|e| e.language.name == ENGLISH && !e.short_effect.is_empty())
            .map(|e| e.short_effect)
            .or_else(|| {
                wire.flavor_text_entries
                    .into_iter()
                    .find(|f| f.language.name == ENGLISH && !f.text.is_empty())
                    .map(|f| f.text)
            });
        let category = wire
            .category
            .map(|c| c.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "general".to_owned());

        Self {
            id: wire.id,
            name: wire.name,
            cost: wire.cost,
            category,
            attributes: wire.attributes.into_iter().map(|a| a.name).collect(),
            effect,
            sprite_url: wire.sprites.default,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ChainReference {
    pub url: String,
}

/// `GET /pokemon-species/{name}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Species {
    pub evolution_chain: Option<ChainReference>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChainDetail {
    min_level: Option<u32>,
    trigger: Option<NamedResource>,
    item: Option<NamedResource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ChainLink {
    species: NamedResource,
    evolution_details: Vec<ChainDetail>,
    evolves_to: Vec<ChainLink>,
}

impl From<ChainLink> for EvolutionNode {
    fn from(link: ChainLink) -> Self {
        let detail = link
            .evolution_details
            .into_iter()
            .next()
            .map(|d| EvolutionDetail {
                min_level: d.min_level,
                trigger: d.trigger.map(|t| t.name),
                item: d.item.map(|i| i.name),
            });
        Self {
            species: link.species.name,
            detail,
            children: link.evolves_to.into_iter().map(Self::from).collect(),
        }
    }
}

/// `GET /evolution-chain/{id}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Chain {
    pub chain: ChainLink,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TypeSlot {
    pokemon: NamedResource,
}

/// `GET /type/{name}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Type {
    pokemon: Vec<TypeSlot>,
}

impl Type {
    pub fn member_names(self) -> impl Iterator<Item = String> {
        self.pokemon.into_iter().map(|slot| slot.pokemon.name)
    }
}

/// `GET /generation/{name}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Generation {
    pokemon_species: Vec<NamedResource>,
}

impl Generation {
    /// Species ids, parsed from each `pokemon-species/{id}/` URL.
    pub fn species_ids(self) -> impl Iterator<Item = u32> {
        self.pokemon_species
            .into_iter()
            .filter_map(|species| EntityRef::from(species).id())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_pokemon_conversion_orders_types_by_slot() {
        let wire: Pokemon = serde_json::from_value(json!({
            "id": 1,
            "name": "bulbasaur",
            "types": [
                {"slot": 2, "type": {"name": "poison", "url": ""}},
                {"slot": 1, "type": {"name": "grass", "url": ""}}
            ],
            "sprites": {"front_default": "https://img/1.png"},
            "stats": [{"base_stat": 45, "stat": {"name": "hp", "url": ""}}],
            "abilities": [{"ability": {"name": "overgrow", "url": ""}}],
            "species": {"name": "bulbasaur", "url": ""}
        }))
        .unwrap();
        let details = PokemonDetails::from(wire);
        assert_eq!(details.types, ["grass", "poison"]);
        assert_eq!(details.sprite_url.as_deref(), Some("https://img/1.png"));
        assert_eq!(details.stats[0].value, 45);
        assert_eq!(details.abilities, ["overgrow"]);
    }

    #[test]
    fn test_pokemon_missing_fields_default() {
        let wire: Pokemon = serde_json::from_value(json!({"name": "mew"})).unwrap();
        let details = PokemonDetails::from(wire);
        assert_eq!(details.species, "mew");
        assert!(details.sprite_url.is_none());
        assert!(details.types.is_empty());
    }

    #[test]
    fn test_item_effect_prefers_english_short_effect() {
        let wire: Item = serde_json::from_value(json!({
            "id": 17,
            "name": "potion",
            "cost": 200,
            "category": {"name": "healing", "url": ""},
            "attributes": [{"name": "holdable", "url": ""}],
            "effect_entries": [
                {"short_effect": "Heilt 20 KP.", "language": {"name": "de", "url": ""}},
                {"short_effect": "Restores 20 HP.", "language": {"name": "en", "url": ""}}
            ],
            "sprites": {"default": "https://img/potion.png"}
        }))
        .unwrap();
        let item = ItemDetails::from(wire);
        assert_eq!(item.effect.as_deref(), Some("Restores 20 HP."));
        assert_eq!(item.category, "healing");
        assert_eq!(item.cost_label(), "200₽");
        assert_eq!(item.attributes, ["holdable"]);
    }

    #[test]
    fn test_item_falls_back_to_flavor_text_and_general() {
        let wire: Item = serde_json::from_value(json!({
            "name": "odd-keystone",
            "cost": null,
            "flavor_text_entries": [
                {"text": "A vital item.", "language": {"name": "en", "url": ""}}
            ]
        }))
        .unwrap();
        let item = ItemDetails::from(wire);
        assert_eq!(item.effect.as_deref(), Some("A vital item."));
        assert_eq!(item.category, "general");
        assert_eq!(item.cost_label(), "—");
    }

    #[test]
    fn test_chain_link_keeps_zeroth_detail() {
        let link: ChainLink = serde_json::from_value(json!({
            "species": {"name": "eevee", "url": ""},
            "evolution_details": [],
            "evolves_to": [{
                "species": {"name": "vaporeon", "url": ""},
                "evolution_details": [
                    {"min_level": null, "trigger": {"name": "use-item", "url": ""}, "item": {"name": "water-stone", "url": ""}},
                    {"min_level": 99, "trigger": {"name": "level-up", "url": ""}, "item": null}
                ],
                "evolves_to": []
            }]
        }))
        .unwrap();
        let node = EvolutionNode::from(link);
        assert!(node.detail.is_none());
        let child = &node.children[0];
        assert_eq!(
            child.detail,
            Some(EvolutionDetail {
                min_level: None,
                trigger: Some("use-item".to_owned()),
                item: Some("water-stone".to_owned()),
            })
        );
    }

    #[test]
    fn test_type_and_generation_members() {
        let wire: Type = serde_json::from_value(json!({
            "pokemon": [{"pokemon": {"name": "pikachu", "url": ""}, "slot": 1}]
        }))
        .unwrap();
        assert_eq!(wire.member_names().collect::<Vec<_>>(), ["pikachu"]);

        let wire: Generation = serde_json::from_value(json!({
            "pokemon_species": [
                {"name": "chikorita", "url": "https://pokeapi.co/api/v2/pokemon-species/152/"},
                {"name": "broken", "url": ""}
            ]
        }))
        .unwrap();
        assert_eq!(wire.species_ids().collect::<Vec<_>>(), [152]);
    }
}
