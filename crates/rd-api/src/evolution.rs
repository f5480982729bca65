//! Evolution-chain resolution.
//!
//! Resolving a species takes two dependent requests and then a fan-out:
//!
//! ```text
//! pokemon-species/{name} ─► evolution_chain.url ─► evolution-chain/{id}
//!                                                        │
//!                                   EvolutionNode tree ◄─┘
//!                                          │ project(BranchPolicy)
//!                                          ▼
//!                     [stage, stage, ...]  ─► pokemon/{stage}   (sprite)
//!                                          └► item/{item}       (item sprite)
//! ```
//!
//! The first two requests are required: if either fails the whole
//! resolution fails. Sprite requests are best-effort: a failure leaves that
//! sprite `None` and the rest of the chain intact.

use futures_util::future::join_all;
use rd_core::{BranchPolicy, EvolutionNode, EvolutionStage};
use tracing::{debug, warn};

use crate::client::CachedClient;
use crate::error::ApiError;
use crate::upstream::Upstream;
use crate::wire;

/// Resolves a species name into ordered, sprite-enriched evolution stages.
#[derive(Debug)]
pub struct EvolutionChainResolver<'a, U> {
    client: &'a CachedClient<U>,
    policy: BranchPolicy,
}

impl<'a, U: Upstream> EvolutionChainResolver<'a, U> {
    /// Creates a resolver over `client`, flattening branches per `policy`.
    #[must_use]
    pub const fn new(client: &'a CachedClient<U>, policy: BranchPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetches the raw evolution tree that contains `species`.
    pub async fn chain_tree(&self, species: &str) -> Result<EvolutionNode, ApiError> {
        let path = format!("pokemon-species/{}", species.trim().to_lowercase());
        let species: wire::Species = self.client.fetch(&path).await?;
        let url = species
            .evolution_chain
            .map(|c| c.url)
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingField("evolution_chain.url"))?;

        let chain: wire::Chain = self.client.fetch(&url).await?;
        Ok(EvolutionNode::from(chain.chain))
    }

    /// Resolves `species` into stages, base form first.
    ///
    /// # Errors
    ///
    /// Fails if the species or chain request fails. Sprite failures are
    /// logged and leave the affected sprite `None`.
    pub async fn resolve(&self, species: &str) -> Result<Vec<EvolutionStage>, ApiError> {
        let tree = self.chain_tree(species).await?;
        if tree.is_branching() && self.policy == BranchPolicy::FirstBranch {
            debug!(
                species,
                total = tree.species_count(),
                "branching chain, following first branch only"
            );
        }

        let stages = tree
            .project(self.policy)
            .into_iter()
            .map(EvolutionStage::from_node);
        Ok(join_all(stages.map(|stage| self.enrich(stage))).await)
    }

    async fn enrich(&self, mut stage: EvolutionStage) -> EvolutionStage {
        match self.client.pokemon(&stage.name).await {
            Ok(pokemon) => stage.sprite_url = pokemon.sprite_url,
            Err(e) => warn!(species = %stage.name, error = %e, "species sprite unavailable"),
        }
        if let Some(item) = stage.item.as_mut() {
            match self.client.item(&item.name).await {
                Ok(details) => item.sprite_url = details.sprite_url,
                Err(e) => warn!(item = %item.name, error = %e, "item sprite unavailable"),
            }
        }
        stage
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use rd_core::FxHashMap;
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::cache::DetailsCache;

    /// In-memory upstream keyed by path; unknown paths answer 404.
    struct FakeUpstream(FxHashMap<String, Value>);

    #[async_trait]
    impl Upstream for FakeUpstream {
        async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| ApiError::status(404, path))
        }
    }

    fn link(species: &str, detail: Value, evolves_to: Vec<Value>) -> Value {
        json!({
            "species": {"name": species, "url": ""},
            "evolution_details": if detail.is_null() { json!([]) } else { json!([detail]) },
            "evolves_to": evolves_to,
        })
    }

    fn level_up(min_level: u32) -> Value {
        json!({"min_level": min_level, "trigger": {"name": "level-up", "url": ""}, "item": null})
    }

    fn use_item(item: &str) -> Value {
        json!({"min_level": null, "trigger": {"name": "use-item", "url": ""}, "item": {"name": item, "url": ""}})
    }

    fn sprite(name: &str) -> Value {
        json!({"name": name, "sprites": {"front_default": format!("https://img/{name}.png")}})
    }

    fn eevee_upstream() -> FakeUpstream {
        let mut paths = FxHashMap::default();
        paths.insert(
            "pokemon-species/eevee".to_owned(),
            json!({"evolution_chain": {"url": "https://pokeapi.co/api/v2/evolution-chain/67/"}}),
        );
        paths.insert(
            "https://pokeapi.co/api/v2/evolution-chain/67/".to_owned(),
            json!({"chain": link("eevee", Value::Null, vec![
                link("vaporeon", use_item("water-stone"), vec![]),
                link("jolteon", use_item("thunder-stone"), vec![]),
            ])}),
        );
        paths.insert("pokemon/eevee".to_owned(), sprite("eevee"));
        paths.insert("pokemon/vaporeon".to_owned(), sprite("vaporeon"));
        paths.insert(
            "item/water-stone".to_owned(),
            json!({"name": "water-stone", "sprites": {"default": "https://img/water-stone.png"}}),
        );
        // jolteon and thunder-stone are missing: their sprites stay None.
        FakeUpstream(paths)
    }

    fn client<U: Upstream>(upstream: U) -> CachedClient<U> {
        CachedClient::new(upstream, Arc::new(DetailsCache::new(64)), 100)
    }

    #[tokio::test]
    async fn test_bulbasaur_chain() {
        let server = MockServer::start().await;
        let chain_url = format!("{}/evolution-chain/1/", server.uri());

        Mock::given(method("GET"))
            .and(path("/pokemon-species/bulbasaur"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"evolution_chain": {"url": chain_url}})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/evolution-chain/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "chain": link("bulbasaur", Value::Null, vec![
                    link("ivysaur", level_up(16), vec![
                        link("venusaur", level_up(32), vec![]),
                    ]),
                ])
            })))
            .expect(1)
            .mount(&server)
            .await;
        for name in ["bulbasaur", "ivysaur", "venusaur"] {
            Mock::given(method("GET"))
                .and(path(format!("/pokemon/{name}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(sprite(name)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let mut config = rd_core::Config::default();
        config.api.base_url = server.uri();
        let client = CachedClient::from_config(&config).unwrap();
        let resolver = EvolutionChainResolver::new(&client, BranchPolicy::FirstBranch);

        let stages = resolver.resolve("bulbasaur").await.unwrap();
        let names: Vec<_> = stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["bulbasaur", "ivysaur", "venusaur"]);

        assert_eq!(stages[0].min_level, None);
        for stage in &stages[1..] {
            assert_eq!(stage.trigger.as_deref(), Some("level-up"));
            assert!(stage.min_level.is_some());
        }
        assert!(stages.iter().all(|s| s.item.is_none()));
        assert_eq!(
            stages[2].sprite_url.as_deref(),
            Some("https://img/venusaur.png")
        );
        insta::assert_snapshot!(
            rd_core::format_chain(&stages),
            @"bulbasaur → ivysaur (lv 16) → venusaur (lv 32)"
        );
    }

    #[tokio::test]
    async fn test_first_branch_with_partial_sprites() {
        let client = client(eevee_upstream());
        let resolver = EvolutionChainResolver::new(&client, BranchPolicy::FirstBranch);

        let stages = resolver.resolve("eevee").await.unwrap();
        assert_eq!(stages.len(), 2);
        let vaporeon = &stages[1];
        assert_eq!(vaporeon.name, "vaporeon");
        assert_eq!(
            vaporeon.item.as_ref().and_then(|i| i.sprite_url.as_deref()),
            Some("https://img/water-stone.png")
        );
    }

    #[tokio::test]
    async fn test_all_branches_keeps_missing_sprites_none() {
        let client = client(eevee_upstream());
        let resolver = EvolutionChainResolver::new(&client, BranchPolicy::AllBranches);

        let stages = resolver.resolve("eevee").await.unwrap();
        let names: Vec<_> = stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["eevee", "vaporeon", "jolteon"]);

        let jolteon = &stages[2];
        assert!(jolteon.sprite_url.is_none());
        assert_eq!(jolteon.item.as_ref().map(|i| i.name.as_str()), Some("thunder-stone"));
        assert!(jolteon.item.as_ref().is_some_and(|i| i.sprite_url.is_none()));
    }

    #[tokio::test]
    async fn test_single_stage_species() {
        let mut paths = FxHashMap::default();
        paths.insert(
            "pokemon-species/tauros".to_owned(),
            json!({"evolution_chain": {"url": "chain/tauros"}}),
        );
        paths.insert(
            "chain/tauros".to_owned(),
            json!({"chain": link("tauros", Value::Null, vec![])}),
        );
        let client = client(FakeUpstream(paths));
        let stages = EvolutionChainResolver::new(&client, BranchPolicy::FirstBranch)
            .resolve("tauros")
            .await
            .unwrap();
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].name, "tauros");
    }

    #[tokio::test]
    async fn test_species_failure_is_an_error() {
        let client = client(FakeUpstream(FxHashMap::default()));
        let err = EvolutionChainResolver::new(&client, BranchPolicy::FirstBranch)
            .resolve("missingno")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_missing_chain_url_is_an_error() {
        let mut paths = FxHashMap::default();
        paths.insert("pokemon-species/odd".to_owned(), json!({}));
        let client = client(FakeUpstream(paths));
        let err = EvolutionChainResolver::new(&client, BranchPolicy::FirstBranch)
            .resolve("odd")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingField("evolution_chain.url")));
    }
}
