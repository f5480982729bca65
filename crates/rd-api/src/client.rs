//! Cached PokeAPI operations.
//!
//! [`CachedClient`] wraps an [`Upstream`] with the session's
//! [`DetailsCache`] and [`FetchStats`]. Detail lookups hit the cache first,
//! so asking twice for the same name costs at most one request. Listing
//! and membership lookups are not cached; each is fetched once per filter
//! change by the caller.

use std::sync::Arc;

use rd_core::{
    CatalogIndex, CatalogKind, Config, EntityDetails, FxHashSet, Generation, ItemDetails,
    PokemonDetails,
};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::DetailsCache;
use crate::error::ApiError;
use crate::stats::{FetchStats, FetchStatsSnapshot};
use crate::upstream::{PokeApi, Upstream};
use crate::wire;

/// Types listed by `/type` that no Pokémon currently has.
const EMPTY_TYPES: [&str; 3] = ["unknown", "shadow", "stellar"];

/// PokeAPI operations backed by a details cache.
///
/// # Examples
///
/// ```no_run
/// use rd_api::CachedClient;
/// use rd_core::Config;
///
/// # async fn run() -> Result<(), rd_api::ApiError> {
/// let client = CachedClient::from_config(&Config::default())?;
/// let pikachu = client.pokemon("pikachu").await?;
/// assert_eq!(pikachu.id, 25);
///
/// // Served from the cache, no second request.
/// client.pokemon("pikachu").await?;
/// assert_eq!(client.stats().requests, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CachedClient<U = PokeApi> {
    upstream: U,
    cache: Arc<DetailsCache>,
    stats: Arc<FetchStats>,
    catalog_limit: u32,
}

impl CachedClient<PokeApi> {
    /// Creates a PokeAPI-backed client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let upstream = PokeApi::new(&config.api)?;
        info!(base_url = upstream.base_url(), "PokeAPI client ready");
        Ok(Self::new(
            upstream,
            Arc::new(DetailsCache::new(config.cache.capacity)),
            config.api.catalog_limit,
        ))
    }
}

impl<U: Upstream> CachedClient<U> {
    /// Creates a client over any upstream.
    #[must_use]
    pub fn new(upstream: U, cache: Arc<DetailsCache>, catalog_limit: u32) -> Self {
        Self {
            upstream,
            cache,
            stats: Arc::new(FetchStats::new()),
            catalog_limit,
        }
    }

    /// Returns the details cache.
    #[inline]
    #[must_use]
    pub const fn cache(&self) -> &Arc<DetailsCache> {
        &self.cache
    }

    /// Returns the wrapped upstream.
    #[inline]
    #[must_use]
    pub const fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Returns a snapshot of the request and cache counters.
    #[must_use]
    pub fn stats(&self) -> FetchStatsSnapshot {
        self.stats.snapshot()
    }

    /// Fetches `path` and decodes it, counting the request.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.stats.increment_requests();
        let value = match self.upstream.get_json(path).await {
            Ok(value) => value,
            Err(e) => {
                self.stats.increment_failures();
                return Err(e);
            }
        };
        serde_json::from_value(value).map_err(|e| {
            self.stats.increment_failures();
            ApiError::from(e)
        })
    }

    fn cached(&self, kind: CatalogKind, name: &str) -> Option<EntityDetails> {
        let hit = self.cache.get(kind, name);
        if hit.is_some() {
            self.stats.increment_hits();
        } else {
            self.stats.increment_misses();
        }
        hit
    }

    /// Fetches the full index of a catalog in one request.
    ///
    /// Returns [`ApiError::Cancelled`] as soon as `cancel` fires.
    pub async fn catalog_index(
        &self,
        kind: CatalogKind,
        cancel: &CancellationToken,
    ) -> Result<CatalogIndex, ApiError> {
        let path = format!("{}?limit={}&offset=0", kind.resource(), self.catalog_limit);
        let list = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(kind = kind.resource(), "catalog index fetch cancelled");
                return Err(ApiError::Cancelled);
            }
            list = self.fetch::<wire::ResourceList>(&path) => list?,
        };
        let index: CatalogIndex = list.results.into_iter().map(Into::into).collect();
        info!(kind = kind.resource(), total = index.len(), "catalog index loaded");
        Ok(index)
    }

    /// Returns a Pokémon record, from the cache when possible.
    pub async fn pokemon(&self, name: &str) -> Result<PokemonDetails, ApiError> {
        if let Some(EntityDetails::Pokemon(details)) = self.cached(CatalogKind::Pokemon, name) {
            return Ok(details);
        }
        let path = format!("pokemon/{}", name.trim().to_lowercase());
        let details = PokemonDetails::from(self.fetch::<wire::Pokemon>(&path).await?);
        self.cache.insert(EntityDetails::Pokemon(details.clone()));
        Ok(details)
    }

    /// Returns an item record, from the cache when possible.
    pub async fn item(&self, name: &str) -> Result<ItemDetails, ApiError> {
        if let Some(EntityDetails::Item(details)) = self.cached(CatalogKind::Item, name) {
            return Ok(details);
        }
        let path = format!("item/{}", name.trim().to_lowercase());
        let details = ItemDetails::from(self.fetch::<wire::Item>(&path).await?);
        self.cache.insert(EntityDetails::Item(details.clone()));
        Ok(details)
    }

    /// Returns the record for `name` in the given catalog.
    pub async fn details(&self, kind: CatalogKind, name: &str) -> Result<EntityDetails, ApiError> {
        match kind {
            CatalogKind::Pokemon => self.pokemon(name).await.map(EntityDetails::Pokemon),
            CatalogKind::Item => self.item(name).await.map(EntityDetails::Item),
        }
    }

    /// Returns the names of every Pokémon of a type.
    pub async fn type_members(&self, type_name: &str) -> Result<FxHashSet<String>, ApiError> {
        let path = format!("type/{}", type_name.trim().to_lowercase());
        let wire: wire::Type = self.fetch(&path).await?;
        let members: FxHashSet<String> = wire.member_names().collect();
        debug!(type_name, members = members.len(), "type members loaded");
        Ok(members)
    }

    /// Returns the ids of the species introduced in a generation, per the
    /// upstream list.
    ///
    /// The list names species, not Pokémon, so ids are what the catalog
    /// index shares with it.
    pub async fn generation_members(
        &self,
        generation: Generation,
    ) -> Result<FxHashSet<u32>, ApiError> {
        let path = format!("generation/{}", generation.api_name());
        let wire: wire::Generation = self.fetch(&path).await?;
        let members: FxHashSet<u32> = wire.species_ids().collect();
        debug!(%generation, members = members.len(), "generation members loaded");
        Ok(members)
    }

    /// Returns the names of all Pokémon types, in upstream order.
    pub async fn type_names(&self) -> Result<Vec<String>, ApiError> {
        let list: wire::ResourceList = self.fetch("type").await?;
        Ok(list
            .results
            .into_iter()
            .map(|r| r.name)
            .filter(|name| !EMPTY_TYPES.contains(&name.as_str()))
            .collect())
    }
}
