//! Configuration structures for RotomDex.
//!
//! This module provides configuration types for all components of the application:
//!
//! - [`ApiConfig`] - Upstream base URL, catalog listing limit, request timeout
//! - [`PagerConfig`] - Page sizes and load-more behaviour
//! - [`CacheConfig`] - Details cache capacity
//! - [`EvolutionConfig`] - How branching evolution chains are flattened
//! - [`TuiConfig`] - Terminal UI settings (tick rate, frame rate, colors)
//! - [`ProxyConfig`] - Proxy listen address
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`]; a JSON file only needs to
//! name the fields it changes.

use std::net::SocketAddr;
use std::time::Duration;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{BranchPolicy, CatalogKind};

/// Color scheme for the TUI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ColorScheme {
    /// Automatically detect based on terminal settings.
    #[default]
    Auto,
    /// Light color scheme (dark text on light background).
    Light,
    /// Dark color scheme (light text on dark background).
    Dark,
}

/// Upstream API settings.
///
/// # Examples
///
/// ```
/// use rd_core::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
/// assert_eq!(config.catalog_limit, 100_000);
/// assert!(config.timeout().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,

    /// `limit` query parameter used when fetching a catalog index.
    ///
    /// Large enough to fetch the whole catalog in one request.
    pub catalog_limit: u32,

    /// Per-request timeout in milliseconds. `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_owned(),
            catalog_limit: 100_000,
            timeout_ms: None,
        }
    }
}

impl ApiConfig {
    /// Returns the request timeout, if one is configured.
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Catalog pagination settings.
///
/// # Examples
///
/// ```
/// use rd_core::{CatalogKind, PagerConfig};
///
/// let config = PagerConfig::default();
/// assert_eq!(config.initial_page_size(CatalogKind::Pokemon), 20);
/// assert_eq!(config.initial_page_size(CatalogKind::Item), 24);
/// assert_eq!(config.increment, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Initial visible count for the Pokémon catalog.
    pub pokemon_page_size: usize,

    /// Initial visible count for the item catalog.
    pub item_page_size: usize,

    /// How many entries each load-more step adds.
    pub increment: usize,

    /// Artificial delay before a load-more step is applied, in milliseconds.
    pub load_delay_ms: u64,

    /// Distance from the end of the visible slice at which load-more triggers.
    pub scroll_threshold: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            pokemon_page_size: 20,
            item_page_size: 24,
            increment: 20,
            load_delay_ms: 300,
            scroll_threshold: 3,
        }
    }
}

impl PagerConfig {
    /// Returns the initial page size for a catalog.
    #[inline]
    #[must_use]
    pub const fn initial_page_size(&self, kind: CatalogKind) -> usize {
        match kind {
            CatalogKind::Pokemon => self.pokemon_page_size,
            CatalogKind::Item => self.item_page_size,
        }
    }

    /// Returns the load-more delay.
    #[inline]
    #[must_use]
    pub const fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}

/// Details cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of detail records kept before the least recently used
    /// one is evicted.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 512 }
    }
}

/// Evolution chain settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// How branching chains are flattened.
    pub branch_policy: BranchPolicy,
}

/// Configuration for the terminal user interface.
///
/// # Examples
///
/// ```
/// use rd_core::{TuiConfig, ColorScheme};
///
/// let config = TuiConfig::default();
/// assert_eq!(config.tick_rate_ms, 250);
/// assert_eq!(config.color_scheme, ColorScheme::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds (status expiry, load-more polling).
    pub tick_rate_ms: u64,

    /// Render rate in frames per second.
    pub frame_rate: f64,

    /// Color scheme for the interface.
    pub color_scheme: ColorScheme,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            frame_rate: 30.0,
            color_scheme: ColorScheme::Auto,
        }
    }
}

/// Proxy server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Address the proxy listens on.
    pub bind_address: SocketAddr,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

/// Root configuration for RotomDex.
///
/// # Examples
///
/// ```
/// use rd_core::Config;
///
/// let config = Config::default();
/// assert!(config.validate().is_ok());
///
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// assert!(json.contains("pokeapi.co"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream API configuration.
    pub api: ApiConfig,

    /// Pagination configuration.
    pub pager: PagerConfig,

    /// Details cache configuration.
    pub cache: CacheConfig,

    /// Evolution chain configuration.
    pub evolution: EvolutionConfig,

    /// Terminal UI configuration.
    pub tui: TuiConfig,

    /// Proxy configuration.
    pub proxy: ProxyConfig,
}

impl Config {
    /// Loads and validates a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `path` does not exist,
    /// [`ConfigError::Io`] or [`ConfigError::Parse`] if it cannot be read,
    /// and [`ConfigError::InvalidOption`] if validation fails.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_owned()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first bad option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "api.base_url",
                "must not be empty",
            ));
        }
        if self.api.catalog_limit == 0 {
            return Err(ConfigError::invalid_option(
                "api.catalog_limit",
                "must be greater than zero",
            ));
        }

        let sizes = [
            ("pager.pokemon_page_size", self.pager.pokemon_page_size),
            ("pager.item_page_size", self.pager.item_page_size),
            ("pager.increment", self.pager.increment),
            ("cache.capacity", self.cache.capacity),
        ];
        if let Some((option, _)) = sizes.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::invalid_option(
                *option,
                "must be greater than zero",
            ));
        }

        if !(self.tui.frame_rate.is_finite() && self.tui.frame_rate > 0.0) {
            return Err(ConfigError::invalid_option(
                "tui.frame_rate",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}
