//! Core types, configuration, and errors for RotomDex.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Domain types ([`EntityRef`], [`CatalogKind`], [`Generation`],
//!   [`EvolutionNode`], [`EvolutionStage`], entity details)
//! - Configuration structures ([`Config`] and its sections)
//! - [`ConfigError`] for configuration loading and validation
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)
//!
//! Nothing in here performs I/O except [`Config::load`]; fetching lives in
//! `rd-api` and filtering in `rd-catalog`.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{
    ApiConfig, CacheConfig, ColorScheme, Config, EvolutionConfig, PagerConfig, ProxyConfig,
    TuiConfig,
};
pub use error::ConfigError;
pub use hash::{FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
pub use types::{
    BaseStat, BranchPolicy, CatalogIndex, CatalogKind, EntityDetails, EntityRef, EvolutionDetail,
    EvolutionNode, EvolutionStage, Generation, ItemDetails, ItemSprite, ParseGenerationError,
    PokemonDetails, format_chain,
};
