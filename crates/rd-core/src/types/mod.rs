//! Domain types for RotomDex.
//!
//! # Module Organization
//!
//! - [`entity`] - Lazily fetchable resource references and catalog kinds
//! - [`generation`] - Game generations and their static national-dex ranges
//! - [`evolution`] - Evolution-chain tree, branch policy, and resolved stages
//! - [`details`] - Fully resolved Pokémon and item records
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use rd_core::{CatalogKind, EntityRef, Generation};
//! ```

pub mod details;
pub mod entity;
pub mod evolution;
pub mod generation;

pub use details::{BaseStat, EntityDetails, ItemDetails, PokemonDetails};
pub use entity::{CatalogIndex, CatalogKind, EntityRef};
pub use evolution::{
    BranchPolicy, EvolutionDetail, EvolutionNode, EvolutionStage, ItemSprite, format_chain,
};
pub use generation::{Generation, ParseGenerationError};
