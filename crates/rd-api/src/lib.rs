//! PokeAPI access for RotomDex.
//!
//! This crate owns every network call the browser makes:
//!
//! - [`upstream`] defines the [`Upstream`] seam and the `reqwest`-backed
//!   [`PokeApi`] implementation
//! - [`cache`] holds resolved details in a bounded LRU map
//! - [`client`] combines the two into [`CachedClient`], the only type the
//!   TUI, CLI, and proxy talk to
//! - [`evolution`] turns a species name into an ordered list of stages
//!
//! Wire formats are private: callers only ever see `rd-core` types.
//!
//! # Cancellation
//!
//! Catalog listing accepts a [`CancellationToken`]. Detail lookups are
//! short and are simply dropped by the caller if no longer wanted.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod cache;
pub mod client;
pub mod error;
pub mod evolution;
pub mod stats;
pub mod upstream;
mod wire;

pub use cache::DetailsCache;
pub use client::CachedClient;
pub use error::ApiError;
pub use evolution::EvolutionChainResolver;
pub use stats::{FetchStats, FetchStatsSnapshot};
pub use tokio_util::sync::CancellationToken;
pub use upstream::{PokeApi, Upstream};
