//! Background work requested by the app.
//!
//! The app never performs I/O itself. State changes that need data push an
//! [`Effect`]; the event loop drains them after every update and hands them
//! to the [`Worker`](crate::worker::Worker), which reports back with an
//! [`Event`](crate::event::Event).

use std::time::Duration;

use rd_core::{CatalogKind, Generation};

/// One unit of background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// List a catalog. Cancelled when the browser exits.
    FetchIndex(CatalogKind),

    /// Fetch details for one entry.
    FetchDetails {
        /// The entry's catalog.
        kind: CatalogKind,
        /// The entry name.
        name: String,
    },

    /// Resolve the evolution chain of a species.
    ResolveEvolution {
        /// Species name.
        species: String,
    },

    /// Fetch the members of a type.
    FetchTypeMembers(String),

    /// Fetch the upstream members of a generation.
    FetchGenerationMembers(Generation),

    /// Fetch the list of type names.
    FetchTypeNames,

    /// Wait, then report that a load-more can complete.
    LoadMoreAfter {
        /// The catalog whose pager is pending.
        kind: CatalogKind,
        /// How long to wait.
        delay: Duration,
    },
}

impl Effect {
    /// Returns `true` if this effect performs a network request.
    #[inline]
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        !matches!(self, Self::LoadMoreAfter { .. })
    }
}
