//! Event types for the TUI event loop.
//!
//! # Event Sources
//!
//! - **Terminal**: key presses, mouse events, window resizing
//! - **Worker**: results of background fetches, sent back over the same
//!   channel (see [`crate::worker`])
//! - **Timer**: periodic tick and render events, and the delayed
//!   [`Event::LoadMoreReady`]
//!
//! Fetch results can arrive in any order. Each carries enough context (kind,
//! name, type, generation) for the app to discard it if it is stale.

use crossterm::event::{KeyEvent, MouseEvent};
use rd_api::ApiError;
use rd_core::{CatalogIndex, CatalogKind, EntityDetails, EvolutionStage, FxHashSet, Generation};

/// Events that can be processed by the TUI.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {
    /// A key press event from the terminal.
    Key(KeyEvent),

    /// A mouse event from the terminal.
    Mouse(MouseEvent),

    /// Terminal window was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Periodic tick for status expiry.
    Tick,

    /// Signal to render a new frame.
    Render,

    /// Focus gained by the terminal window.
    FocusGained,

    /// Focus lost by the terminal window.
    FocusLost,

    /// A catalog index finished loading.
    IndexLoaded {
        /// The catalog that was listed.
        kind: CatalogKind,
        /// The index, or why it could not be fetched.
        result: Result<CatalogIndex, ApiError>,
    },

    /// Details for one entry finished loading.
    DetailLoaded {
        /// The entry's catalog.
        kind: CatalogKind,
        /// The name that was requested.
        name: String,
        /// The details, or why they could not be fetched.
        result: Result<EntityDetails, ApiError>,
    },

    /// An evolution chain finished resolving.
    EvolutionLoaded {
        /// The species that was resolved.
        species: String,
        /// The stages, or why the chain could not be fetched.
        result: Result<Vec<EvolutionStage>, ApiError>,
    },

    /// Members of a type finished loading.
    TypeMembersLoaded {
        /// The type that was requested.
        type_name: String,
        /// Member names, or why they could not be fetched.
        result: Result<FxHashSet<String>, ApiError>,
    },

    /// Upstream members of a generation finished loading.
    GenerationMembersLoaded {
        /// The generation that was requested.
        generation: Generation,
        /// Member species ids, or why they could not be fetched.
        result: Result<FxHashSet<u32>, ApiError>,
    },

    /// The list of type names finished loading.
    TypeNamesLoaded(Result<Vec<String>, ApiError>),

    /// The load-more delay for a catalog has elapsed.
    LoadMoreReady(CatalogKind),
}

impl Event {
    /// Returns `true` if this is a key event.
    #[inline]
    #[must_use]
    pub const fn is_key(&self) -> bool {
        matches!(self, Self::Key(_))
    }

    /// Returns `true` if this is a tick event.
    #[inline]
    #[must_use]
    pub const fn is_tick(&self) -> bool {
        matches!(self, Self::Tick)
    }

    /// Returns `true` if this event carries the result of background work.
    #[inline]
    #[must_use]
    pub const fn is_background(&self) -> bool {
        matches!(
            self,
            Self::IndexLoaded { .. }
                | Self::DetailLoaded { .. }
                | Self::EvolutionLoaded { .. }
                | Self::TypeMembersLoaded { .. }
                | Self::GenerationMembersLoaded { .. }
                | Self::TypeNamesLoaded(_)
                | Self::LoadMoreReady(_)
        )
    }

    /// Returns the key event if this is a Key variant.
    #[inline]
    #[must_use]
    pub const fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }
}
