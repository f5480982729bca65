//! User actions for the TUI.
//!
//! Key and mouse events are translated into an [`Action`], which the app
//! then applies to its state:
//!
//! ```text
//! Key/Mouse Event → App::handle_key → Action → App::update
//! ```

/// User-initiated actions in the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Action {
    // =========================================================================
    // Navigation
    // =========================================================================
    /// Move selection to the next entry (or scroll the details down).
    NextItem,

    /// Move selection to the previous entry (or scroll the details up).
    PreviousItem,

    /// Move selection to the first entry.
    FirstItem,

    /// Move selection to the last visible entry.
    LastItem,

    /// Move selection down by one page.
    PageDown,

    /// Move selection up by one page.
    PageUp,

    /// Select a specific visible entry by position.
    SelectItem(usize),

    // =========================================================================
    // Focus and catalogs
    // =========================================================================
    /// Toggle focus between the list and the detail pane.
    ToggleFocus,

    /// Focus the entry list.
    FocusList,

    /// Focus the detail pane.
    FocusDetails,

    /// Switch between the Pokémon and item catalogs.
    SwitchCatalog,

    /// Fetch the active catalog's index again after a failure.
    ReloadIndex,

    // =========================================================================
    // Filtering
    // =========================================================================
    /// Enter filter mode (start typing a search).
    EnterFilterMode,

    /// Leave filter mode, keeping the search text.
    ExitFilterMode,

    /// Replace the search text.
    SetSearch(String),

    /// Clear every filter.
    ClearFilter,

    /// Cycle the type filter through the known types.
    CycleTypeFilter,

    /// Cycle the generation filter I → IX → none.
    CycleGenerationFilter,

    // =========================================================================
    // UI State
    // =========================================================================
    /// Toggle the help panel.
    ToggleHelp,

    /// Hide the help panel.
    HideHelp,

    // =========================================================================
    // Application Control
    // =========================================================================
    /// Quit the application.
    Quit,

    /// Render the UI.
    Render,

    /// Tick (periodic update).
    Tick,

    /// No operation.
    #[default]
    None,
}
