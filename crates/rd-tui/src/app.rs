//! Application state and lifecycle management.
//!
//! [`App`] owns everything the browser shows and never performs I/O. Work
//! it needs done is queued as [`Effect`]s and drained by the event loop with
//! [`App::take_effects`]; results come back as [`Event`]s through
//! [`App::handle_loaded`].
//!
//! # Architecture
//!
//! ```text
//! App
//!  ├── cache: Arc<DetailsCache>    # shared with the API client
//!  ├── active: CatalogKind         # which tab is shown
//!  ├── pokemon / items: CatalogTab
//!  │    ├── catalog: Catalog       # index, filter, pager
//!  │    ├── list: ListState        # selection and scroll
//!  │    └── index_state: IndexState
//!  ├── evolutions: species → EvolutionView
//!  ├── in_flight / fetched / failed # detail hydration bookkeeping
//!  ├── mode: AppMode, focus: Focus
//!  └── status: Option<StatusMessage>
//! ```
//!
//! # Hydration
//!
//! After every change to the visible slice, [`App`] compares the visible
//! names against the cache and the in-flight set and queues one
//! [`Effect::FetchDetails`] per missing name. A name whose fetch failed
//! stays in the "Loading" state and is not requested again.
//!
//! The cache is bounded, so a long visible slice can outgrow it. Names that
//! were already delivered once are not requested again in bulk; only the
//! selected entry is fetched again after eviction.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use rd_api::{ApiError, DetailsCache};
use rd_catalog::Catalog;
use rd_core::{
    CatalogIndex, CatalogKind, Config, EntityDetails, EntityRef, EvolutionStage, FxHashMap,
    FxHashSet, Generation,
};
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::effect::Effect;
use crate::event::Event;

/// The current mode of the application UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal browsing mode.
    #[default]
    Normal,

    /// Search input mode.
    Filtering,

    /// Help panel is displayed.
    Help,
}

/// Which panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Entry list is focused.
    #[default]
    List,

    /// Detail pane is focused.
    Details,
}

impl Focus {
    /// Toggles between `List` and `Details`.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::List => Self::Details,
            Self::Details => Self::List,
        }
    }
}

/// Selection and scroll state for the entry list.
///
/// Positions are into the catalog's visible slice. Navigation stops at
/// either end rather than wrapping, so holding "down" runs into the
/// load-more trigger.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected position (if any).
    pub selected: Option<usize>,

    /// First rendered position.
    pub scroll_offset: usize,

    /// Height of the list area in rows (set during render).
    pub visible_height: usize,
}

impl ListState {
    /// Creates a new list state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves selection to the next entry.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        });
        self.ensure_visible();
    }

    /// Moves selection to the previous entry.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
        self.ensure_visible();
    }

    /// Moves selection to the first entry.
    pub fn select_first(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
        } else {
            self.selected = Some(0);
            self.scroll_offset = 0;
        }
    }

    /// Moves selection to the last entry.
    pub fn select_last(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
        } else {
            self.selected = Some(len - 1);
            self.ensure_visible();
        }
    }

    /// Moves selection down by one page.
    pub fn page_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let page_size = self.visible_height.max(1);
        self.selected = Some(match self.selected {
            Some(i) => (i + page_size).min(len - 1),
            None => page_size.min(len - 1),
        });
        self.ensure_visible();
    }

    /// Moves selection up by one page.
    pub fn page_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let page_size = self.visible_height.max(1);
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(page_size)));
        self.ensure_visible();
    }

    /// Selects a specific position.
    pub fn select(&mut self, index: usize, len: usize) {
        if index < len {
            self.selected = Some(index);
            self.ensure_visible();
        }
    }

    /// Selects the first entry (if any) and scrolls to the top.
    pub fn reset(&mut self, len: usize) {
        self.selected = (len > 0).then_some(0);
        self.scroll_offset = 0;
    }

    /// Keeps the selection inside `0..len` after the slice shrank or grew.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            self.scroll_offset = 0;
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.min(len - 1)));
        self.ensure_visible();
    }

    fn ensure_visible(&mut self) {
        let height = self.visible_height.max(1);
        if let Some(selected) = self.selected {
            if selected < self.scroll_offset {
                self.scroll_offset = selected;
            } else if selected >= self.scroll_offset + height {
                self.scroll_offset = selected + 1 - height;
            }
        }
    }
}

/// Scroll state for the detail pane.
#[derive(Debug, Clone, Default)]
pub struct DetailPaneState {
    /// Scroll offset within the detail view.
    pub scroll_offset: usize,
}

impl DetailPaneState {
    /// Scrolls down one line. Clamped during render.
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    /// Scrolls up one line.
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

/// Status message to display in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text.
    pub text: String,

    /// When the message was created.
    pub timestamp: Instant,

    /// Whether this is an error message.
    pub is_error: bool,
}

impl StatusMessage {
    /// Creates a new info message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: false,
        }
    }

    /// Creates a new error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            timestamp: Instant::now(),
            is_error: true,
        }
    }

    /// Returns `true` once the message is older than 5 seconds.
    #[must_use]
    pub fn should_hide(&self) -> bool {
        self.timestamp.elapsed().as_secs() > 5
    }
}

/// Loading state of a catalog index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IndexState {
    /// The listing request is in flight.
    #[default]
    Loading,
    /// The index is loaded.
    Ready,
    /// The listing failed; `r` retries.
    Failed(String),
}

/// Resolution state of one species' evolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvolutionView {
    /// The chain is being resolved.
    Loading,
    /// Resolved stages, base form first.
    Ready(Vec<EvolutionStage>),
    /// Resolution failed.
    Failed(String),
}

/// One browsable catalog tab.
#[derive(Debug, Clone)]
pub struct CatalogTab {
    /// Index, filter, and pager.
    pub catalog: Catalog,
    /// Selection within the visible slice.
    pub list: ListState,
    /// Whether the index has arrived.
    pub index_state: IndexState,
}

impl CatalogTab {
    fn new(kind: CatalogKind, config: &Config) -> Self {
        Self {
            catalog: Catalog::new(kind, &config.pager),
            list: ListState::new(),
            index_state: IndexState::Loading,
        }
    }

    /// Returns the selected visible entry.
    #[must_use]
    pub fn selected(&self) -> Option<&EntityRef> {
        self.list.selected.and_then(|i| self.catalog.visible_at(i))
    }
}

type EntryKey = (CatalogKind, String);

/// The main application state.
pub struct App {
    /// The configuration.
    pub config: Config,

    /// Details shared with the API client.
    cache: Arc<DetailsCache>,

    /// Which catalog is shown.
    active: CatalogKind,

    pokemon: CatalogTab,
    items: CatalogTab,

    /// Known Pokémon types, for cycling the type filter.
    type_names: Option<Vec<String>>,

    /// Evolution chains by species.
    evolutions: FxHashMap<String, EvolutionView>,

    /// Detail requests that have not reported back yet.
    in_flight: FxHashSet<EntryKey>,

    /// Detail requests that succeeded at least once this session.
    fetched: FxHashSet<EntryKey>,

    /// Detail requests that failed; not retried this session.
    failed: FxHashSet<EntryKey>,

    /// Background work waiting to be started.
    effects: Vec<Effect>,

    /// Current UI mode.
    pub mode: AppMode,

    /// Which panel has focus.
    pub focus: Focus,

    /// Detail pane widget state.
    pub detail_state: DetailPaneState,

    /// Status message to display.
    pub status: Option<StatusMessage>,

    /// Whether the application should quit.
    pub should_quit: bool,

    /// Terminal size (updated on resize).
    pub terminal_size: Rect,
}

impl App {
    /// Creates the app and queues the initial listing requests.
    #[must_use]
    pub fn new(config: Config, cache: Arc<DetailsCache>) -> Self {
        let pokemon = CatalogTab::new(CatalogKind::Pokemon, &config);
        let items = CatalogTab::new(CatalogKind::Item, &config);
        Self {
            config,
            cache,
            active: CatalogKind::Pokemon,
            pokemon,
            items,
            type_names: None,
            evolutions: FxHashMap::default(),
            in_flight: FxHashSet::default(),
            fetched: FxHashSet::default(),
            failed: FxHashSet::default(),
            effects: vec![
                Effect::FetchIndex(CatalogKind::Pokemon),
                Effect::FetchIndex(CatalogKind::Item),
                Effect::FetchTypeNames,
            ],
            mode: AppMode::Normal,
            focus: Focus::List,
            detail_state: DetailPaneState::default(),
            status: Some(StatusMessage::info("Loading catalogs…")),
            should_quit: false,
            terminal_size: Rect::default(),
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handles a key event and returns the resulting action.
    #[must_use]
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Filtering => self.handle_filter_key(key),
            AppMode::Help => Self::handle_help_key(key),
        }
    }

    fn handle_normal_key(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('j') | KeyCode::Down => Action::NextItem,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousItem,
            KeyCode::Home => Action::FirstItem,
            KeyCode::Char('G') | KeyCode::End => Action::LastItem,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Tab | KeyCode::BackTab => Action::SwitchCatalog,
            KeyCode::Char('h') | KeyCode::Left => Action::FocusList,
            KeyCode::Char('l') | KeyCode::Right => Action::FocusDetails,
            KeyCode::Enter => Action::ToggleFocus,
            KeyCode::Char('/') => Action::EnterFilterMode,
            KeyCode::Char('t') => Action::CycleTypeFilter,
            KeyCode::Char('g') => Action::CycleGenerationFilter,
            KeyCode::Char('r') => Action::ReloadIndex,
            KeyCode::Esc => {
                if self.active_tab().catalog.filter().is_active() {
                    Action::ClearFilter
                } else if self.focus == Focus::Details {
                    Action::FocusList
                } else {
                    Action::None
                }
            }
            _ => Action::None,
        }
    }

    fn handle_filter_key(&self, key: KeyEvent) -> Action {
        let current = &self.active_tab().catalog.filter().search_text;
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::ExitFilterMode,
            KeyCode::Backspace => {
                let mut text = current.clone();
                text.pop();
                Action::SetSearch(text)
            }
            KeyCode::Char(c) => Action::SetSearch(format!("{current}{c}")),
            _ => Action::None,
        }
    }

    fn handle_help_key(key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Action::HideHelp,
            _ => Action::None,
        }
    }

    /// Handles a mouse event. The wheel moves the selection.
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent) -> Action {
        match event.kind {
            MouseEventKind::ScrollDown => Action::NextItem,
            MouseEventKind::ScrollUp => Action::PreviousItem,
            _ => Action::None,
        }
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Updates the application state based on an action.
    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::NextItem if self.focus == Focus::Details => self.detail_state.scroll_down(),
            Action::PreviousItem if self.focus == Focus::Details => self.detail_state.scroll_up(),
            Action::NextItem => self.navigate(ListState::select_next),
            Action::PreviousItem => self.navigate(ListState::select_previous),
            Action::FirstItem => self.navigate(ListState::select_first),
            Action::LastItem => self.navigate(ListState::select_last),
            Action::PageDown => self.navigate(ListState::page_down),
            Action::PageUp => self.navigate(ListState::page_up),
            Action::SelectItem(idx) => self.navigate(|list, len| list.select(idx, len)),

            Action::ToggleFocus => self.focus = self.focus.toggle(),
            Action::FocusList => self.focus = Focus::List,
            Action::FocusDetails => self.focus = Focus::Details,

            Action::SwitchCatalog => self.switch_catalog(),
            Action::ReloadIndex => self.reload_index(),

            Action::EnterFilterMode => self.mode = AppMode::Filtering,
            Action::ExitFilterMode => self.mode = AppMode::Normal,
            Action::SetSearch(text) => {
                let kind = self.active;
                self.tab_mut(kind).catalog.set_search(text);
                self.filter_changed(kind);
            }
            Action::ClearFilter => {
                let kind = self.active;
                self.tab_mut(kind).catalog.clear_filter();
                self.mode = AppMode::Normal;
                self.filter_changed(kind);
            }
            Action::CycleTypeFilter => self.cycle_type_filter(),
            Action::CycleGenerationFilter => self.cycle_generation_filter(),

            Action::ToggleHelp => {
                self.mode = if self.mode == AppMode::Help {
                    AppMode::Normal
                } else {
                    AppMode::Help
                };
            }
            Action::HideHelp => self.mode = AppMode::Normal,


            Action::Render | Action::Tick | Action::None => {}
        }
    }

    /// Handles a tick event: expires stale status messages.
    pub fn tick(&mut self) {
        if self.status.as_ref().is_some_and(StatusMessage::should_hide) {
            self.status = None;
        }
    }

    /// Applies the result of background work.
    ///
    /// Returns [`Action::Render`] if the event changed anything visible.
    pub fn handle_loaded(&mut self, event: Event) -> Action {
        match event {
            Event::IndexLoaded { kind, result } => self.index_loaded(kind, result),
            Event::DetailLoaded { kind, name, result } => self.detail_loaded(kind, name, result),
            Event::EvolutionLoaded { species, result } => {
                let view = match result {
                    Ok(stages) => EvolutionView::Ready(stages),
                    Err(e) => {
                        warn!(species = %species, error = %e, "evolution chain failed");
                        EvolutionView::Failed(e.to_string())
                    }
                };
                self.evolutions.insert(species, view);
            }
            Event::TypeMembersLoaded { type_name, result } => {
                self.type_members_loaded(&type_name, result);
            }
            Event::GenerationMembersLoaded { generation, result } => {
                self.generation_members_loaded(generation, result);
            }
            Event::TypeNamesLoaded(result) => match result {
                Ok(names) => {
                    debug!(count = names.len(), "type names loaded");
                    self.type_names = Some(names);
                }
                Err(e) => {
                    warn!(error = %e, "type names failed");
                    self.status = Some(StatusMessage::error(format!("could not load types: {e}")));
                }
            },
            Event::LoadMoreReady(kind) => {
                let tab = self.tab_mut(kind);
                tab.catalog.complete_load();
                if kind == self.active {
                    self.hydrate(kind);
                }
            }
            _ => return Action::None,
        }
        Action::Render
    }

    /// Drains the queued background work.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Updates the terminal size.
    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }

    /// Records the list height measured during render, for paging.
    pub fn set_list_height(&mut self, height: usize) {
        let kind = self.active;
        self.tab_mut(kind).list.visible_height = height;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the active catalog kind.
    #[inline]
    #[must_use]
    pub const fn active(&self) -> CatalogKind {
        self.active
    }

    /// Returns the tab for `kind`.
    #[must_use]
    pub const fn tab(&self, kind: CatalogKind) -> &CatalogTab {
        match kind {
            CatalogKind::Pokemon => &self.pokemon,
            CatalogKind::Item => &self.items,
        }
    }

    /// Returns the active tab.
    #[must_use]
    pub const fn active_tab(&self) -> &CatalogTab {
        self.tab(self.active)
    }

    /// Returns the selected entry of the active tab.
    #[must_use]
    pub fn selected_entity(&self) -> Option<&EntityRef> {
        self.active_tab().selected()
    }

    /// Returns cached details for an entry.
    #[must_use]
    pub fn details(&self, kind: CatalogKind, name: &str) -> Option<EntityDetails> {
        self.cache.get(kind, name)
    }

    /// Returns cached details for the selected entry.
    #[must_use]
    pub fn selected_details(&self) -> Option<EntityDetails> {
        self.selected_entity()
            .and_then(|entity| self.details(self.active, &entity.name))
    }

    /// Returns the evolution state of `species`, if it was ever requested.
    #[must_use]
    pub fn evolution(&self, species: &str) -> Option<&EvolutionView> {
        self.evolutions.get(species)
    }

    /// Returns the known type names, once loaded.
    #[must_use]
    pub fn type_names(&self) -> Option<&[String]> {
        self.type_names.as_deref()
    }

    /// Returns the number of detail requests still in flight.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    const fn tab_mut(&mut self, kind: CatalogKind) -> &mut CatalogTab {
        match kind {
            CatalogKind::Pokemon => &mut self.pokemon,
            CatalogKind::Item => &mut self.items,
        }
    }

    fn navigate(&mut self, step: impl FnOnce(&mut ListState, usize)) {
        let kind = self.active;
        let tab = self.tab_mut(kind);
        let len = tab.catalog.visible_len();
        step(&mut tab.list, len);
        self.selection_changed();
    }

    fn selection_changed(&mut self) {
        self.detail_state = DetailPaneState::default();
        self.hydrate_selected();
        self.maybe_load_more();
        self.request_evolution();
    }

    fn maybe_load_more(&mut self) {
        let kind = self.active;
        let tab = self.tab_mut(kind);
        let Some(selected) = tab.list.selected else {
            return;
        };
        if !tab.catalog.should_load_more(selected) {
            return;
        }
        if let Some(delay) = tab.catalog.begin_load() {
            debug!(?kind, selected, "load more triggered");
            self.effects.push(Effect::LoadMoreAfter { kind, delay });
        }
    }

    fn switch_catalog(&mut self) {
        self.active = self.active.toggle();
        self.mode = AppMode::Normal;
        self.focus = Focus::List;
        self.detail_state = DetailPaneState::default();
        debug!(kind = ?self.active, "switched catalog");
        self.hydrate(self.active);
        self.request_evolution();
    }

    fn reload_index(&mut self) {
        let kind = self.active;
        let tab = self.tab_mut(kind);
        if !matches!(tab.index_state, IndexState::Failed(_)) {
            return;
        }
        tab.index_state = IndexState::Loading;
        self.effects.push(Effect::FetchIndex(kind));
        self.status = Some(StatusMessage::info(format!("Reloading {}…", kind.label())));
    }

    fn cycle_type_filter(&mut self) {
        let kind = self.active;
        if !kind.supports_species_filters() {
            self.status = Some(StatusMessage::info("Type filter applies to Pokémon only"));
            return;
        }
        let Some(types) = self.type_names.as_deref() else {
            self.status = Some(StatusMessage::info("Types are still loading"));
            return;
        };

        let mut next = self.tab(kind).catalog.filter().clone();
        next.cycle_type(types);
        let type_name = next.type_filter;

        self.tab_mut(kind).catalog.set_type(type_name.clone());
        if let Some(type_name) = type_name {
            self.effects.push(Effect::FetchTypeMembers(type_name));
        }
        self.filter_changed(kind);
    }

    fn cycle_generation_filter(&mut self) {
        let kind = self.active;
        if !kind.supports_species_filters() {
            self.status = Some(StatusMessage::info(
                "Generation filter applies to Pokémon only",
            ));
            return;
        }

        let mut next = self.tab(kind).catalog.filter().clone();
        next.cycle_generation();
        let generation = next.generation_filter;

        self.tab_mut(kind).catalog.set_generation(generation);
        if let Some(generation) = generation {
            self.effects.push(Effect::FetchGenerationMembers(generation));
        }
        self.filter_changed(kind);
    }

    /// The filter of `kind` changed: the pager was reset by the catalog,
    /// so the selection goes back to the top.
    fn filter_changed(&mut self, kind: CatalogKind) {
        let tab = self.tab_mut(kind);
        let len = tab.catalog.visible_len();
        tab.list.reset(len);
        if kind == self.active {
            self.detail_state = DetailPaneState::default();
            self.hydrate(kind);
            self.request_evolution();
        }
    }

    /// Membership arrived: the filtered list changed but the pager did not.
    fn members_changed(&mut self, kind: CatalogKind) {
        let tab = self.tab_mut(kind);
        let len = tab.catalog.visible_len();
        tab.list.clamp(len);
        if kind == self.active {
            self.hydrate(kind);
            self.request_evolution();
        }
    }

    /// Queues a detail fetch for every visible entry that is neither cached,
    /// in flight, already delivered once, nor known to fail.
    fn hydrate(&mut self, kind: CatalogKind) {
        let catalog = match kind {
            CatalogKind::Pokemon => &self.pokemon.catalog,
            CatalogKind::Item => &self.items.catalog,
        };
        let mut queued = 0_usize;
        for entity in catalog.visible() {
            let key = (kind, entity.name.clone());
            if self.in_flight.contains(&key)
                || self.fetched.contains(&key)
                || self.failed.contains(&key)
                || self.cache.contains(kind, &entity.name)
            {
                continue;
            }
            self.in_flight.insert(key);
            self.effects.push(Effect::FetchDetails {
                kind,
                name: entity.name.clone(),
            });
            queued += 1;
        }
        if queued > 0 {
            debug!(?kind, queued, in_flight = self.in_flight.len(), "hydrating");
        }
        if kind == self.active {
            self.hydrate_selected();
        }
    }

    /// Fetches the selected entry again if the cache evicted it.
    fn hydrate_selected(&mut self) {
        let kind = self.active;
        let Some(name) = self.selected_entity().map(|entity| entity.name.clone()) else {
            return;
        };
        let key = (kind, name);
        if self.in_flight.contains(&key)
            || self.failed.contains(&key)
            || self.cache.contains(kind, &key.1)
        {
            return;
        }
        debug!(?kind, name = %key.1, "fetching selected details");
        self.effects.push(Effect::FetchDetails {
            kind,
            name: key.1.clone(),
        });
        self.in_flight.insert(key);
    }

    /// Queues evolution resolution for the selected Pokémon once its
    /// details (and so its species) are known.
    fn request_evolution(&mut self) {
        if self.active != CatalogKind::Pokemon {
            return;
        }
        let Some(species) = self
            .selected_details()
            .and_then(|d| d.as_pokemon().map(|p| p.species.clone()))
        else {
            return;
        };
        if species.is_empty() || self.evolutions.contains_key(&species) {
            return;
        }
        self.evolutions
            .insert(species.clone(), EvolutionView::Loading);
        self.effects.push(Effect::ResolveEvolution { species });
    }

    fn index_loaded(&mut self, kind: CatalogKind, result: Result<CatalogIndex, ApiError>) {
        match result {
            Ok(index) => {
                let count = index.len();
                info!(?kind, count, "catalog index loaded");
                let tab = self.tab_mut(kind);
                tab.catalog.set_index(index);
                tab.index_state = IndexState::Ready;
                let len = tab.catalog.visible_len();
                tab.list.reset(len);
                self.status = Some(StatusMessage::info(format!(
                    "Loaded {count} {}",
                    kind.label()
                )));
                if kind == self.active {
                    self.hydrate(kind);
                }
            }
            Err(e) if e.is_cancelled() => debug!(?kind, "catalog index fetch cancelled"),
            Err(e) => {
                warn!(?kind, error = %e, "catalog index failed");
                self.tab_mut(kind).index_state = IndexState::Failed(e.to_string());
                self.status = Some(StatusMessage::error(format!(
                    "could not load {}: {e}",
                    kind.label()
                )));
            }
        }
    }

    fn detail_loaded(
        &mut self,
        kind: CatalogKind,
        name: String,
        result: Result<EntityDetails, ApiError>,
    ) {
        let key = (kind, name);
        self.in_flight.remove(&key);
        match result {
            Ok(details) => {
                self.cache.insert(details);
                let selected = self
                    .selected_entity()
                    .is_some_and(|entity| entity.name == key.1);
                if kind == self.active && selected {
                    self.request_evolution();
                }
                self.fetched.insert(key);
            }
            Err(e) => {
                warn!(?kind, name = %key.1, error = %e, "details failed");
                self.failed.insert(key);
            }
        }
    }

    fn type_members_loaded(&mut self, type_name: &str, result: Result<FxHashSet<String>, ApiError>) {
        match result {
            Ok(members) => {
                self.pokemon.catalog.set_type_members(type_name, members);
                self.members_changed(CatalogKind::Pokemon);
            }
            Err(e) => {
                warn!(type_name, error = %e, "type members failed");
                self.status = Some(StatusMessage::error(format!(
                    "could not load {type_name} members: {e}"
                )));
                if self.pokemon.catalog.filter().type_filter.as_deref() == Some(type_name) {
                    self.pokemon.catalog.set_type(None);
                    self.filter_changed(CatalogKind::Pokemon);
                }
            }
        }
    }

    fn generation_members_loaded(
        &mut self,
        generation: Generation,
        result: Result<FxHashSet<u32>, ApiError>,
    ) {
        match result {
            Ok(members) => {
                self.pokemon
                    .catalog
                    .set_generation_members(generation, members);
                self.members_changed(CatalogKind::Pokemon);
            }
            // The static id range stays in effect.
            Err(e) => warn!(%generation, error = %e, "generation members failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rd_core::hash::name_set;
    use rd_core::{EvolutionNode, ItemDetails, PokemonDetails};

    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, event: KeyEvent) {
        let action = app.handle_key(event);
        app.update(action);
    }

    fn index_of(names: &[&str]) -> CatalogIndex {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                EntityRef::new(*name, format!("https://pokeapi.co/api/v2/pokemon/{}/", i + 1))
            })
            .collect()
    }

    fn numbered(count: usize) -> CatalogIndex {
        (1..=count)
            .map(|id| {
                EntityRef::new(
                    format!("mon-{id}"),
                    format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
                )
            })
            .collect()
    }

    fn pokemon(name: &str, species: &str) -> EntityDetails {
        EntityDetails::Pokemon(PokemonDetails {
            name: name.to_owned(),
            species: species.to_owned(),
            ..PokemonDetails::default()
        })
    }

    /// An app with no queued startup effects.
    fn app() -> App {
        let mut config = Config::default();
        config.pager.load_delay_ms = 0;
        let mut app = App::new(config, Arc::new(DetailsCache::new(256)));
        app.take_effects();
        app
    }

    fn loaded(app: &mut App, kind: CatalogKind, index: CatalogIndex) -> Vec<Effect> {
        app.handle_loaded(Event::IndexLoaded {
            kind,
            result: Ok(index),
        });
        app.take_effects()
    }

    fn detail_names(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::FetchDetails { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_startup_effects() {
        let mut app = App::new(Config::default(), Arc::new(DetailsCache::default()));
        assert_eq!(
            app.take_effects(),
            [
                Effect::FetchIndex(CatalogKind::Pokemon),
                Effect::FetchIndex(CatalogKind::Item),
                Effect::FetchTypeNames,
            ]
        );
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn test_index_loaded_hydrates_visible_slice_once() {
        let mut app = app();
        let effects = loaded(&mut app, CatalogKind::Pokemon, numbered(151));

        let names = detail_names(&effects);
        assert_eq!(names.len(), 20);
        assert_eq!(names[0], "mon-1");
        assert_eq!(app.in_flight_count(), 20);
        assert_eq!(app.selected_entity().map(|e| e.name.as_str()), Some("mon-1"));

        // Moving within the slice does not re-request anything in flight.
        press(&mut app, key('j'));
        assert!(detail_names(&app.take_effects()).is_empty());
    }

    #[test]
    fn test_inactive_catalog_is_not_hydrated() {
        let mut app = app();
        assert!(loaded(&mut app, CatalogKind::Item, numbered(30)).is_empty());

        press(&mut app, code(KeyCode::Tab));
        assert_eq!(app.active(), CatalogKind::Item);
        assert_eq!(detail_names(&app.take_effects()).len(), 24);
    }

    #[test]
    fn test_detail_results_commit_and_failures_stay_loading() {
        let mut app = app();
        loaded(&mut app, CatalogKind::Pokemon, index_of(&["bulbasaur", "ivysaur"]));

        app.handle_loaded(Event::DetailLoaded {
            kind: CatalogKind::Pokemon,
            name: "bulbasaur".to_owned(),
            result: Ok(pokemon("bulbasaur", "bulbasaur")),
        });
        app.handle_loaded(Event::DetailLoaded {
            kind: CatalogKind::Pokemon,
            name: "ivysaur".to_owned(),
            result: Err(ApiError::status(500, "pokemon/ivysaur")),
        });

        assert!(app.details(CatalogKind::Pokemon, "bulbasaur").is_some());
        assert!(app.details(CatalogKind::Pokemon, "ivysaur").is_none());
        assert_eq!(app.in_flight_count(), 0);

        // Selected bulbasaur now has details, so its chain is requested.
        assert_eq!(
            app.take_effects(),
            [Effect::ResolveEvolution {
                species: "bulbasaur".to_owned()
            }]
        );

        // A filter change re-runs hydration; neither entry is requested again.
        press(&mut app, key('/'));
        press(&mut app, key('s'));
        assert!(detail_names(&app.take_effects()).is_empty());
    }

    #[test]
    fn test_evicted_details_are_not_refetched_in_bulk() {
        let mut config = Config::default();
        config.pager.load_delay_ms = 0;
        let mut app = App::new(config, Arc::new(DetailsCache::new(8)));
        app.take_effects();

        let effects = loaded(&mut app, CatalogKind::Pokemon, numbered(151));
        assert_eq!(detail_names(&effects).len(), 20);
        for id in 1..=20 {
            let name = format!("mon-{id}");
            app.handle_loaded(Event::DetailLoaded {
                kind: CatalogKind::Pokemon,
                result: Ok(pokemon(&name, &name)),
                name,
            });
        }
        app.take_effects();

        // Same slice; only the selected entry, evicted by later results, is
        // requested again.
        app.update(Action::SetSearch("mon".to_owned()));
        let effects = app.take_effects();
        assert_eq!(detail_names(&effects), ["mon-1"]);

        app.handle_loaded(Event::DetailLoaded {
            kind: CatalogKind::Pokemon,
            name: "mon-1".to_owned(),
            result: Ok(pokemon("mon-1", "mon-1")),
        });
        app.take_effects();

        press(&mut app, key('j'));
        let effects = app.take_effects();
        assert_eq!(detail_names(&effects), ["mon-2"]);

        press(&mut app, key('j'));
        let effects = app.take_effects();
        assert_eq!(detail_names(&effects), ["mon-3"]);
        assert_eq!(app.in_flight_count(), 2);
    }

    #[test]
    fn test_generation_members_keep_form_named_entries() {
        let mut app = app();
        let index = vec![
            EntityRef::new("kyogre", "https://pokeapi.co/api/v2/pokemon/382/"),
            EntityRef::new("deoxys-normal", "https://pokeapi.co/api/v2/pokemon/386/"),
            EntityRef::new("turtwig", "https://pokeapi.co/api/v2/pokemon/387/"),
        ];
        loaded(&mut app, CatalogKind::Pokemon, index);
        for _ in 0..3 {
            press(&mut app, key('g'));
        }
        assert_eq!(app.active_tab().catalog.filter().generation_filter, Some(Generation::III));
        assert_eq!(app.active_tab().catalog.filtered_len(), 2);

        app.handle_loaded(Event::GenerationMembersLoaded {
            generation: Generation::III,
            result: Ok([382, 386].into_iter().collect()),
        });
        let visible: Vec<&str> = app
            .active_tab()
            .catalog
            .visible()
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(visible, ["kyogre", "deoxys-normal"]);
    }

    #[test]
    fn test_evolution_requested_once_per_species() {
        let mut app = app();
        loaded(&mut app, CatalogKind::Pokemon, index_of(&["charmander", "charmeleon"]));
        for name in ["charmander", "charmeleon"] {
            app.handle_loaded(Event::DetailLoaded {
                kind: CatalogKind::Pokemon,
                name: name.to_owned(),
                result: Ok(pokemon(name, name)),
            });
        }
        assert_eq!(app.take_effects().len(), 1);
        assert_eq!(app.evolution("charmander"), Some(&EvolutionView::Loading));

        app.handle_loaded(Event::EvolutionLoaded {
            species: "charmander".to_owned(),
            result: Ok(vec![EvolutionStage::from_node(&EvolutionNode::new(
                "charmander",
            ))]),
        });
        assert!(matches!(app.evolution("charmander"), Some(EvolutionView::Ready(s)) if s.len() == 1));

        press(&mut app, key('j'));
        assert_eq!(
            app.take_effects(),
            [Effect::ResolveEvolution {
                species: "charmeleon".to_owned()
            }]
        );
        press(&mut app, key('k'));
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn test_load_more_near_end_of_slice() {
        let mut app = app();
        loaded(&mut app, CatalogKind::Pokemon, numbered(151));
        app.update(Action::SelectItem(15));
        assert!(app.take_effects().is_empty());

        app.update(Action::SelectItem(16));
        let effects = app.take_effects();
        assert_eq!(
            effects,
            [Effect::LoadMoreAfter {
                kind: CatalogKind::Pokemon,
                delay: Duration::ZERO
            }]
        );

        // A second trigger while pending is ignored.
        press(&mut app, key('j'));
        assert!(app.take_effects().is_empty());

        app.handle_loaded(Event::LoadMoreReady(CatalogKind::Pokemon));
        assert_eq!(app.active_tab().catalog.visible_len(), 40);
        let effects = app.take_effects();
        let names = detail_names(&effects);
        assert_eq!(names.len(), 20);
        assert_eq!(names[0], "mon-21");
    }

    #[test]
    fn test_search_resets_pager_and_selection() {
        let mut app = app();
        loaded(
            &mut app,
            CatalogKind::Pokemon,
            index_of(&["bulbasaur", "charmander", "charmeleon", "charizard", "squirtle"]),
        );
        press(&mut app, code(KeyCode::End));

        press(&mut app, key('/'));
        assert_eq!(app.mode, AppMode::Filtering);
        for c in "char".chars() {
            press(&mut app, key(c));
        }
        let tab = app.active_tab();
        assert_eq!(tab.catalog.filtered_len(), 3);
        assert_eq!(tab.list.selected, Some(0));
        assert_eq!(app.selected_entity().map(|e| e.name.as_str()), Some("charmander"));

        press(&mut app, code(KeyCode::Backspace));
        assert_eq!(app.active_tab().catalog.filter().search_text, "cha");

        press(&mut app, code(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);

        // Esc in normal mode clears the filter.
        press(&mut app, code(KeyCode::Esc));
        assert_eq!(app.active_tab().catalog.filtered_len(), 5);
        assert!(!app.active_tab().catalog.filter().is_active());
    }

    #[test]
    fn test_type_filter_waits_for_members() {
        let mut app = app();
        loaded(&mut app, CatalogKind::Pokemon, index_of(&["bulbasaur", "charmander", "pikachu"]));

        press(&mut app, key('t'));
        assert!(app.status.as_ref().is_some_and(|s| s.text.contains("still loading")));

        app.handle_loaded(Event::TypeNamesLoaded(Ok(vec![
            "fire".to_owned(),
            "electric".to_owned(),
        ])));
        press(&mut app, key('t'));
        assert_eq!(
            app.take_effects(),
            [Effect::FetchTypeMembers("fire".to_owned())]
        );
        assert!(app.active_tab().catalog.is_waiting_for_members());
        assert_eq!(app.active_tab().catalog.filtered_len(), 0);
        assert!(app.selected_entity().is_none());

        app.handle_loaded(Event::TypeMembersLoaded {
            type_name: "fire".to_owned(),
            result: Ok(name_set(["charmander", "charizard"])),
        });
        assert_eq!(app.active_tab().catalog.filtered_len(), 1);
        assert_eq!(app.selected_entity().map(|e| e.name.as_str()), Some("charmander"));
    }

    #[test]
    fn test_stale_type_members_are_ignored() {
        let mut app = app();
        loaded(&mut app, CatalogKind::Pokemon, index_of(&["charmander", "pikachu"]));
        app.handle_loaded(Event::TypeNamesLoaded(Ok(vec![
            "fire".to_owned(),
            "electric".to_owned(),
        ])));
        press(&mut app, key('t'));
        press(&mut app, key('t'));
        assert_eq!(
            app.active_tab().catalog.filter().type_filter.as_deref(),
            Some("electric")
        );

        app.handle_loaded(Event::TypeMembersLoaded {
            type_name: "fire".to_owned(),
            result: Ok(name_set(["charmander"])),
        });
        assert_eq!(app.active_tab().catalog.filtered_len(), 0);
    }

    #[test]
    fn test_generation_filter_uses_static_range_first() {
        let mut app = app();
        loaded(&mut app, CatalogKind::Pokemon, numbered(300));

        press(&mut app, key('g'));
        assert_eq!(
            app.take_effects()
                .into_iter()
                .filter(|e| matches!(e, Effect::FetchGenerationMembers(_)))
                .collect::<Vec<_>>(),
            [Effect::FetchGenerationMembers(Generation::I)]
        );
        assert_eq!(app.active_tab().catalog.filtered_len(), 151);

        press(&mut app, key('g'));
        assert_eq!(app.active_tab().catalog.filtered_len(), 100);
    }

    #[test]
    fn test_species_filters_ignored_for_items() {
        let mut app = app();
        press(&mut app, code(KeyCode::Tab));
        press(&mut app, key('g'));
        assert!(app.active_tab().catalog.filter().generation_filter.is_none());
        assert!(app.status.as_ref().is_some_and(|s| s.text.contains("Pokémon only")));
    }

    #[test]
    fn test_cancelled_index_is_silent_and_failure_can_retry() {
        let mut app = app();
        app.status = None;
        app.handle_loaded(Event::IndexLoaded {
            kind: CatalogKind::Pokemon,
            result: Err(ApiError::Cancelled),
        });
        assert!(app.status.is_none());
        assert_eq!(app.active_tab().index_state, IndexState::Loading);

        app.handle_loaded(Event::IndexLoaded {
            kind: CatalogKind::Pokemon,
            result: Err(ApiError::status(503, "pokemon")),
        });
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
        assert!(matches!(app.active_tab().index_state, IndexState::Failed(_)));

        press(&mut app, key('r'));
        assert_eq!(app.take_effects(), [Effect::FetchIndex(CatalogKind::Pokemon)]);
        assert_eq!(app.active_tab().index_state, IndexState::Loading);

        // Nothing to retry once loading.
        press(&mut app, key('r'));
        assert!(app.take_effects().is_empty());
    }

    #[test]
    fn test_item_details_are_cached_per_kind() {
        let mut app = app();
        press(&mut app, code(KeyCode::Tab));
        loaded(&mut app, CatalogKind::Item, index_of(&["potion"]));
        app.handle_loaded(Event::DetailLoaded {
            kind: CatalogKind::Item,
            name: "potion".to_owned(),
            result: Ok(EntityDetails::Item(ItemDetails {
                id: 17,
                name: "potion".to_owned(),
                cost: Some(200),
                category: "healing".to_owned(),
                attributes: Vec::new(),
                effect: None,
                sprite_url: None,
            })),
        });
        let cost = app
            .selected_details()
            .and_then(|d| d.as_item().and_then(|item| item.cost));
        assert_eq!(cost, Some(200));
        assert!(app.details(CatalogKind::Pokemon, "potion").is_none());
    }

    #[test]
    fn test_focus_and_detail_scroll() {
        let mut app = app();
        loaded(&mut app, CatalogKind::Pokemon, numbered(5));
        press(&mut app, key('l'));
        assert_eq!(app.focus, Focus::Details);

        press(&mut app, key('j'));
        press(&mut app, key('j'));
        assert_eq!(app.detail_state.scroll_offset, 2);
        assert_eq!(app.active_tab().list.selected, Some(0));

        press(&mut app, code(KeyCode::Esc));
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app();
        press(&mut app, key('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, key('j'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, code(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Normal);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Action::Quit);
        press(&mut app, key('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_enter_toggles_focus() {
        let mut app = app();
        loaded(&mut app, CatalogKind::Pokemon, numbered(5));
        press(&mut app, code(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Details);
        press(&mut app, code(KeyCode::Enter));
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListState::new();
        state.visible_height = 3;

        state.select_next(0);
        assert!(state.selected.is_none());

        state.select_next(5);
        assert_eq!(state.selected, Some(0));
        state.select_last(5);
        assert_eq!(state.selected, Some(4));
        assert_eq!(state.scroll_offset, 2);

        // No wrap at either end.
        state.select_next(5);
        assert_eq!(state.selected, Some(4));
        state.select_first(5);
        state.select_previous(5);
        assert_eq!(state.selected, Some(0));

        state.page_down(5);
        assert_eq!(state.selected, Some(3));
        state.clamp(2);
        assert_eq!(state.selected, Some(1));
        state.clamp(0);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_list_state_zero_height() {
        let mut state = ListState::new();
        state.select_last(10);
        assert_eq!(state.scroll_offset, 9);
    }

    #[test]
    fn test_status_message() {
        let msg = StatusMessage::info("Loaded 151 Pokémon");
        assert!(!msg.is_error);
        assert!(!msg.should_hide());

        assert!(StatusMessage::error("boom").is_error);
    }
}
