//! Terminal browser for RotomDex using Ratatui.
//!
//! Two catalogs (Pokémon and items) are browsed side by side with a detail
//! pane. The app state is pure; every fetch runs as a background task and
//! reports back over the terminal event channel.
//!
//! # Architecture
//!
//! ```text
//! crates/rd-tui/src/
//!   lib.rs           # Public API exports and the main loop
//!   app.rs           # Application state, key handling, hydration
//!   action.rs        # User actions (commands from key bindings)
//!   effect.rs        # Background work requested by the app
//!   event.rs         # Event types (Key, Mouse, Tick, fetch results)
//!   worker.rs        # Runs effects, sends results as events
//!   tui.rs           # Terminal wrapper with async event streaming
//!   ui.rs            # Main layout rendering orchestration
//!   theme.rs         # Color scheme and type colors
//!   error.rs         # TUI-specific error types
//!   components/
//!     entity_list.rs # EntityListView for the visible slice
//!     detail_pane.rs # DetailPane for the selected entry
//!     header.rs      # HeaderBar with catalog tabs
//!     status_bar.rs  # StatusBar with counters
//!     help.rs        # HelpPanel modal overlay
//!     filter_input.rs # Search input overlay
//! ```
//!
//! # Loop
//!
//! ```text
//! draw → next_event ─┬─ Key/Mouse → App::handle_key → Action ─┐
//!                    ├─ Tick / Resize ─────────────────────────┤
//!                    └─ fetch result → App::handle_loaded ─────┤
//!                                                              ▼
//!                        Worker::spawn ◄── App::take_effects ◄── App::update
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod action;
pub mod app;
pub mod components;
pub mod effect;
pub mod error;
pub mod event;
pub mod theme;
pub mod tui;
pub mod ui;
pub mod worker;

use std::sync::Arc;

use rd_api::{CachedClient, PokeApi};
use rd_core::{CatalogKind, Config};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub use action::Action;
pub use app::{
    App, AppMode, CatalogTab, DetailPaneState, EvolutionView, Focus, IndexState, ListState,
    StatusMessage,
};
pub use effect::Effect;
pub use error::TuiError;
pub use event::Event;
pub use theme::Theme;
pub use tui::Tui;
pub use worker::Worker;

/// Runs the browser until the user quits, starting on the `start` catalog.
///
/// The client's cache becomes the app's details cache, so anything fetched
/// before the browser started is shown immediately.
///
/// # Errors
///
/// Returns an error if the terminal cannot be initialized or restored, or
/// if the tick rate is zero.
///
/// # Examples
///
/// ```no_run
/// use rd_api::CachedClient;
/// use rd_core::{CatalogKind, Config};
/// use rd_tui::{Theme, run};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let client = CachedClient::from_config(&config)?;
/// let theme = Theme::from_scheme(config.tui.color_scheme);
/// run(config, client, theme, CatalogKind::Pokemon).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run(
    config: Config,
    client: CachedClient<PokeApi>,
    theme: Theme,
    start: CatalogKind,
) -> Result<(), TuiError> {
    if config.tui.tick_rate_ms == 0 {
        return Err(TuiError::config("tick_rate_ms must be greater than zero"));
    }
    // tick_rate_ms is a small UI timing value, precision loss is acceptable
    #[allow(clippy::cast_precision_loss)]
    let tick_rate = 1000.0 / config.tui.tick_rate_ms as f64;

    let mut tui = Tui::new(tick_rate)?.with_frame_rate(config.tui.frame_rate);

    let client = Arc::new(client);
    let shutdown = CancellationToken::new();
    let worker = Worker::new(
        Arc::clone(&client),
        tui.event_sender(),
        shutdown.clone(),
        config.evolution.branch_policy,
    );
    let mut app = App::new(config, Arc::clone(client.cache()));
    if app.active() != start {
        app.update(Action::SwitchCatalog);
    }

    tui.enter()?;
    app.set_terminal_size(tui.size());

    info!("Entering main event loop");
    let result = run_event_loop(&mut tui, &mut app, &worker, &theme).await;

    // Abort the catalog listings; detail fetches finish and are dropped.
    shutdown.cancel();
    tui.exit()?;

    let stats = client.stats();
    info!(
        requests = stats.requests,
        failures = stats.failures,
        hit_rate = stats.hit_rate(),
        "browser closed"
    );
    result
}

/// Runs the main event loop.
async fn run_event_loop(
    tui: &mut Tui,
    app: &mut App,
    worker: &Worker,
    theme: &Theme,
) -> Result<(), TuiError> {
    loop {
        for effect in app.take_effects() {
            worker.spawn(effect);
        }

        tui.draw(|frame| ui::render(app, frame, theme))?;

        let Some(event) = tui.next_event().await else {
            return Err(TuiError::ChannelClosed);
        };

        let action = match event {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Resize { width, height } => {
                app.set_terminal_size(ratatui::layout::Rect::new(0, 0, width, height));
                Action::Render
            }
            Event::Tick => {
                app.tick();
                Action::None
            }
            Event::Render => Action::Render,
            Event::FocusGained | Event::FocusLost => Action::None,
            background => app.handle_loaded(background),
        };

        app.update(action);

        if app.should_quit {
            debug!("Quit requested");
            return Ok(());
        }
    }
}
