//! Main UI layout and rendering orchestration.
//!
//! # Layout Structure
//!
//! ```text
//! +------------------------------------------------------------------+
//! | RotomDex │  Pokémon  Items  │ Tab to switch · ? for help          |
//! +------------------------------------------------------------------+
//! | Pokémon (20 of 1302)             | Details                        |
//! | ▸ #025 pikachu      electric     | pikachu  #025                  |
//! |   #026 raichu       electric     | Types       electric           |
//! |        Loading clefairy…         | ─── Evolution ───              |
//! +------------------------------------------------------------------+
//! | NORMAL  Loaded 1302 Pokémon │ 20/1302/1302                        |
//! +------------------------------------------------------------------+
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{App, AppMode, Focus};
use crate::components::{DetailPane, EntityListView, FilterInput, HeaderBar, HelpPanel, StatusBar};
use crate::theme::Theme;

/// Renders the entire UI.
///
/// Takes the app mutably to record the measured list height and the clamped
/// detail scroll offset.
pub fn render(app: &mut App, frame: &mut Frame, theme: &Theme) {
    let area = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = HeaderBar::new(app.active(), theme);
    frame.render_widget(&header, main_chunks[0]);

    render_main_content(app, frame, main_chunks[1], theme);

    let status_bar = StatusBar::new(app, theme);
    frame.render_widget(&status_bar, main_chunks[2]);

    if app.mode == AppMode::Filtering {
        let text = &app.active_tab().catalog.filter().search_text;
        let filter_input = FilterInput::new(text, theme);
        frame.render_widget(&filter_input, centered_rect(50, 3, area));
    }

    if app.mode == AppMode::Help {
        let help_panel = HelpPanel::new(theme);
        frame.render_widget(&help_panel, centered_rect(60, 70, area));
    }
}

/// Renders the list (55%) and the detail pane (45%).
fn render_main_content(app: &mut App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let focus = app.focus;
    let mut list_state = app.active_tab().list.clone();
    {
        let list = EntityListView::new(app, focus == Focus::List, theme);
        frame.render_stateful_widget(&list, content_chunks[0], &mut list_state);
    }
    app.set_list_height(list_state.visible_height);

    let mut detail_state = app.detail_state.clone();
    {
        let selected = app.selected_entity().map(|e| e.name.as_str());
        let details = app.selected_details();
        let evolution = details
            .as_ref()
            .and_then(|d| d.as_pokemon())
            .and_then(|p| app.evolution(&p.species));
        let pane = DetailPane::new(
            selected,
            details.as_ref(),
            evolution,
            focus == Focus::Details,
            theme,
        );
        frame.render_stateful_widget(&pane, content_chunks[1], &mut detail_state);
    }
    app.detail_state = detail_state;
}

/// Creates a centered rectangle. `percent_x` is a percentage of the width;
/// `height` is in rows when small, otherwise a percentage.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = if height <= 5 {
        let margin = area.height.saturating_sub(height) / 2;
        [
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Min(0),
        ]
    } else {
        [
            Constraint::Percentage((100 - height) / 2),
            Constraint::Percentage(height),
            Constraint::Percentage((100 - height) / 2),
        ]
    };
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vertical)
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
