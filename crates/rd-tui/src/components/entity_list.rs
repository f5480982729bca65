//! Entity list component.
//!
//! Shows the active catalog's visible slice. Entries whose details have not
//! arrived yet render as a "Loading name…" placeholder row.

use rd_core::{CatalogKind, EntityDetails, EntityRef};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Paragraph, Row, StatefulWidget, Table, TableState,
    Widget,
};

use super::truncate_to_width;
use crate::app::{App, IndexState, ListState};
use crate::theme::Theme;

/// Longest name shown before truncation.
const NAME_WIDTH: usize = 24;

/// Width of the name column, leaving room for the `Loading …` placeholder.
const NAME_COLUMN: u16 = 34;

/// A stateful list of catalog entries.
pub struct EntityListView<'a> {
    app: &'a App,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> EntityListView<'a> {
    /// Creates a new list view over the app's active catalog.
    #[must_use]
    pub const fn new(app: &'a App, focused: bool, theme: &'a Theme) -> Self {
        Self {
            app,
            focused,
            theme,
        }
    }

    fn title(&self) -> String {
        let kind = self.app.active();
        let catalog = &self.app.tab(kind).catalog;
        if catalog.filter().is_active() {
            format!(
                " {} ({} of {} matching) ",
                kind.label(),
                catalog.visible_len(),
                catalog.filtered_len()
            )
        } else {
            format!(
                " {} ({} of {}) ",
                kind.label(),
                catalog.visible_len(),
                catalog.total_len()
            )
        }
    }

    fn build_row(&self, kind: CatalogKind, entity: &EntityRef) -> Row<'static> {
        let name = truncate_to_width(&entity.name, NAME_WIDTH);
        match self.app.details(kind, &entity.name) {
            Some(EntityDetails::Pokemon(pokemon)) => {
                let types: Vec<Span<'static>> = pokemon
                    .types
                    .iter()
                    .flat_map(|t| [Span::styled(t.clone(), self.theme.type_style(t)), Span::raw(" ")])
                    .collect();
                Row::new(vec![
                    Cell::from(Span::styled(
                        format!("#{:03}", pokemon.id),
                        self.theme.dimmed_style(),
                    )),
                    Cell::from(Span::styled(name, self.theme.base_style())),
                    Cell::from(Line::from(types)),
                ])
            }
            Some(EntityDetails::Item(item)) => Row::new(vec![
                Cell::from(Span::styled(item.cost_label(), self.theme.accent_style())),
                Cell::from(Span::styled(name, self.theme.base_style())),
                Cell::from(Span::styled(item.category.clone(), self.theme.dimmed_style())),
            ]),
            None => Row::new(vec![
                Cell::from(""),
                Cell::from(Span::styled(
                    format!("Loading {name}…"),
                    self.theme.dimmed_style(),
                )),
                Cell::from(""),
            ]),
        }
    }

    fn render_message(&self, block: Block<'_>, text: String, area: Rect, buf: &mut Buffer) {
        let style = if matches!(self.app.active_tab().index_state, IndexState::Failed(_)) {
            self.theme.error_style()
        } else {
            self.theme.dimmed_style()
        };
        Paragraph::new(Line::from(Span::styled(text, style)))
            .block(block)
            .render(area, buf);
    }
}

impl StatefulWidget for &EntityListView<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.visible_height = area.height.saturating_sub(2) as usize;

        let border_style = if self.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(self.title(), self.theme.header_style));

        let kind = self.app.active();
        let tab = self.app.tab(kind);
        match &tab.index_state {
            IndexState::Loading => {
                let text = format!("Loading {}…", kind.label());
                return self.render_message(block, text, area, buf);
            }
            IndexState::Failed(message) => {
                let text = format!("Error: {message} (press r to retry)");
                return self.render_message(block, text, area, buf);
            }
            IndexState::Ready => {}
        }
        if tab.catalog.is_waiting_for_members() {
            return self.render_message(block, "Loading type members…".to_owned(), area, buf);
        }
        if tab.catalog.filtered_len() == 0 {
            return self.render_message(block, "No matches".to_owned(), area, buf);
        }

        let rows: Vec<Row<'static>> = tab
            .catalog
            .visible()
            .into_iter()
            .map(|entity| self.build_row(kind, entity))
            .collect();

        let widths = match kind {
            CatalogKind::Pokemon => [
                Constraint::Length(5),
                Constraint::Length(NAME_COLUMN),
                Constraint::Min(10),
            ],
            CatalogKind::Item => [
                Constraint::Length(8),
                Constraint::Length(NAME_COLUMN),
                Constraint::Min(10),
            ],
        };

        let table = Table::new(rows, widths)
            .block(block)
            .row_highlight_style(self.theme.highlight_style)
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_symbol("▸ ");

        let mut table_state = TableState::default();
        table_state.select(state.selected);
        *table_state.offset_mut() = state.scroll_offset;

        StatefulWidget::render(table, area, buf, &mut table_state);
    }
}
