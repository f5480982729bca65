//! Help panel component.
//!
//! Displays a modal overlay with the key bindings.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Clear, Row, Table, Widget};

use crate::theme::Theme;

/// Key binding definition for the help panel.
struct KeyBinding {
    /// The key(s) to press.
    key: &'static str,
    /// Description of what the key does.
    description: &'static str,
    /// The mode(s) where this binding applies.
    mode: &'static str,
}

const fn binding(key: &'static str, description: &'static str, mode: &'static str) -> KeyBinding {
    KeyBinding {
        key,
        description,
        mode,
    }
}

/// Static list of key bindings to display.
const KEY_BINDINGS: &[KeyBinding] = &[
    // Navigation
    binding("j / ↓", "Next entry (scroll details)", "Normal"),
    binding("k / ↑", "Previous entry (scroll details)", "Normal"),
    binding("Home", "First entry", "Normal"),
    binding("G / End", "Last loaded entry", "Normal"),
    binding("PgDn / PgUp", "Page down / up", "Normal"),
    binding("h / l", "Focus list / details", "Normal"),
    binding("Enter", "Toggle focus", "Normal"),
    binding("Tab", "Switch Pokémon / Items", "Normal"),
    // Filtering
    binding("/", "Search by name", "Normal"),
    binding("t", "Cycle type filter", "Normal"),
    binding("g", "Cycle generation filter", "Normal"),
    binding("Esc", "Clear filters", "Normal"),
    binding("Enter / Esc", "Close search", "Filter"),
    // Actions
    binding("r", "Retry a failed catalog", "Normal"),
    binding("?", "Toggle help panel", "Normal/Help"),
    binding("q / Ctrl+c", "Quit", "Any"),
];

/// A help panel overlay widget.
pub struct HelpPanel<'a> {
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> HelpPanel<'a> {
    /// Creates a new help panel.
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn build_rows(&self) -> Vec<Row<'static>> {
        KEY_BINDINGS
            .iter()
            .map(|binding| {
                Row::new(vec![
                    Cell::from(Span::styled(
                        binding.key,
                        self.theme.header_style,
                    )),
                    Cell::from(Span::styled(binding.description, self.theme.base_style())),
                    Cell::from(Span::styled(binding.mode, self.theme.dimmed_style())),
                ])
            })
            .collect()
    }
}

impl Widget for &HelpPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                " Help - Key Bindings ",
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.overlay_bg));

        let heading = self
            .theme
            .accent_style()
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let header = Row::new(vec![
            Cell::from(Span::styled("Key", heading)),
            Cell::from(Span::styled("Action", heading)),
            Cell::from(Span::styled("Mode", heading)),
        ])
        .height(1)
        .bottom_margin(1);

        let widths = [
            Constraint::Length(13),
            Constraint::Min(25),
            Constraint::Length(12),
        ];

        Table::new(self.build_rows(), widths)
            .block(block)
            .header(header)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::contains;

    #[test]
    fn test_key_bindings_not_empty() {
        assert!(!KEY_BINDINGS.is_empty());
    }

    #[test]
    fn test_help_lists_filter_keys() {
        let theme = Theme::dark();
        let panel = HelpPanel::new(&theme);
        let area = Rect::new(0, 0, 60, 22);
        let mut buf = Buffer::empty(area);
        (&panel).render(area, &mut buf);

        assert!(contains(&buf, "Cycle type filter"));
        assert!(contains(&buf, "Switch Pokémon / Items"));
    }
}
