//! Search input overlay.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::theme::Theme;

/// A search input overlay widget.
///
/// Shown while the app is in filter mode. Every keystroke is applied to the
/// list immediately; the overlay only echoes the text.
pub struct FilterInput<'a> {
    /// The current search text.
    text: &'a str,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> FilterInput<'a> {
    /// Creates a new filter input widget.
    #[must_use]
    pub const fn new(text: &'a str, theme: &'a Theme) -> Self {
        Self { text, theme }
    }
}

impl Widget for &FilterInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let cursor = Span::styled("▌", self.theme.accent_style());
        let input_content = if self.text.is_empty() {
            Line::from(vec![
                Span::styled(
                    "Type a name…",
                    self.theme.dimmed_style().add_modifier(Modifier::ITALIC),
                ),
                cursor,
            ])
        } else {
            Line::from(vec![Span::styled(self.text, self.theme.base_style()), cursor])
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style)
            .title(Span::styled(
                " Search (Enter/Esc to close) ",
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(self.theme.overlay_bg));

        Paragraph::new(input_content)
            .block(block)
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::buffer_lines;

    fn render(text: &str) -> Vec<String> {
        let theme = Theme::dark();
        let input = FilterInput::new(text, &theme);
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        (&input).render(area, &mut buf);
        buffer_lines(&buf)
    }

    #[test]
    fn test_filter_input_echoes_text() {
        let lines = render("char");
        assert!(lines[1].starts_with("│char▌"));
    }

    #[test]
    fn test_filter_input_empty_hint() {
        let lines = render("");
        assert!(lines[1].contains("Type a name…"));
    }
}
