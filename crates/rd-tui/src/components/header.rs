//! Header bar component.
//!
//! Displays the application title, the catalog tabs, and the help hint.

use rd_core::CatalogKind;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::theme::Theme;

/// The header bar component.
pub struct HeaderBar<'a> {
    /// The catalog currently shown.
    active: CatalogKind,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    /// Creates a new header bar.
    #[must_use]
    pub const fn new(active: CatalogKind, theme: &'a Theme) -> Self {
        Self { active, theme }
    }

    fn build_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("RotomDex", self.theme.header_style),
            Span::raw(" │ "),
        ];

        for kind in CatalogKind::ALL {
            let style = if kind == self.active {
                self.theme
                    .accent_style()
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                self.theme.dimmed_style()
            };
            spans.push(Span::styled(format!(" {} ", kind.label()), style));
        }

        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Tab to switch · ? for help", self.theme.dimmed_style()));
        Line::from(spans)
    }
}

impl Widget for &HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.border_style);

        Paragraph::new(self.build_line())
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Style;

    use super::*;
    use crate::components::test_support::buffer_lines;

    #[test]
    fn test_header_lists_both_catalogs() {
        let theme = Theme::dark();
        let header = HeaderBar::new(CatalogKind::Item, &theme);
        let area = Rect::new(0, 0, 70, 2);
        let mut buf = Buffer::empty(area);
        (&header).render(area, &mut buf);

        let lines = buffer_lines(&buf);
        insta::assert_snapshot!(
            lines[0],
            @"RotomDex │  Pokémon  Items  │ Tab to switch · ? for help"
        );
    }

    #[test]
    fn test_active_tab_is_highlighted() {
        let theme = Theme::dark();
        let line = HeaderBar::new(CatalogKind::Pokemon, &theme).build_line();
        let pokemon = &line.spans[2];
        assert!(pokemon.content.contains("Pokémon"));
        assert_ne!(pokemon.style, Style::default());
        assert_eq!(line.spans[3].style, theme.dimmed_style());
    }
}
