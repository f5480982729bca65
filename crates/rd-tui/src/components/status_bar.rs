//! Status bar component.
//!
//! Displays the mode, the current status message, a filter summary, and the
//! `visible/filtered/total` counters.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::{App, AppMode};
use crate::theme::Theme;

/// The status bar component.
pub struct StatusBar<'a> {
    /// The application state.
    app: &'a App,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Creates a new status bar.
    #[must_use]
    pub const fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self { app, theme }
    }

    fn build_line(&self) -> Line<'static> {
        let mut spans = Vec::new();

        let mode_text = match self.app.mode {
            AppMode::Normal => "NORMAL",
            AppMode::Filtering => "SEARCH",
            AppMode::Help => "HELP",
        };
        spans.push(Span::styled(
            format!(" {mode_text} "),
            Style::default()
                .fg(Color::Black)
                .bg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));

        if let Some(status) = &self.app.status {
            if status.is_error {
                spans.push(Span::styled(
                    format!("Error: {}", status.text),
                    self.theme.error_style(),
                ));
            } else {
                spans.push(Span::styled(status.text.clone(), self.theme.base_style()));
            }
            spans.push(Span::raw(" │ "));
        }

        let catalog = &self.app.active_tab().catalog;
        if let Some(summary) = catalog.filter().summary() {
            spans.push(Span::styled("Filter: ", self.theme.dimmed_style()));
            spans.push(Span::styled(summary, self.theme.accent_style()));
            spans.push(Span::raw(" │ "));
        }
        if catalog.is_waiting_for_members() {
            spans.push(Span::styled("loading type members… │ ", self.theme.dimmed_style()));
        }

        spans.push(Span::styled(
            format!(
                "{}/{}/{}",
                catalog.visible_len(),
                catalog.filtered_len(),
                catalog.total_len()
            ),
            self.theme.dimmed_style(),
        ));

        Line::from(spans)
    }
}

impl Widget for &StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.build_line())
            .style(self.theme.status_bar_style)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rd_api::DetailsCache;
    use rd_core::{CatalogIndex, CatalogKind, Config, EntityRef};

    use super::*;
    use crate::action::Action;
    use crate::app::StatusMessage;
    use crate::components::test_support::buffer_lines;
    use crate::event::Event;

    fn render(app: &App) -> String {
        let theme = Theme::dark();
        let bar = StatusBar::new(app, &theme);
        let area = Rect::new(0, 0, 90, 1);
        let mut buf = Buffer::empty(area);
        (&bar).render(area, &mut buf);
        buffer_lines(&buf).remove(0)
    }

    fn app() -> App {
        let mut app = App::new(Config::default(), Arc::new(DetailsCache::new(8)));
        let index: CatalogIndex = (1..=30)
            .map(|id| {
                EntityRef::new(
                    format!("mon-{id}"),
                    format!("https://pokeapi.co/api/v2/pokemon/{id}/"),
                )
            })
            .collect();
        app.handle_loaded(Event::IndexLoaded {
            kind: CatalogKind::Pokemon,
            result: Ok(index),
        });
        app.status = None;
        app
    }

    #[test]
    fn test_counters() {
        let app = app();
        insta::assert_snapshot!(render(&app), @" NORMAL  20/30/30");
    }

    #[test]
    fn test_filter_summary_and_error() {
        let mut app = app();
        app.update(Action::SetSearch("mon-1".to_owned()));
        app.status = Some(StatusMessage::error("HTTP 503 from type"));
        insta::assert_snapshot!(
            render(&app),
            @r#" NORMAL  Error: HTTP 503 from type │ Filter: "mon-1" │ 11/11/30"#
        );
    }

    #[test]
    fn test_waiting_for_type_members() {
        let mut app = app();
        app.handle_loaded(Event::TypeNamesLoaded(Ok(vec!["fire".to_owned()])));
        app.update(Action::CycleTypeFilter);
        app.status = None;
        let line = render(&app);
        assert!(line.contains("loading type members…"));
        assert!(line.ends_with("0/0/30"));
    }
}
