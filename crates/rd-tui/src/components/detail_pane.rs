//! Detail pane component.
//!
//! Shows the selected Pokémon (stats, abilities, evolution chain) or item
//! (price, category, attributes, effect).

use rd_core::{EntityDetails, EvolutionStage, ItemDetails, PokemonDetails};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
    Widget, Wrap,
};

use crate::app::{DetailPaneState, EvolutionView};
use crate::theme::Theme;

/// Highest base stat value, used to scale the stat bars.
const MAX_STAT: u32 = 255;

/// Width of a full stat bar.
const STAT_BAR_WIDTH: u32 = 20;

/// A stateful detail pane widget.
pub struct DetailPane<'a> {
    /// The selected entry's name, if anything is selected.
    selected: Option<&'a str>,
    /// Its details, once loaded.
    details: Option<&'a EntityDetails>,
    /// Its evolution chain, if one was requested.
    evolution: Option<&'a EvolutionView>,
    /// Whether this widget has focus.
    focused: bool,
    /// Theme for styling.
    theme: &'a Theme,
}

impl<'a> DetailPane<'a> {
    /// Creates a new detail pane.
    #[must_use]
    pub const fn new(
        selected: Option<&'a str>,
        details: Option<&'a EntityDetails>,
        evolution: Option<&'a EvolutionView>,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            selected,
            details,
            evolution,
            focused,
            theme,
        }
    }

    fn render_placeholder(&self, text: String, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style)
            .title(Span::styled(" Details ", self.theme.header_style));

        let text = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(text, self.theme.dimmed_style())),
        ]);

        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn label(&self, label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), self.theme.dimmed_style()),
            Span::styled(value, self.theme.base_style()),
        ])
    }

    fn section(&self, title: &str) -> [Line<'static>; 2] {
        [
            Line::from(""),
            Line::from(Span::styled(
                format!("─── {title} ───"),
                self.theme.dimmed_style(),
            )),
        ]
    }

    fn title_line(&self, name: &str, id: u32) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                name.to_owned(),
                self.theme.accent_style().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  #{id:03}"), self.theme.dimmed_style()),
        ])
    }

    fn pokemon_lines(&self, pokemon: &PokemonDetails) -> Vec<Line<'static>> {
        let mut lines = vec![self.title_line(&pokemon.name, pokemon.id)];

        let mut types = vec![Span::styled(format!("{:<12}", "Types"), self.theme.dimmed_style())];
        for t in &pokemon.types {
            types.push(Span::styled(t.clone(), self.theme.type_style(t)));
            types.push(Span::raw(" "));
        }
        lines.push(Line::from(types));

        // Upstream heights are decimetres, weights hectograms.
        lines.push(self.label(
            "Height",
            format!("{}.{} m", pokemon.height / 10, pokemon.height % 10),
        ));
        lines.push(self.label(
            "Weight",
            format!("{}.{} kg", pokemon.weight / 10, pokemon.weight % 10),
        ));
        if let Some(exp) = pokemon.base_experience {
            lines.push(self.label("Base exp", exp.to_string()));
        }
        lines.push(self.label(
            "Abilities",
            if pokemon.abilities.is_empty() {
                "none".to_owned()
            } else {
                pokemon.abilities.join(", ")
            },
        ));

        if !pokemon.stats.is_empty() {
            lines.extend(self.section("Base Stats"));
            for stat in &pokemon.stats {
                let filled = (stat.value.min(MAX_STAT) * STAT_BAR_WIDTH).div_ceil(MAX_STAT);
                lines.push(Line::from(vec![
                    Span::styled(format!("{:<16}", stat.name), self.theme.dimmed_style()),
                    Span::styled(format!("{:>3} ", stat.value), self.theme.base_style()),
                    Span::styled(
                        "█".repeat(filled as usize),
                        Style::default().fg(self.theme.stat_fg),
                    ),
                ]));
            }
        }

        lines.extend(self.section("Evolution"));
        lines.extend(self.evolution_lines());
        lines
    }

    fn evolution_lines(&self) -> Vec<Line<'static>> {
        match self.evolution {
            None | Some(EvolutionView::Loading) => vec![Line::from(Span::styled(
                "Resolving chain…",
                self.theme.dimmed_style(),
            ))],
            Some(EvolutionView::Failed(message)) => vec![Line::from(Span::styled(
                format!("Error: {message}"),
                self.theme.error_style(),
            ))],
            Some(EvolutionView::Ready(stages)) if stages.len() <= 1 => vec![Line::from(
                Span::styled("Does not evolve", self.theme.dimmed_style()),
            )],
            Some(EvolutionView::Ready(stages)) => stages
                .iter()
                .enumerate()
                .map(|(i, stage)| self.stage_line(i, stage))
                .collect(),
        }
    }

    fn stage_line(&self, position: usize, stage: &EvolutionStage) -> Line<'static> {
        let marker = if position == 0 { "  " } else { "→ " };
        let is_current = self.selected == Some(stage.name.as_str());
        let name_style = if is_current {
            self.theme.accent_style().add_modifier(Modifier::BOLD)
        } else {
            self.theme.base_style()
        };

        let mut spans = vec![
            Span::styled(marker, self.theme.dimmed_style()),
            Span::styled(stage.name.clone(), name_style),
        ];
        if let Some(requirement) = stage.requirement() {
            spans.push(Span::styled(
                format!(" ({requirement})"),
                self.theme.dimmed_style(),
            ));
        }
        Line::from(spans)
    }

    fn item_lines(&self, item: &ItemDetails) -> Vec<Line<'static>> {
        let mut lines = vec![
            self.title_line(&item.name, item.id),
            self.label("Cost", item.cost_label()),
            self.label("Category", item.category.clone()),
            self.label(
                "Attributes",
                if item.attributes.is_empty() {
                    "none".to_owned()
                } else {
                    item.attributes.join(", ")
                },
            ),
        ];

        lines.extend(self.section("Effect"));
        lines.push(match &item.effect {
            Some(effect) => Line::from(Span::styled(effect.clone(), self.theme.base_style())),
            None => Line::from(Span::styled("No description", self.theme.dimmed_style())),
        });
        lines
    }

    /// Builds the content lines for the current details.
    fn lines(&self, details: &EntityDetails) -> Vec<Line<'static>> {
        match details {
            EntityDetails::Pokemon(pokemon) => self.pokemon_lines(pokemon),
            EntityDetails::Item(item) => self.item_lines(item),
        }
    }

    fn render_details(
        &self,
        details: &EntityDetails,
        area: Rect,
        buf: &mut Buffer,
        state: &mut DetailPaneState,
    ) {
        let border_style = if self.focused {
            self.theme.focused_border_style
        } else {
            self.theme.border_style
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(" Details ", self.theme.header_style));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines(details);
        let total_lines = lines.len();

        let max_scroll = total_lines.saturating_sub(inner.height as usize);
        if state.scroll_offset > max_scroll {
            state.scroll_offset = max_scroll;
        }

        // Bounded by the line count, which is far below u16::MAX.
        #[allow(clippy::cast_possible_truncation)]
        let scroll_offset = state.scroll_offset as u16;

        Paragraph::new(Text::from(lines))
            .scroll((scroll_offset, 0))
            .wrap(Wrap { trim: false })
            .render(inner, buf);

        if total_lines > inner.height as usize {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(total_lines)
                .position(state.scroll_offset)
                .viewport_content_length(inner.height as usize);

            scrollbar.render(
                inner.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                buf,
                &mut scrollbar_state,
            );
        }
    }
}

impl StatefulWidget for &DetailPane<'_> {
    type State = DetailPaneState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        match (self.details, self.selected) {
            (Some(details), _) => self.render_details(details, area, buf, state),
            (None, Some(name)) => self.render_placeholder(format!("Loading {name}…"), area, buf),
            (None, None) => self.render_placeholder("Nothing selected".to_owned(), area, buf),
        }
    }
}
