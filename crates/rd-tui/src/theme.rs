//! Theme and styling for the TUI.
//!
//! [`Theme`] holds every color the interface uses. Dark and light variants
//! follow the configured [`ColorScheme`]; [`Theme::monochrome`] backs
//! `--no-color`.
//!
//! # Example
//!
//! ```
//! use rd_tui::Theme;
//!
//! let theme = Theme::dark();
//! let style = theme.type_style("electric");
//! assert_ne!(style, theme.type_style("water"));
//! ```

use rd_core::ColorScheme;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // =========================================================================
    // Selection Colors
    // =========================================================================
    /// Background color for selected rows.
    pub selected_bg: Color,

    /// Foreground color for selected rows.
    pub selected_fg: Color,

    // =========================================================================
    // Base Colors
    // =========================================================================
    /// Primary foreground color.
    pub fg: Color,

    /// Primary background color.
    pub bg: Color,

    /// Dimmed text (placeholders, labels).
    pub dimmed_fg: Color,

    /// Accent color for highlights.
    pub accent: Color,

    /// Error color.
    pub error_fg: Color,

    /// Stat bar color.
    pub stat_fg: Color,

    /// Whether type badges are colored.
    pub colored_types: bool,

    // =========================================================================
    // Border Styles
    // =========================================================================
    /// Style for normal borders.
    pub border_style: Style,

    /// Style for focused borders.
    pub focused_border_style: Style,

    // =========================================================================
    // Component Styles
    // =========================================================================
    /// Style for the selected row.
    pub highlight_style: Style,

    /// Style for panel titles.
    pub header_style: Style,

    /// Style for the status bar.
    pub status_bar_style: Style,

    /// Background of modal overlays.
    pub overlay_bg: Color,
}

impl Theme {
    /// Creates a dark theme (light text on dark background).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,

            fg: Color::Rgb(220, 220, 220),
            bg: Color::Reset,
            dimmed_fg: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(238, 21, 21), // Pokédex red
            error_fg: Color::Rgb(255, 80, 80),
            stat_fg: Color::Rgb(100, 200, 120),
            colored_types: true,

            border_style: Style::default().fg(Color::Rgb(80, 80, 100)),
            focused_border_style: Style::default().fg(Color::Rgb(238, 21, 21)),

            highlight_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 80))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(255, 203, 5))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(180, 180, 180))
                .bg(Color::Rgb(40, 40, 50)),
            overlay_bg: Color::Rgb(25, 25, 35),
        }
    }

    /// Creates a light theme (dark text on light background).
    #[must_use]
    pub fn light() -> Self {
        Self {
            selected_bg: Color::Rgb(200, 200, 220),
            selected_fg: Color::Black,

            fg: Color::Rgb(30, 30, 30),
            bg: Color::Reset,
            dimmed_fg: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(180, 20, 20),
            error_fg: Color::Rgb(180, 50, 50),
            stat_fg: Color::Rgb(40, 140, 60),
            colored_types: true,

            border_style: Style::default().fg(Color::Rgb(150, 150, 170)),
            focused_border_style: Style::default().fg(Color::Rgb(180, 20, 20)),

            highlight_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(200, 200, 220))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(40, 80, 170))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(60, 60, 60))
                .bg(Color::Rgb(220, 220, 230)),
            overlay_bg: Color::Rgb(240, 240, 245),
        }
    }

    /// Creates a theme that uses only the terminal's default colors.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            selected_bg: Color::Reset,
            selected_fg: Color::Reset,
            fg: Color::Reset,
            bg: Color::Reset,
            dimmed_fg: Color::Reset,
            accent: Color::Reset,
            error_fg: Color::Reset,
            stat_fg: Color::Reset,
            colored_types: false,
            border_style: Style::default(),
            focused_border_style: Style::default().add_modifier(Modifier::BOLD),
            highlight_style: Style::default().add_modifier(Modifier::REVERSED),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            status_bar_style: Style::default(),
            overlay_bg: Color::Reset,
        }
    }

    /// Creates a theme from a [`ColorScheme`]. `Auto` means dark.
    #[must_use]
    pub fn from_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark | ColorScheme::Auto | _ => Self::dark(),
        }
    }

    /// Returns the badge color for a Pokémon type.
    #[must_use]
    pub fn type_color(&self, type_name: &str) -> Color {
        if !self.colored_types {
            return self.fg;
        }
        match type_name {
            "normal" => Color::Rgb(168, 167, 122),
            "fire" => Color::Rgb(238, 129, 48),
            "water" => Color::Rgb(99, 144, 240),
            "electric" => Color::Rgb(247, 208, 44),
            "grass" => Color::Rgb(122, 199, 76),
            "ice" => Color::Rgb(150, 217, 214),
            "fighting" => Color::Rgb(194, 46, 40),
            "poison" => Color::Rgb(163, 62, 161),
            "ground" => Color::Rgb(226, 191, 101),
            "flying" => Color::Rgb(169, 143, 243),
            "psychic" => Color::Rgb(249, 85, 135),
            "bug" => Color::Rgb(166, 185, 26),
            "rock" => Color::Rgb(182, 161, 54),
            "ghost" => Color::Rgb(115, 87, 151),
            "dragon" => Color::Rgb(111, 53, 252),
            "dark" => Color::Rgb(112, 87, 70),
            "steel" => Color::Rgb(183, 183, 206),
            "fairy" => Color::Rgb(214, 133, 173),
            _ => self.dimmed_fg,
        }
    }

    /// Returns the style for a Pokémon type badge.
    #[must_use]
    pub fn type_style(&self, type_name: &str) -> Style {
        Style::default()
            .fg(self.type_color(type_name))
            .add_modifier(Modifier::BOLD)
    }

    /// Returns a style with the base foreground color.
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Returns a style for dimmed/secondary text.
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed_fg)
    }

    /// Returns a style for accent text.
    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Returns a style for error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_fg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
