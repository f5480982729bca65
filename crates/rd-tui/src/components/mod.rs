//! UI components for the TUI.
//!
//! # Component Types
//!
//! - **Widgets** (`Widget` trait): stateless rendering - `HeaderBar`, `StatusBar`
//! - **Stateful Widgets** (`StatefulWidget` trait): selection/scroll state -
//!   `EntityListView`, `DetailPane`
//! - **Overlays**: modal overlays - `HelpPanel`, `FilterInput`

mod detail_pane;
mod entity_list;
mod filter_input;
mod header;
mod help;
mod status_bar;

pub use detail_pane::DetailPane;
pub use entity_list::EntityListView;
pub use filter_input::FilterInput;
pub use header::HeaderBar;
pub use help::HelpPanel;
pub use status_bar::StatusBar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `text` to at most `max_width` terminal columns, ending in `…`
/// when shortened.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::buffer::Buffer;

    /// Renders a buffer as one trimmed string per row.
    pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_owned()
            })
            .collect()
    }

    /// Returns `true` if any row contains `needle`.
    pub fn contains(buf: &Buffer, needle: &str) -> bool {
        buffer_lines(buf).iter().any(|line| line.contains(needle))
    }
}
