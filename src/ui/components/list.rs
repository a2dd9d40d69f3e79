//! Vertical list: one row per item below the prompt.

use crate::ui::helpers::{self, position_cursor, Colors};
use crate::ui::theme::{Theme, ThemeColors};
use crate::ui::viewmodel::{MenuView, RowView};

/// Colors for a row. The highlight wins over selection.
#[must_use]
pub fn row_colors<'a>(row: &RowView, colors: &'a ThemeColors) -> Colors<'a> {
    if row.is_highlighted {
        Colors {
            fg: &colors.highlighted_fg,
            bg: &colors.highlighted_bg,
        }
    } else if row.is_selected {
        Colors {
            fg: &colors.selected_fg,
            bg: &colors.selected_bg,
        }
    } else {
        Colors {
            fg: &colors.item_fg,
            bg: &colors.item_bg,
        }
    }
}

/// Writes every row of `view`, starting at terminal row `row` (1-indexed).
///
/// The highlighted row is preceded by the prefix; other rows are indented by
/// the same width so the texts stay aligned. Rows are padded to `cols`.
///
/// Returns the next free row.
pub fn render_rows(out: &mut String, row: usize, view: &MenuView, cols: usize) -> usize {
    let prefix = view.prefix.as_deref().unwrap_or("");
    let indent = helpers::width(prefix) + usize::from(!prefix.is_empty());

    let mut current_row = row;
    for item in &view.rows {
        position_cursor(out, current_row, 1);
        let colors = row_colors(item, &view.colors);
        colors.apply(out);

        let mut used = 0;
        if indent > 0 {
            if item.is_highlighted {
                let marker = helpers::truncate(prefix, cols);
                out.push_str(marker);
                out.push(' ');
            } else {
                out.push_str(&" ".repeat(indent));
            }
            used += indent;
        }

        used += helpers::render_highlighted_text(
            out,
            &item.text,
            &item.match_ranges,
            colors,
            cols.saturating_sub(used),
        );

        out.push_str(&" ".repeat(cols.saturating_sub(used)));
        out.push_str(Theme::reset());
        current_row += 1;
    }
    current_row
}
