//! Composable drawing components.
//!
//! # Components
//!
//! - [`prompt`]: Title, filter field and counter
//! - [`list`]: Vertical rows with highlight prefix
//! - [`inline`]: Items side by side on the prompt line
//!
//! # Layout Modes
//!
//! - [`render_list_layout`]: Prompt line + one line per row (`lines > 0`)
//! - [`render_inline_layout`]: Prompt and items on a single line (`lines == 0`)

pub mod inline;
pub mod list;
pub mod prompt;

use crate::ui::helpers::{clear_line, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MenuView;

/// Minimum width of the filter field in single-line layout, as a share of the
/// line.
const INLINE_FIELD_DIVISOR: usize = 4;

/// Most items the single-line layout can fit on a `cols`-wide line: the
/// columns left after the minimum filter field, at one character plus a
/// separator per item.
#[must_use]
pub fn inline_capacity(cols: usize) -> usize {
    let space = cols.saturating_sub(cols / INLINE_FIELD_DIVISOR);
    (space / (1 + inline::SEPARATOR)).max(1)
}

/// Placement of a drawn frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Terminal row of the prompt line, 1-indexed.
    pub prompt_row: usize,
    /// Terminal column of the text cursor, 1-indexed.
    pub cursor_col: usize,
    /// Number of items drawn.
    pub shown: usize,
}

fn start_line(out: &mut String, view: &MenuView, row: usize) {
    position_cursor(out, row, 1);
    out.push_str(&Theme::bg(&view.colors.background));
    clear_line(out);
    out.push_str(Theme::reset());
}

/// Renders the list layout with its prompt on terminal row `row`.
///
/// Layout structure:
/// ```text
/// [Title] [Filter]                 [Counter]
/// [Prefix] [Highlighted row]
///          [Row]
///          ...
/// ```
pub fn render_list_layout(out: &mut String, view: &MenuView, row: usize, cols: usize) -> Placement {
    start_line(out, view, row);
    position_cursor(out, row, 1);
    let layout = prompt::render_prompt(out, view, cols, 0);
    prompt::render_counter(out, view, layout.used, cols);

    let next_row = list::render_rows(out, row + 1, view, cols);
    for blank in next_row..row + 1 + view.lines as usize {
        start_line(out, view, blank);
    }

    Placement {
        prompt_row: row,
        cursor_col: layout.cursor_col + 1,
        shown: view.rows.len(),
    }
}

/// Renders the single-line layout on terminal row `row`.
///
/// Layout structure:
/// ```text
/// [Title] [Filter      ]  [Item]  [Highlighted]  [Item]   [Counter]
/// ```
pub fn render_inline_layout(out: &mut String, view: &MenuView, row: usize, cols: usize) -> Placement {
    start_line(out, view, row);
    position_cursor(out, row, 1);
    let layout = prompt::render_prompt(out, view, cols, cols / INLINE_FIELD_DIVISOR);

    let counter_width = prompt::counter(view).chars().count() + 1;
    let space = cols.saturating_sub(layout.used + counter_width);
    let (shown, drawn) = inline::render_inline_rows(out, view, space);
    prompt::render_counter(out, view, layout.used + drawn, cols);

    Placement {
        prompt_row: row,
        cursor_col: layout.cursor_col + 1,
        shown,
    }
}
