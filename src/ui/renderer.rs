//! Top-level drawing coordinator.
//!
//! [`draw`] turns a [`MenuView`] into a finished ANSI frame. It decides the
//! layout (single line or list), where on the screen the frame goes, and where
//! the text cursor ends up. It does no I/O.
//!
//! # Example
//!
//! ```rust
//! use pickmenu::Menu;
//! use pickmenu::ui::draw;
//!
//! let mut menu: Menu = Menu::new();
//! menu.push_item("alpha")?;
//! menu.set_lines(5);
//!
//! let frame = draw(&menu.compute_view(5), 80, 24);
//! assert_eq!(frame.height, 6);
//! assert_eq!(frame.shown, 1);
//! # Ok::<(), pickmenu::MenuError>(())
//! ```

use crate::ui::components::{self, Placement};
use crate::ui::viewmodel::MenuView;

/// A drawn frame, ready to be written to a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Escape sequences and text, with absolute cursor positioning.
    pub text: String,
    /// Text cursor position `(row, col)`, both 1-indexed.
    pub cursor: (usize, usize),
    /// Number of items drawn; the page size of this frame.
    pub shown: usize,
    /// Terminal rows covered by the frame.
    pub height: usize,
}

/// Rows a frame for `lines` needs on a screen `rows` high.
#[must_use]
pub fn frame_height(lines: u32, rows: usize) -> usize {
    (1 + lines as usize).min(rows.max(1))
}

/// List rows worth computing for a `cols` by `rows` screen.
///
/// The list layout gets the rows below the prompt. The single-line layout gets
/// as many items as could possibly fit beside the filter field; [`draw`] then
/// trims them to the actual text widths.
#[must_use]
pub fn viewport_rows(lines: u32, cols: usize, rows: usize) -> usize {
    if lines == 0 {
        components::inline_capacity(cols)
    } else {
        frame_height(lines, rows).saturating_sub(1).max(1)
    }
}

/// Draws `view` on a `cols` by `rows` screen.
///
/// `lines == 0` selects the single-line layout. The frame is anchored to the
/// top row, or to the bottom row when `view.bottom` is set.
#[must_use]
pub fn draw(view: &MenuView, cols: usize, rows: usize) -> Frame {
    let height = frame_height(view.lines, rows);
    let top = if view.bottom { rows.saturating_sub(height) + 1 } else { 1 };

    let mut text = String::new();
    let Placement {
        prompt_row,
        cursor_col,
        shown,
    } = if view.lines == 0 {
        components::render_inline_layout(&mut text, view, top, cols)
    } else {
        let mut clipped;
        let view = if view.rows.len() > height - 1 {
            clipped = view.clone();
            clipped.rows.truncate(height - 1);
            clipped.lines = (height - 1) as u32;
            &clipped
        } else {
            view
        };
        components::render_list_layout(&mut text, view, top, cols)
    };

    tracing::trace!(cols, rows, height, shown, "frame drawn");

    Frame {
        text,
        cursor: (prompt_row, cursor_col.min(cols.max(1))),
        shown,
        height,
    }
}
