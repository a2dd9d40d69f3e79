//! View snapshot handed to renderers.
//!
//! A [`MenuView`] is computed by [`Menu::compute_view`](crate::Menu::compute_view)
//! and owns all of its data, so a renderer can hold on to it while the menu
//! keeps changing. It contains no logic, only display-ready values.
//!
//! # Example
//!
//! ```rust
//! use pickmenu::Menu;
//!
//! let mut menu: Menu = Menu::new();
//! menu.push_item("my-project")?;
//! let view = menu.compute_view(10);
//! assert_eq!(view.rows[0].text, "my-project");
//! assert!(view.rows[0].is_highlighted);
//! # Ok::<(), pickmenu::MenuError>(())
//! ```

use crate::ui::theme::ThemeColors;

/// Renderable snapshot of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    /// Title drawn before the filter.
    pub title: Option<String>,

    /// Marker drawn before the highlighted row in list layout.
    pub prefix: Option<String>,

    /// Filter text as typed.
    pub filter: String,

    /// Cursor position inside `filter`, in codepoints.
    pub cursor: usize,

    /// Visible window of the filtered view.
    pub rows: Vec<RowView>,

    /// Index in the filtered view of the first entry of `rows`.
    pub first_row: usize,

    /// Number of items in the filtered view.
    pub filtered_count: usize,

    /// Number of attached items.
    pub total_count: usize,

    /// Number of selected items, visible or not.
    pub selected_count: usize,

    /// Requested vertical rows; 0 means single-line layout.
    pub lines: u32,

    /// Anchor the menu to the bottom of the screen.
    pub bottom: bool,

    /// Font description, for renderers that shape text themselves.
    pub font: String,

    /// Colors to draw with.
    pub colors: ThemeColors,
}

/// One row of the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Item text.
    pub text: String,

    /// Whether this row carries the highlight.
    pub is_highlighted: bool,

    /// Whether the item is in the selection.
    pub is_selected: bool,

    /// Codepoint ranges matched by the filter, `(start, end)` with exclusive end.
    pub match_ranges: Vec<(usize, usize)>,
}

impl MenuView {
    /// Returns the highlighted row, if it is inside the window.
    #[must_use]
    pub fn highlighted_row(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.is_highlighted)
    }
}
