//! Single-line layout: items side by side after the filter field.
//!
//! The highlighted item is always shown. Items to its right are added first,
//! then items to its left, until the line is full.

use super::list::row_colors;
use crate::ui::helpers;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MenuView;

pub(crate) const SEPARATOR: usize = 2;

/// Picks the contiguous range of `view.rows` that fits in `space` columns.
#[must_use]
pub fn visible_range(view: &MenuView, space: usize) -> std::ops::Range<usize> {
    if view.rows.is_empty() {
        return 0..0;
    }

    let cost = |index: usize| helpers::width(&view.rows[index].text) + SEPARATOR;
    let anchor = view.highlighted_row().unwrap_or(0);

    let mut start = anchor;
    let mut end = anchor + 1;
    let mut used = cost(anchor);

    while end < view.rows.len() && used + cost(end) <= space {
        used += cost(end);
        end += 1;
    }
    while start > 0 && used + cost(start - 1) <= space {
        start -= 1;
        used += cost(start);
    }

    start..end
}

/// Writes the items that fit between the current column and `cols`.
///
/// `space` is the number of columns left on the line. Returns how many items
/// were drawn, which is the page size of this layout, and the columns used.
pub fn render_inline_rows(out: &mut String, view: &MenuView, space: usize) -> (usize, usize) {
    let range = visible_range(view, space);
    let mut remaining = space;

    for row in &view.rows[range.clone()] {
        if remaining < SEPARATOR {
            break;
        }
        out.push_str(&Theme::bg(&view.colors.background));
        out.push_str("  ");
        remaining -= SEPARATOR;

        let colors = row_colors(row, &view.colors);
        colors.apply(out);
        remaining -= helpers::render_highlighted_text(out, &row.text, &row.match_ranges, colors, remaining);
        out.push_str(Theme::reset());
    }

    (range.len(), space - remaining)
}
