//! Prompt line: title, filter field and match counter.

use crate::ui::helpers::{self, Colors};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MenuView;
use std::fmt::Write;

/// Where the prompt ended and where the cursor belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptLayout {
    /// Columns used by the title and filter field.
    pub used: usize,
    /// Column of the text cursor, 0-indexed.
    pub cursor_col: usize,
}

/// Counter text drawn at the right edge, like `3/10`.
#[must_use]
pub fn counter(view: &MenuView) -> String {
    if view.selected_count > 0 {
        format!("{}/{} [{}]", view.filtered_count, view.total_count, view.selected_count)
    } else {
        format!("{}/{}", view.filtered_count, view.total_count)
    }
}

/// Writes title and filter starting at the current cursor position.
///
/// `field_width` is the minimum width of the filter field; the field grows
/// with the text and is clipped at `cols`.
pub fn render_prompt(out: &mut String, view: &MenuView, cols: usize, field_width: usize) -> PromptLayout {
    let mut used = 0;

    if let Some(title) = view.title.as_deref().filter(|t| !t.is_empty()) {
        let title = helpers::truncate(title, cols.saturating_sub(2));
        out.push_str(&Theme::fg(&view.colors.title_fg));
        out.push_str(&Theme::bg(&view.colors.title_bg));
        out.push_str(Theme::bold());
        let _ = write!(out, "{title} ");
        out.push_str(Theme::reset());
        used += helpers::width(title) + 1;
    }

    let available = cols.saturating_sub(used);
    let filter_width = helpers::width(&view.filter);

    // Scroll the filter left once the cursor would fall off the field.
    let skip = (view.cursor + 1).saturating_sub(available);
    let visible: String = view.filter.chars().skip(skip).take(available).collect();

    Colors {
        fg: &view.colors.filter_fg,
        bg: &view.colors.filter_bg,
    }
    .apply(out);
    out.push_str(&visible);

    let field = field_width.max(filter_width + 1).min(available);
    let drawn = helpers::width(&visible);
    out.push_str(&" ".repeat(field.saturating_sub(drawn)));
    out.push_str(Theme::reset());

    PromptLayout {
        used: used + field.max(drawn),
        cursor_col: used + view.cursor.saturating_sub(skip),
    }
}

/// Writes the counter right-aligned so it ends at column `cols`, after padding
/// from column `used`. Nothing is drawn if it does not fit.
pub fn render_counter(out: &mut String, view: &MenuView, used: usize, cols: usize) {
    let text = counter(view);
    let len = helpers::width(&text);
    if used + len + 1 > cols {
        return;
    }

    Colors {
        fg: &view.colors.filter_fg,
        bg: &view.colors.background,
    }
    .apply(out);
    out.push_str(&" ".repeat(cols - used - len));
    out.push_str(&text);
    out.push_str(Theme::reset());
}
