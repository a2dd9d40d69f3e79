//! Shared drawing utilities.
//!
//! Components write into a `String` frame buffer rather than straight to the
//! terminal; the renderer flushes the finished frame in one write.
//!
//! Widths are counted in codepoints. Wide and combining characters are not
//! measured.

use crate::ui::theme::Theme;
use std::fmt::Write;

/// Foreground and background pair.
#[derive(Debug, Clone, Copy)]
pub struct Colors<'a> {
    pub fg: &'a str,
    pub bg: &'a str,
}

impl Colors<'_> {
    /// Writes both escapes to `out`.
    pub fn apply(self, out: &mut String) {
        out.push_str(&Theme::fg(self.fg));
        out.push_str(&Theme::bg(self.bg));
    }
}

/// Moves the terminal cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Clears from the cursor to the end of the line.
pub fn clear_line(out: &mut String) {
    out.push_str("\u{1b}[K");
}

/// Number of codepoints in `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` codepoints.
#[must_use]
pub fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

/// Writes `text` clipped to `max` codepoints, with matched ranges underlined
/// and bold. `colors` are restored after every emphasized section.
///
/// Ranges are codepoint `(start, end)` pairs with exclusive end and must be
/// sorted; ranges past the clip are cut.
///
/// Returns the number of codepoints written.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    colors: Colors<'_>,
    max: usize,
) -> usize {
    let chars: Vec<char> = text.chars().take(max).collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(Theme::bold());
        out.push_str(Theme::underline());
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        colors.apply(out);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    chars.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut plain = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, c) if c.is_ascii_alphabetic() => in_escape = false,
                (true, _) => {}
                (false, c) => plain.push(c),
            }
        }
        plain
    }

    const COLORS: Colors<'static> = Colors {
        fg: "#ffffff",
        bg: "#000000",
    };

    #[test]
    fn truncate_counts_codepoints() {
        assert_eq!(truncate("żółw", 2), "żó");
        assert_eq!(truncate("ab", 5), "ab");
    }

    #[test]
    fn highlighted_text_keeps_plain_content() {
        let mut out = String::new();
        let written = render_highlighted_text(&mut out, "my-project", &[(0, 2), (3, 4)], COLORS, 80);
        assert_eq!(written, 10);
        assert_eq!(strip_ansi(&out), "my-project");
        assert!(out.contains(Theme::underline()));
    }

    #[test]
    fn highlighted_text_clips_ranges() {
        let mut out = String::new();
        let written = render_highlighted_text(&mut out, "abcdef", &[(4, 6)], COLORS, 3);
        assert_eq!(written, 3);
        assert_eq!(out, "abc");
    }
}
