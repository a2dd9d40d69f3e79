//! Text editor owning the filter string and its cursor.
//!
//! The cursor counts codepoints, not bytes, and always lies in
//! `0..=text.chars().count()`. Every editing operation returns whether the
//! text content changed so the menu knows when to refilter.

use crate::domain::Result;

/// Filter text with a codepoint cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEditor {
    text: String,
    cursor: usize,
    len: usize,
}

impl TextEditor {
    /// Creates an empty editor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            len: 0,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in codepoints.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text length in codepoints.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the text is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Replaces the whole text and moves the cursor to its end.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`](crate::MenuError::AllocationFailure)
    /// if the text cannot be stored; the editor is left unchanged.
    pub fn set_text(&mut self, text: &str) -> Result<bool> {
        if self.text == text {
            self.cursor = self.len;
            return Ok(false);
        }

        let mut replacement = String::new();
        replacement.try_reserve_exact(text.len())?;
        replacement.push_str(text);

        self.len = replacement.chars().count();
        self.text = replacement;
        self.cursor = self.len;
        Ok(true)
    }

    /// Inserts `c` at the cursor and advances the cursor by one.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`](crate::MenuError::AllocationFailure)
    /// if the text cannot grow.
    pub fn insert(&mut self, c: char) -> Result<bool> {
        self.text.try_reserve(c.len_utf8())?;
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        self.len += 1;
        Ok(true)
    }

    /// Deletes the codepoint before the cursor. No-op at the start.
    pub fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.delete_range(self.cursor, self.cursor + 1)
    }

    /// Deletes the codepoint under the cursor. No-op at the end.
    pub fn delete_at(&mut self) -> bool {
        if self.cursor >= self.len {
            return false;
        }
        self.delete_range(self.cursor, self.cursor + 1)
    }

    /// Deletes the word before the cursor: any whitespace directly before it,
    /// then the run of non-whitespace before that.
    pub fn delete_word_before(&mut self) -> bool {
        let chars: Vec<char> = self.text.chars().take(self.cursor).collect();
        let mut start = chars.len();
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }

        let end = self.cursor;
        self.cursor = start;
        self.delete_range(start, end)
    }

    /// Deletes everything from the start of the text to the cursor.
    pub fn delete_to_start(&mut self) -> bool {
        let end = self.cursor;
        self.cursor = 0;
        self.delete_range(0, end)
    }

    /// Deletes everything from the cursor to the end of the text.
    pub fn delete_to_end(&mut self) -> bool {
        self.delete_range(self.cursor, self.len)
    }

    /// Moves the cursor by `delta` codepoints, clamped to the text.
    pub fn move_by(&mut self, delta: isize) -> usize {
        self.cursor = self.cursor.saturating_add_signed(delta).min(self.len);
        self.cursor
    }

    /// Moves the cursor to the start of the text.
    pub fn home(&mut self) -> usize {
        self.cursor = 0;
        self.cursor
    }

    /// Moves the cursor to the end of the text.
    pub fn end(&mut self) -> usize {
        self.cursor = self.len;
        self.cursor
    }

    /// Removes codepoints `start..end`. The cursor is not moved.
    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        let from = self.byte_offset(start);
        let to = self.byte_offset(end);
        self.text.replace_range(from..to, "");
        self.len -= end - start;
        true
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}
