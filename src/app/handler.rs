//! Key handling and state transition logic.
//!
//! [`Menu::advance`] is the whole state machine: it consumes one decoded key,
//! mutates the menu and reports whether the session continues. Renderers call
//! it once per key event and redraw while it answers [`RunResult::Running`].
//!
//! # Key Categories
//!
//! - **Navigation**: `Up`, `Down`, `PageUp`, `PageDown`
//! - **Selection**: `Tab`, `ShiftTab`, `ShiftPageUp`, `ShiftPageDown`
//! - **Cursor**: `Left`, `Right`, `Home`, `End`
//! - **Editing**: `Backspace`, `Delete`, `LineDeleteLeft`, `LineDeleteRight`,
//!   `WordDelete`, `Unicode`
//! - **Termination**: `Escape`, `Return`, `ShiftReturn`, `ControlReturn`
//!
//! Editing keys that change the filter text refilter immediately.
//!
//! # Example
//!
//! ```rust
//! use pickmenu::{Choice, Key, Menu, RunResult};
//!
//! let mut menu: Menu = Menu::new();
//! menu.push_item("alpha")?;
//! let beta = menu.push_item("beta")?;
//!
//! assert_eq!(menu.advance(Key::Down, 0)?, RunResult::Running);
//! assert_eq!(menu.advance(Key::Return, 0)?, RunResult::Selected(Choice::Items(vec![beta])));
//! # Ok::<(), pickmenu::MenuError>(())
//! ```

use super::keys::{Choice, Key, RunResult};
use super::state::Menu;
use crate::domain::{ItemId, Result};

/// Direction of a highlight move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// A completed highlight move inside a view of `len` rows.
#[derive(Debug, Clone, Copy)]
struct Step {
    from: usize,
    to: usize,
    direction: Direction,
}

impl Step {
    /// Rows left behind by the move, in visiting order.
    ///
    /// A wrap-around leaves only the starting row behind.
    fn passed_over(self) -> Vec<usize> {
        match self.direction {
            Direction::Down if self.to > self.from => (self.from..self.to).collect(),
            Direction::Up if self.to < self.from => ((self.to + 1)..=self.from).rev().collect(),
            _ if self.to != self.from => vec![self.from],
            _ => vec![],
        }
    }
}

impl<T> Menu<T> {
    /// Feeds one key to the menu.
    ///
    /// `codepoint` is only read for [`Key::Unicode`]; a value that is not a
    /// Unicode scalar is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`](crate::MenuError::AllocationFailure)
    /// if the filter text or the selection cannot grow. The menu is left as it
    /// was before the key.
    ///
    /// # Tracing
    ///
    /// Each call creates a debug-level span with the key.
    pub fn advance(&mut self, key: Key, codepoint: u32) -> Result<RunResult> {
        let _span = tracing::debug_span!("advance", key = ?key, codepoint).entered();

        let edited = match key {
            Key::None => false,
            Key::Up => {
                self.step(Direction::Up, 1);
                false
            }
            Key::Down => {
                self.step(Direction::Down, 1);
                false
            }
            Key::PageUp => {
                self.step(Direction::Up, self.page_len());
                false
            }
            Key::PageDown => {
                self.step(Direction::Down, self.page_len());
                false
            }
            Key::ShiftPageUp => {
                self.toggle_page(Direction::Up)?;
                false
            }
            Key::ShiftPageDown => {
                self.toggle_page(Direction::Down)?;
                false
            }
            Key::Tab => {
                if self.toggle_highlighted()? {
                    self.step(Direction::Down, 1);
                }
                false
            }
            Key::ShiftTab => {
                self.toggle_highlighted()?;
                false
            }
            Key::Left => {
                self.editor.move_by(-1);
                false
            }
            Key::Right => {
                self.editor.move_by(1);
                false
            }
            Key::Home => {
                self.editor.home();
                false
            }
            Key::End => {
                self.editor.end();
                false
            }
            Key::Backspace => self.editor.delete_before(),
            Key::Delete => self.editor.delete_at(),
            Key::LineDeleteLeft => self.editor.delete_to_start(),
            Key::LineDeleteRight => self.editor.delete_to_end(),
            Key::WordDelete => self.editor.delete_word_before(),
            Key::Unicode => match char::from_u32(codepoint) {
                Some(c) => self.editor.insert(c)?,
                None => {
                    tracing::debug!(codepoint, "ignoring invalid codepoint");
                    false
                }
            },
            Key::Escape => {
                tracing::debug!("menu cancelled");
                return Ok(RunResult::Cancel);
            }
            Key::Return => {
                let chosen = if self.selection.is_empty() {
                    self.highlighted_item().into_iter().collect()
                } else {
                    self.selected_items()
                };
                tracing::debug!(count = chosen.len(), "items accepted");
                return Ok(RunResult::Selected(Choice::Items(chosen)));
            }
            Key::ShiftReturn => {
                let chosen: Vec<ItemId> = self.highlighted_item().into_iter().collect();
                tracing::debug!(count = chosen.len(), "highlighted item accepted");
                return Ok(RunResult::Selected(Choice::Items(chosen)));
            }
            Key::ControlReturn => {
                tracing::debug!(text = %self.filter_text(), "filter text accepted");
                return Ok(RunResult::Selected(Choice::Text(self.filter_text().to_string())));
            }
        };

        if edited {
            tracing::trace!(filter = %self.filter_text(), cursor = self.cursor(), "filter edited");
            self.filter();
        }

        Ok(RunResult::Running)
    }

    /// Moves the highlight by up to `distance` rows.
    ///
    /// Moves clamp at the ends. With wrap enabled, a move that starts on the
    /// last (first) row continues at the first (last) one.
    fn step(&mut self, direction: Direction, distance: usize) -> Option<Step> {
        let from = self.highlighted_index()?;
        let last = self.filtered_items().len() - 1;

        let to = match direction {
            Direction::Down if from == last => {
                if self.wrap() {
                    0
                } else {
                    last
                }
            }
            Direction::Down => from.saturating_add(distance).min(last),
            Direction::Up if from == 0 => {
                if self.wrap() {
                    last
                } else {
                    0
                }
            }
            Direction::Up => from.saturating_sub(distance),
        };

        self.set_highlight_unchecked(to);
        Some(Step { from, to, direction })
    }

    fn toggle_page(&mut self, direction: Direction) -> Result<()> {
        let before = self.selection.clone();
        let highlighted = self.highlighted_index();

        let Some(step) = self.step(direction, self.page_len()) else {
            return Ok(());
        };

        let passed: Vec<ItemId> = step
            .passed_over()
            .into_iter()
            .map(|index| self.filtered_items()[index])
            .collect();

        for id in passed {
            if let Err(err) = self.selection.toggle(id) {
                self.selection = before;
                if let Some(index) = highlighted {
                    self.set_highlight_unchecked(index);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Toggles the highlighted item. Returns `false` when nothing is highlighted.
    fn toggle_highlighted(&mut self) -> Result<bool> {
        let Some(id) = self.highlighted_item() else {
            return Ok(false);
        };
        let selected = self.selection.toggle(id)?;
        tracing::trace!(?id, selected, "selection toggled");
        Ok(true)
    }
}
