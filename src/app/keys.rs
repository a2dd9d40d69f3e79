//! Key, filter mode and run result types for the menu state machine.
//!
//! These are the vocabulary of [`Menu::advance`](crate::Menu::advance): a
//! renderer decodes raw input into a [`Key`] plus a codepoint, the menu consumes
//! it and answers with a [`RunResult`].
//!
//! # State Machine
//!
//! ```text
//!            any editing / navigation key
//!              ┌──────────────┐
//!              ▼              │
//!          ┌─────────┐────────┘
//!          │ Running │
//!          └─────────┘
//!          │         │
//!  Escape  │         │  Return / ShiftReturn / ControlReturn
//!          ▼         ▼
//!     ┌────────┐ ┌──────────────────┐
//!     │ Cancel │ │ Selected(Choice) │
//!     └────────┘ └──────────────────┘
//! ```

use crate::domain::ItemId;
use serde::{Deserialize, Serialize};

/// Decoded key classes understood by the menu.
///
/// `Unicode` carries its character in the codepoint argument of
/// [`Menu::advance`](crate::Menu::advance); every other key ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Key {
    /// No input; the menu stays as it is.
    #[default]
    None,
    /// Highlight the previous item.
    Up,
    /// Highlight the next item.
    Down,
    /// Move the filter cursor one codepoint left.
    Left,
    /// Move the filter cursor one codepoint right.
    Right,
    /// Move the filter cursor to the start.
    Home,
    /// Move the filter cursor to the end.
    End,
    /// Highlight one page up.
    PageUp,
    /// Highlight one page down.
    PageDown,
    /// Page up, toggling every item passed over.
    ShiftPageUp,
    /// Page down, toggling every item passed over.
    ShiftPageDown,
    /// Delete the codepoint before the cursor.
    Backspace,
    /// Delete the codepoint under the cursor.
    Delete,
    /// Delete from the start of the filter to the cursor.
    LineDeleteLeft,
    /// Delete from the cursor to the end of the filter.
    LineDeleteRight,
    /// Delete the word before the cursor.
    WordDelete,
    /// Toggle the highlighted item and step to the next one.
    Tab,
    /// Toggle the highlighted item in place.
    ShiftTab,
    /// Abort the menu.
    Escape,
    /// Commit the selection, or the highlighted item when nothing is selected.
    Return,
    /// Commit only the highlighted item.
    ShiftReturn,
    /// Commit the typed filter text.
    ControlReturn,
    /// Insert the accompanying codepoint into the filter.
    Unicode,
}

/// Case-sensitivity policy of the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    /// Tokens must appear with identical case.
    #[default]
    CaseSensitive,
    /// Tokens and item text are lower-cased before comparing.
    CaseInsensitive,
}

impl FilterMode {
    /// Parses the names accepted in configuration files.
    ///
    /// ```
    /// use pickmenu::FilterMode;
    ///
    /// assert_eq!(FilterMode::from_name("case-insensitive"), Some(FilterMode::CaseInsensitive));
    /// assert_eq!(FilterMode::from_name("fuzzy"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "case-sensitive" | "sensitive" => Some(Self::CaseSensitive),
            "case-insensitive" | "insensitive" | "ignore-case" => Some(Self::CaseInsensitive),
            _ => None,
        }
    }
}

/// What the user committed when the menu finished with
/// [`RunResult::Selected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Items chosen from the list, in `items` order. Empty when nothing was
    /// highlighted (for example, the filter matched no item).
    Items(Vec<ItemId>),
    /// Free text typed into the filter, accepted as-is.
    Text(String),
}

/// Outcome of feeding one key to the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// The menu keeps running; render and poll again.
    Running,
    /// The user committed a choice.
    Selected(Choice),
    /// The user aborted.
    Cancel,
}

impl RunResult {
    /// Returns `true` for `Selected` and `Cancel`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}
