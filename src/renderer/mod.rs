//! Renderer contract and the renderers shipped with the crate.
//!
//! A renderer draws [`MenuView`] snapshots and turns raw input into the
//! `(Key, codepoint)` pairs [`Menu::advance`](crate::Menu::advance) consumes.
//! The menu never draws; [`run`](crate::run) drives one renderer until the
//! menu finishes.
//!
//! # Modules
//!
//! - [`registry`]: Named renderers and the default selection policy
//! - [`terminal`]: `crossterm` renderer drawing on the controlling terminal
//!
//! # Implementing a Renderer
//!
//! ```rust
//! use pickmenu::renderer::{Priority, Renderer};
//! use pickmenu::ui::MenuView;
//! use pickmenu::{Key, Result};
//!
//! /// Replays a fixed list of keys and draws nothing.
//! struct Scripted(Vec<(Key, u32)>);
//!
//! impl Renderer for Scripted {
//!     fn name(&self) -> &str {
//!         "scripted"
//!     }
//!
//!     fn priority(&self) -> Priority {
//!         Priority::Gui
//!     }
//!
//!     fn render(&mut self, _view: &MenuView) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn poll_key(&mut self) -> Result<(Key, u32)> {
//!         Ok(self.0.pop().unwrap_or((Key::Escape, 0)))
//!     }
//! }
//! ```

pub mod registry;
pub mod terminal;

pub use registry::RendererRegistry;
pub use terminal::{map_key_event, TerminalRenderer};

use crate::app::Key;
use crate::domain::Result;
use crate::ui::MenuView;

/// Rows requested from [`Menu::compute_view`](crate::Menu::compute_view) when a
/// renderer has no better idea.
pub const DEFAULT_VIEWPORT_ROWS: usize = 10;

/// Class of a renderer. Lower values are preferred when none is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Draws on a terminal.
    Terminal,
    /// Draws in its own window.
    Gui,
}

/// Something that can display a menu and read keys for it.
pub trait Renderer {
    /// Name used to request this renderer explicitly.
    fn name(&self) -> &str;

    /// Class used for default selection.
    fn priority(&self) -> Priority;

    /// Whether the renderer can work in the current environment.
    fn is_available(&self) -> bool {
        true
    }

    /// Rows of the filtered view to put in each snapshot for a menu with
    /// `lines` requested rows.
    fn viewport_rows(&self, lines: u32) -> usize {
        if lines > 0 {
            lines as usize
        } else {
            DEFAULT_VIEWPORT_ROWS
        }
    }

    /// Draws a snapshot. May block.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Io`](crate::MenuError::Io) if drawing fails.
    fn render(&mut self, view: &MenuView) -> Result<()>;

    /// Number of items the last frame showed, if the renderer knows it.
    ///
    /// Page keys move by this amount when the menu has no `lines` set.
    fn page_size(&self) -> Option<usize> {
        None
    }

    /// Waits for the next key. May block.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Io`](crate::MenuError::Io) if input cannot be read.
    fn poll_key(&mut self) -> Result<(Key, u32)>;
}
