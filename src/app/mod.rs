//! Application layer: the menu engine.
//!
//! This module holds everything that decides *what* the menu shows and how it
//! reacts to keys. It knows nothing about terminals; renderers sit on top of it
//! and only exchange [`MenuView`](crate::ui::MenuView) snapshots and decoded
//! keys with it.
//!
//! ```text
//! Renderer → (Key, codepoint) → Menu::advance → State Mutations → RunResult
//!     ↑                                                              │
//!     └──────────────────── Menu::compute_view ◄─────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`editor`]: Filter text with a codepoint cursor
//! - [`filter`]: Token-based substring filter
//! - [`handler`]: Key processing and state transitions
//! - [`keys`]: Key, filter mode and run result types
//! - [`selection`]: Set of selected item ids
//! - [`state`]: The [`Menu`] aggregate and view computation

pub mod editor;
pub mod filter;
pub mod handler;
pub mod keys;
pub mod selection;
pub mod state;

pub use editor::TextEditor;
pub use filter::{filter, Matcher};
pub use keys::{Choice, FilterMode, Key, RunResult};
pub use selection::SelectionSet;
pub use state::{Menu, DEFAULT_FONT};
