//! Presentation layer: view snapshots, themes and ANSI drawing.
//!
//! The menu engine produces a [`MenuView`]; this module turns it into a frame a
//! terminal can display. Renderers that draw some other way only need
//! [`viewmodel`] and [`theme`].
//!
//! ```text
//! Menu → compute_view → MenuView → draw → Frame (ANSI text + cursor)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Snapshot types handed to renderers
//! - [`renderer`]: Layout selection and frame assembly
//! - [`components`]: Prompt, list and single-line components
//! - [`helpers`]: Cursor movement, clipping and match emphasis
//! - [`theme`]: Color elements, TOML themes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{draw, frame_height, viewport_rows, Frame};
pub use theme::{ColorElement, Theme, ThemeColors};
pub use viewmodel::{MenuView, RowView};
