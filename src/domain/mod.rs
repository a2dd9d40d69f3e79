//! Domain layer for the menu engine.
//!
//! Contains the types every other layer depends on and nothing that knows about
//! rendering or configuration.
//!
//! # Organization
//!
//! - [`error`]: Error type and result alias
//! - [`item`]: Item record and its arena identity
//!
//! # Examples
//!
//! ```
//! use pickmenu::domain::{Item, Result};
//!
//! fn make() -> Result<Item<&'static str>> {
//!     let mut item = Item::new("htop");
//!     item.set_userdata(Some("/usr/bin/htop"));
//!     Ok(item)
//! }
//! ```

pub mod error;
pub mod item;

pub use error::{MenuError, Result};
pub use item::{Item, ItemId};
