//! Item domain model.
//!
//! An [`Item`] is one selectable line of text plus an opaque payload. Items are
//! stored in the menu's arena and addressed by [`ItemId`]; two items with the
//! same text are still distinct because their ids differ.

use crate::domain::error::Result;
use slotmap::new_key_type;

new_key_type! {
    /// Stable identity of an item inside a menu's arena.
    ///
    /// Ids stay valid while the item is attached, detached or re-attached, and
    /// become invalid only when the owner frees the item.
    pub struct ItemId;
}

/// A selectable text record with an opaque user payload.
///
/// The payload type `T` is never inspected by the engine; it travels with the
/// item unmodified.
///
/// # Examples
///
/// ```
/// use pickmenu::Item;
///
/// let mut item: Item<u32> = Item::new("firefox");
/// item.set_userdata(Some(42));
/// item.set_text("firefox --private-window")?;
/// assert_eq!(item.text(), "firefox --private-window");
/// assert_eq!(item.userdata(), Some(&42));
/// # Ok::<(), pickmenu::MenuError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T = ()> {
    text: String,
    userdata: Option<T>,
}

impl<T> Item<T> {
    /// Creates a detached item with the given text and no payload.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            userdata: None,
        }
    }

    /// Returns the item's text. May be empty.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the item's text.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`](crate::MenuError::AllocationFailure)
    /// when the new text cannot be stored; the previous text is kept.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        let mut replacement = String::new();
        replacement.try_reserve_exact(text.len())?;
        replacement.push_str(text);
        self.text = replacement;
        Ok(())
    }

    /// Returns the opaque payload, if any.
    #[must_use]
    pub const fn userdata(&self) -> Option<&T> {
        self.userdata.as_ref()
    }

    /// Returns the opaque payload mutably, if any.
    pub fn userdata_mut(&mut self) -> Option<&mut T> {
        self.userdata.as_mut()
    }

    /// Replaces the payload, returning the previous one.
    pub fn set_userdata(&mut self, userdata: Option<T>) -> Option<T> {
        std::mem::replace(&mut self.userdata, userdata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_replaces_contents() {
        let mut item: Item = Item::new("old");
        item.set_text("").unwrap();
        assert_eq!(item.text(), "");
        item.set_text("new").unwrap();
        assert_eq!(item.text(), "new");
    }

    #[test]
    fn userdata_round_trips_untouched() {
        let mut item = Item::new("x");
        assert!(item.userdata().is_none());
        assert_eq!(item.set_userdata(Some(vec![1, 2])), None);
        item.userdata_mut().unwrap().push(3);
        assert_eq!(item.set_userdata(None), Some(vec![1, 2, 3]));
    }
}
