//! Selection set tracking which items are marked for a multi-item choice.
//!
//! The set has no order of its own. Callers that need selected items in a
//! stable order walk the menu's item list and test membership.

use crate::domain::{ItemId, Result};
use std::collections::HashSet;

/// Set of selected item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<ItemId>,
}

impl SelectionSet {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id`. Returns `true` if it is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`](crate::MenuError::AllocationFailure)
    /// if the set cannot grow.
    pub fn toggle(&mut self, id: ItemId) -> Result<bool> {
        if self.ids.remove(&id) {
            return Ok(false);
        }
        self.ids.try_reserve(1)?;
        self.ids.insert(id);
        Ok(true)
    }

    /// Replaces the whole selection. An empty slice clears it.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`](crate::MenuError::AllocationFailure)
    /// if the new set cannot be built; the old selection is kept.
    pub fn set_all(&mut self, ids: &[ItemId]) -> Result<()> {
        let mut replacement = HashSet::new();
        replacement.try_reserve(ids.len())?;
        replacement.extend(ids.iter().copied());
        self.ids = replacement;
        Ok(())
    }

    /// Drops `id` from the selection. Returns whether it was selected.
    pub fn remove(&mut self, id: ItemId) -> bool {
        self.ids.remove(&id)
    }

    /// Keeps only ids accepted by `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&ItemId) -> bool) {
        self.ids.retain(keep);
    }

    /// Removes every id.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
