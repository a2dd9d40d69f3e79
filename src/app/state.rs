//! Menu state: items, filtered view, highlight, selection and presentation.
//!
//! [`Menu`] is the single source of truth for one interactive session. It owns
//! an arena of items keyed by [`ItemId`]; the item list, the filtered view and
//! the selection hold ids only, so removing an item can never leave a dangling
//! reference behind.
//!
//! # State Components
//!
//! - **Arena**: every registered item, attached or not
//! - **Items**: attached ids in insertion order
//! - **Filtered View**: ids matching the filter; mirrors `items` while the last
//!   computed filter had no tokens
//! - **Highlight**: position inside the filtered view
//! - **Selection**: ids marked for a multi-item choice
//! - **Editor**: filter text and cursor
//!
//! # Staleness
//!
//! Item edits and API changes to the filter text do not refilter. The view
//! keeps its last computed contents (minus removed items) until
//! [`Menu::filter`] runs. Key-driven edits through [`Menu::advance`] refilter
//! immediately.
//!
//! # Example
//!
//! ```rust
//! use pickmenu::{FilterMode, Menu};
//!
//! let mut menu: Menu = Menu::new();
//! menu.push_item("alpha")?;
//! menu.push_item("beta")?;
//! menu.set_filter_mode(FilterMode::CaseInsensitive);
//! menu.set_filter_text("ALP")?;
//! menu.filter();
//! assert_eq!(menu.filtered_items().len(), 1);
//! # Ok::<(), pickmenu::MenuError>(())
//! ```

use super::editor::TextEditor;
use super::filter::Matcher;
use super::keys::FilterMode;
use super::selection::SelectionSet;
use crate::domain::{Item, ItemId, MenuError, Result};
use crate::ui::theme::{ColorElement, Theme};
use crate::ui::viewmodel::{MenuView, RowView};
use slotmap::SlotMap;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;

/// Font description used when none is configured.
pub const DEFAULT_FONT: &str = "monospace 10";

/// Interactive menu: the aggregate the key state machine operates on.
pub struct Menu<T = ()> {
    arena: SlotMap<ItemId, Item<T>>,
    items: Vec<ItemId>,
    attached: HashSet<ItemId>,
    filtered: Option<Vec<ItemId>>,
    stale: bool,
    highlighted: usize,
    pub(crate) selection: SelectionSet,
    pub(crate) editor: TextEditor,
    filter_mode: FilterMode,
    lines: u32,
    wrap: bool,
    page_hint: usize,
    title: Option<String>,
    prefix: Option<String>,
    font: String,
    theme: Theme,
    monitor: u32,
    bottom: bool,
    grab: bool,
    userdata: Option<Box<dyn Any>>,
}

impl<T> Default for Menu<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Menu<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menu")
            .field("items", &self.items.len())
            .field("filtered", &self.filtered_items().len())
            .field("stale", &self.stale)
            .field("highlighted", &self.highlighted_index())
            .field("selected", &self.selection.len())
            .field("filter", &self.editor.text())
            .field("filter_mode", &self.filter_mode)
            .field("lines", &self.lines)
            .field("wrap", &self.wrap)
            .finish_non_exhaustive()
    }
}

/// What to highlight when the previously highlighted item is gone.
#[derive(Debug, Clone, Copy)]
enum Fallback {
    /// Go back to the first row.
    First,
    /// Keep the old position, clamped into the new view.
    Clamp,
}

impl<T> Menu<T> {
    /// Creates an empty menu with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            items: Vec::new(),
            attached: HashSet::new(),
            filtered: None,
            stale: false,
            highlighted: 0,
            selection: SelectionSet::new(),
            editor: TextEditor::new(),
            filter_mode: FilterMode::default(),
            lines: 0,
            wrap: false,
            page_hint: 1,
            title: None,
            prefix: None,
            font: DEFAULT_FONT.to_string(),
            theme: Theme::default(),
            monitor: 0,
            bottom: false,
            grab: false,
            userdata: None,
        }
    }

    // ----- item arena ---------------------------------------------------

    /// Stores a detached item in the arena and returns its identity.
    pub fn register(&mut self, item: Item<T>) -> ItemId {
        let id = self.arena.insert(item);
        tracing::trace!(?id, "item registered");
        id
    }

    /// Creates an item with `text` and appends it to the item list.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`] if the item list cannot grow;
    /// the item is not registered in that case.
    pub fn push_item(&mut self, text: impl Into<String>) -> Result<ItemId> {
        self.items.try_reserve(1)?;
        self.attached.try_reserve(1)?;
        let id = self.register(Item::new(text));
        self.add_item(id)?;
        Ok(id)
    }

    /// Looks up a registered item.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item<T>> {
        self.arena.get(id)
    }

    /// Looks up a registered item mutably.
    ///
    /// Editing text does not refilter; call [`Menu::filter`] after a batch.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item<T>> {
        self.arena.get_mut(id)
    }

    /// Returns the text of a registered item, or `""` for unknown ids.
    #[must_use]
    pub fn text_of(&self, id: ItemId) -> &str {
        self.arena.get(id).map_or("", Item::text)
    }

    /// Detaches the item from every list and hands it back to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] if `id` is not registered.
    pub fn free_item(&mut self, id: ItemId) -> Result<Item<T>> {
        if !self.arena.contains_key(id) {
            return Err(MenuError::NotFound);
        }
        if self.contains(id) {
            self.remove_item(id)?;
        }
        self.arena.remove(id).ok_or(MenuError::NotFound)
    }

    // ----- item list ----------------------------------------------------

    /// Appends a registered item to the item list.
    ///
    /// Adding an item that is already attached is a successful no-op. While a
    /// filter is active the new item shows up after the next [`Menu::filter`].
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] for unregistered ids and
    /// [`MenuError::AllocationFailure`] if the list cannot grow.
    pub fn add_item(&mut self, id: ItemId) -> Result<()> {
        let len = self.items.len();
        self.add_item_at(id, len)
    }

    /// Inserts a registered item at `index` in the item list.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] for unregistered ids,
    /// [`MenuError::InvalidIndex`] if `index > len`, and
    /// [`MenuError::AllocationFailure`] if the list cannot grow.
    pub fn add_item_at(&mut self, id: ItemId, index: usize) -> Result<()> {
        if !self.arena.contains_key(id) {
            return Err(MenuError::NotFound);
        }
        if self.contains(id) {
            return Ok(());
        }
        if index > self.items.len() {
            return Err(MenuError::InvalidIndex {
                index,
                len: self.items.len(),
            });
        }
        self.items.try_reserve(1)?;
        self.attached.try_reserve(1)?;

        let prev = self.highlighted_item();
        self.items.insert(index, id);
        self.attached.insert(id);
        if self.filtered.is_some() {
            self.stale = true;
        }
        self.relocate(prev, Fallback::Clamp);

        tracing::trace!(?id, index, total = self.items.len(), "item added");
        Ok(())
    }

    /// Detaches an item. The item stays registered.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] if the item is not attached.
    pub fn remove_item(&mut self, id: ItemId) -> Result<()> {
        if !self.attached.contains(&id) {
            return Err(MenuError::NotFound);
        }
        let index = self
            .items
            .iter()
            .position(|&other| other == id)
            .ok_or(MenuError::NotFound)?;
        self.remove_item_at(index).map(|_| ())
    }

    /// Detaches the item at `index` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::InvalidIndex`] if `index` is out of range.
    pub fn remove_item_at(&mut self, index: usize) -> Result<ItemId> {
        if index >= self.items.len() {
            return Err(MenuError::InvalidIndex {
                index,
                len: self.items.len(),
            });
        }

        let prev = self.highlighted_item();
        let id = self.items.remove(index);
        self.attached.remove(&id);
        if let Some(filtered) = self.filtered.as_mut() {
            filtered.retain(|&other| other != id);
        }
        self.selection.remove(id);
        self.relocate(prev.filter(|&p| p != id), Fallback::Clamp);

        tracing::trace!(?id, index, total = self.items.len(), "item removed");
        Ok(id)
    }

    /// Replaces the item list wholesale. Duplicate ids keep their first
    /// position. An empty slice detaches everything.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] if any id is unregistered and
    /// [`MenuError::AllocationFailure`] if the list cannot be built; nothing
    /// changes in either case.
    pub fn set_items(&mut self, ids: &[ItemId]) -> Result<()> {
        if ids.iter().any(|&id| !self.arena.contains_key(id)) {
            return Err(MenuError::NotFound);
        }

        let mut replacement: Vec<ItemId> = Vec::new();
        let mut attached: HashSet<ItemId> = HashSet::new();
        replacement.try_reserve(ids.len())?;
        attached.try_reserve(ids.len())?;
        for &id in ids {
            if attached.insert(id) {
                replacement.push(id);
            }
        }

        let prev = self.highlighted_item();
        self.items = replacement;
        self.attached = attached;
        let attached = &self.attached;
        self.selection.retain(|id| attached.contains(id));
        if let Some(filtered) = self.filtered.as_mut() {
            filtered.retain(|id| attached.contains(id));
            self.stale = true;
        }
        self.relocate(prev, Fallback::Clamp);

        tracing::debug!(total = self.items.len(), "items replaced");
        Ok(())
    }

    /// Detaches every item. Registered items stay in the arena.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.attached.clear();
        self.selection.clear();
        if let Some(filtered) = self.filtered.as_mut() {
            filtered.clear();
        }
        self.highlighted = 0;
    }

    /// Attached ids in insertion order.
    ///
    /// Valid until the next mutating call.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Returns `true` if `id` is attached.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.attached.contains(&id)
    }

    /// Ids currently shown, in filter order.
    ///
    /// Valid until the next mutating call.
    #[must_use]
    pub fn filtered_items(&self) -> &[ItemId] {
        self.filtered.as_deref().unwrap_or(&self.items)
    }

    /// Iterates the filtered view together with the items.
    pub fn iter_filtered(&self) -> impl Iterator<Item = (ItemId, &Item<T>)> + '_ {
        self.filtered_items()
            .iter()
            .filter_map(|&id| self.arena.get(id).map(|item| (id, item)))
    }

    // ----- filter -------------------------------------------------------

    /// Current filter text.
    #[must_use]
    pub fn filter_text(&self) -> &str {
        self.editor.text()
    }

    /// Cursor position inside the filter text, in codepoints.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.editor.cursor()
    }

    /// Replaces the filter text and moves the cursor to its end.
    ///
    /// Marks the view stale; call [`Menu::filter`] to apply.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`] if the text cannot be stored.
    pub fn set_filter_text(&mut self, text: &str) -> Result<()> {
        if self.editor.set_text(text)? {
            self.stale = true;
        }
        Ok(())
    }

    /// Active filter mode.
    #[must_use]
    pub const fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    /// Changes the filter mode. Marks the view stale if the mode differs.
    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        if self.filter_mode != mode {
            self.filter_mode = mode;
            self.stale = true;
        }
    }

    /// Returns `true` if items or filter changed since the last [`Menu::filter`].
    #[must_use]
    pub const fn is_filter_stale(&self) -> bool {
        self.stale
    }

    /// Recomputes the filtered view.
    ///
    /// The highlight follows the previously highlighted item when it still
    /// matches and falls back to the first row otherwise.
    pub fn filter(&mut self) {
        let matcher = Matcher::new(self.editor.text(), self.filter_mode);

        let _span = tracing::debug_span!(
            "apply_filter",
            total_items = self.items.len(),
            tokens = matcher.tokens().len(),
            mode = ?self.filter_mode
        )
        .entered();

        let prev = self.highlighted_item();

        self.filtered = if matcher.is_empty() {
            None
        } else {
            Some(
                self.items
                    .iter()
                    .copied()
                    .filter(|&id| self.arena.get(id).is_some_and(|item| matcher.matches(item.text())))
                    .collect(),
            )
        };
        self.stale = false;
        self.relocate(prev, Fallback::First);

        tracing::debug!(
            filtered_count = self.filtered_items().len(),
            highlighted = ?self.highlighted_index(),
            "filter applied"
        );
    }

    // ----- highlight ----------------------------------------------------

    /// Index of the highlighted row, or `None` when the view is empty.
    #[must_use]
    pub fn highlighted_index(&self) -> Option<usize> {
        let len = self.filtered_items().len();
        (len > 0).then(|| self.highlighted.min(len - 1))
    }

    /// Id of the highlighted item, if any.
    #[must_use]
    pub fn highlighted_item(&self) -> Option<ItemId> {
        self.highlighted_index()
            .map(|index| self.filtered_items()[index])
    }

    /// Highlights the row at `index` of the filtered view.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::InvalidIndex`] if `index` is out of range.
    pub fn set_highlighted_index(&mut self, index: usize) -> Result<()> {
        let len = self.filtered_items().len();
        if index >= len {
            return Err(MenuError::InvalidIndex { index, len });
        }
        self.highlighted = index;
        Ok(())
    }

    /// Highlights `id` if it is part of the filtered view.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] if the item is not visible.
    pub fn set_highlighted_item(&mut self, id: ItemId) -> Result<()> {
        let index = self
            .filtered_items()
            .iter()
            .position(|&other| other == id)
            .ok_or(MenuError::NotFound)?;
        self.highlighted = index;
        Ok(())
    }

    pub(crate) fn set_highlight_unchecked(&mut self, index: usize) {
        self.highlighted = index;
    }

    fn relocate(&mut self, prev: Option<ItemId>, fallback: Fallback) {
        let view = self.filtered_items();
        let len = view.len();
        let found = prev.and_then(|id| {
            if view.get(self.highlighted) == Some(&id) {
                Some(self.highlighted)
            } else {
                view.iter().position(|&other| other == id)
            }
        });
        self.highlighted = match found {
            Some(index) => index,
            None if len == 0 => 0,
            None => match fallback {
                Fallback::First => 0,
                Fallback::Clamp => self.highlighted.min(len - 1),
            },
        };
    }

    // ----- selection ----------------------------------------------------

    /// Selected ids in item-list order.
    #[must_use]
    pub fn selected_items(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .copied()
            .filter(|&id| self.selection.contains(id))
            .collect()
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection.contains(id)
    }

    /// Replaces the selection. An empty slice clears it.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::NotFound`] if any id is not attached, and
    /// [`MenuError::AllocationFailure`] if the set cannot be built.
    pub fn set_selected_items(&mut self, ids: &[ItemId]) -> Result<()> {
        if ids.iter().any(|&id| !self.contains(id)) {
            return Err(MenuError::NotFound);
        }
        self.selection.set_all(ids)
    }

    // ----- layout -------------------------------------------------------

    /// Requested vertical row count; 0 means single-line layout.
    #[must_use]
    pub const fn lines(&self) -> u32 {
        self.lines
    }

    /// Sets the requested vertical row count.
    pub fn set_lines(&mut self, lines: u32) {
        self.lines = lines;
    }

    /// Whether navigation wraps around at the ends.
    #[must_use]
    pub const fn wrap(&self) -> bool {
        self.wrap
    }

    /// Turns wrap-around navigation on or off.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Rows moved by one page: `lines`, or the renderer's page size when
    /// `lines` is 0.
    #[must_use]
    pub fn page_len(&self) -> usize {
        if self.lines > 0 {
            self.lines as usize
        } else {
            self.page_hint.max(1)
        }
    }

    /// Records how many rows the renderer actually shows.
    pub fn set_page_hint(&mut self, rows: usize) {
        self.page_hint = rows.max(1);
    }

    /// Whether the menu is placed at the bottom of the screen.
    #[must_use]
    pub const fn bottom(&self) -> bool {
        self.bottom
    }

    /// Places the menu at the bottom (`true`) or top of the screen.
    pub fn set_bottom(&mut self, bottom: bool) {
        self.bottom = bottom;
    }

    /// Monitor index; 0 is the active monitor.
    #[must_use]
    pub const fn monitor(&self) -> u32 {
        self.monitor
    }

    /// Sets the monitor index.
    pub fn set_monitor(&mut self, monitor: u32) {
        self.monitor = monitor;
    }

    /// Whether the renderer should grab the keyboard.
    #[must_use]
    pub const fn grab(&self) -> bool {
        self.grab
    }

    /// Asks the renderer to grab (or release) the keyboard.
    pub fn set_grab(&mut self, grab: bool) {
        self.grab = grab;
    }

    // ----- presentation -------------------------------------------------

    /// Title shown before the filter, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sets or clears the title.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`] if the text cannot be stored.
    pub fn set_title(&mut self, title: Option<&str>) -> Result<()> {
        self.title = copy_text(title)?;
        Ok(())
    }

    /// Prefix drawn before the highlighted row in list layout.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Sets or clears the highlight prefix.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`] if the text cannot be stored.
    pub fn set_prefix(&mut self, prefix: Option<&str>) -> Result<()> {
        self.prefix = copy_text(prefix)?;
        Ok(())
    }

    /// Font description handed to renderers.
    #[must_use]
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Sets the font description; `None` restores [`DEFAULT_FONT`].
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`] if the text cannot be stored.
    pub fn set_font(&mut self, font: Option<&str>) -> Result<()> {
        self.font = copy_text(Some(font.unwrap_or(DEFAULT_FONT)))?.unwrap_or_default();
        Ok(())
    }

    /// Hex color of a colorable element.
    #[must_use]
    pub fn color(&self, element: ColorElement) -> &str {
        self.theme.colors.get(element)
    }

    /// Sets the hex color of an element. The value is stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::AllocationFailure`] if the text cannot be stored.
    pub fn set_color(&mut self, element: ColorElement, hex: &str) -> Result<()> {
        let value = copy_text(Some(hex))?.unwrap_or_default();
        self.theme.colors.set(element, value);
        Ok(())
    }

    /// Active theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replaces every color at once.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    // ----- userdata -----------------------------------------------------

    /// Attaches an opaque payload to the menu, replacing any previous one.
    pub fn set_userdata<D: Any>(&mut self, userdata: D) {
        self.userdata = Some(Box::new(userdata));
    }

    /// Returns the payload if it has type `D`.
    #[must_use]
    pub fn userdata<D: Any>(&self) -> Option<&D> {
        self.userdata.as_ref().and_then(|data| data.downcast_ref())
    }

    /// Removes and returns the payload.
    pub fn take_userdata(&mut self) -> Option<Box<dyn Any>> {
        self.userdata.take()
    }

    // ----- view ---------------------------------------------------------

    /// Computes a renderable snapshot with at most `max_rows` list rows.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Center the window on the highlighted row
    /// 2. Shift it back when near the end so the window stays full
    /// 3. Mark highlight and selection per row and compute match ranges
    #[must_use]
    pub fn compute_view(&self, max_rows: usize) -> MenuView {
        let view = self.filtered_items();
        let highlighted = self.highlighted_index();
        let anchor = highlighted.unwrap_or(0);

        let mut visible_start = anchor.saturating_sub(max_rows / 2);
        let visible_end = (visible_start + max_rows).min(view.len());
        if visible_end - visible_start < max_rows && view.len() >= max_rows {
            visible_start = visible_end.saturating_sub(max_rows);
        }

        let matcher = Matcher::new(self.editor.text(), self.filter_mode);

        let rows = view[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative, &id)| {
                let text = self.text_of(id);
                RowView {
                    text: text.to_string(),
                    is_highlighted: highlighted == Some(visible_start + relative),
                    is_selected: self.selection.contains(id),
                    match_ranges: matcher.match_ranges(text),
                }
            })
            .collect();

        MenuView {
            title: self.title.clone(),
            prefix: self.prefix.clone(),
            filter: self.editor.text().to_string(),
            cursor: self.editor.cursor(),
            rows,
            first_row: visible_start,
            filtered_count: view.len(),
            total_count: self.items.len(),
            selected_count: self.selection.len(),
            lines: self.lines,
            bottom: self.bottom,
            font: self.font.clone(),
            colors: self.theme.colors.clone(),
        }
    }
}

fn copy_text(text: Option<&str>) -> Result<Option<String>> {
    text.map(|t| {
        let mut owned = String::new();
        owned.try_reserve_exact(t.len())?;
        owned.push_str(t);
        Ok(owned)
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(texts: &[&str]) -> (Menu, Vec<ItemId>) {
        let mut menu = Menu::new();
        let ids = texts.iter().map(|t| menu.push_item(*t).unwrap()).collect();
        (menu, ids)
    }

    #[test]
    fn initial_highlight_depends_on_items() {
        let (empty, _) = menu(&[]);
        assert_eq!(empty.highlighted_index(), None);
        let (menu, ids) = menu(&["a"]);
        assert_eq!(menu.highlighted_index(), Some(0));
        assert_eq!(menu.highlighted_item(), Some(ids[0]));
    }

    #[test]
    fn adding_attached_item_is_noop() {
        let (mut menu, ids) = menu(&["a", "b"]);
        menu.add_item(ids[0]).unwrap();
        assert_eq!(menu.items(), &ids[..]);
    }

    #[test]
    fn add_item_at_validates_index() {
        let (mut menu, _) = menu(&["a"]);
        let id = menu.register(Item::new("b"));
        assert!(matches!(
            menu.add_item_at(id, 5),
            Err(MenuError::InvalidIndex { index: 5, len: 1 })
        ));
        menu.add_item_at(id, 0).unwrap();
        assert_eq!(menu.items()[0], id);
    }

    #[test]
    fn inserting_before_highlight_keeps_highlighted_item() {
        let (mut menu, ids) = menu(&["a", "b"]);
        menu.set_highlighted_index(1).unwrap();
        let id = menu.register(Item::new("z"));
        menu.add_item_at(id, 0).unwrap();
        assert_eq!(menu.highlighted_item(), Some(ids[1]));
    }

    #[test]
    fn duplicate_text_items_are_distinct() {
        let (mut menu, ids) = menu(&["same", "same"]);
        menu.remove_item(ids[0]).unwrap();
        assert_eq!(menu.items(), &[ids[1]]);
    }

    #[test]
    fn remove_unknown_item_reports_not_found() {
        let (mut menu, _) = menu(&["a"]);
        let detached = menu.register(Item::new("b"));
        assert!(matches!(menu.remove_item(detached), Err(MenuError::NotFound)));
        assert!(matches!(
            menu.remove_item_at(3),
            Err(MenuError::InvalidIndex { index: 3, len: 1 })
        ));
    }

    #[test]
    fn removing_item_drops_it_from_selection_only() {
        let (mut menu, ids) = menu(&["a", "b", "c"]);
        menu.set_selected_items(&[ids[0], ids[2]]).unwrap();
        menu.remove_item(ids[0]).unwrap();
        assert_eq!(menu.selected_items(), vec![ids[2]]);
        assert!(menu.item(ids[0]).is_some());
    }

    #[test]
    fn removing_last_highlighted_clamps() {
        let (mut menu, ids) = menu(&["a", "b", "c"]);
        menu.set_highlighted_index(2).unwrap();
        menu.remove_item_at(2).unwrap();
        assert_eq!(menu.highlighted_item(), Some(ids[1]));
    }

    #[test]
    fn free_item_detaches_and_returns_it() {
        let (mut menu, ids) = menu(&["a", "b"]);
        let item = menu.free_item(ids[0]).unwrap();
        assert_eq!(item.text(), "a");
        assert_eq!(menu.items(), &[ids[1]]);
        assert!(matches!(menu.free_item(ids[0]), Err(MenuError::NotFound)));
    }

    #[test]
    fn set_items_rejects_unknown_ids_without_change() {
        let (mut menu, ids) = menu(&["a", "b"]);
        let foreign = {
            let mut scratch: SlotMap<ItemId, ()> = SlotMap::with_key();
            scratch.insert(());
            scratch.insert(());
            scratch.insert(())
        };
        assert!(matches!(menu.set_items(&[ids[1], foreign]), Err(MenuError::NotFound)));
        assert_eq!(menu.items(), &ids[..]);
    }

    #[test]
    fn set_items_dedups_and_prunes_selection() {
        let (mut menu, ids) = menu(&["a", "b", "c"]);
        menu.set_selected_items(&[ids[0], ids[1]]).unwrap();
        menu.set_items(&[ids[1], ids[2], ids[1]]).unwrap();
        assert_eq!(menu.items(), &[ids[1], ids[2]]);
        assert_eq!(menu.selected_items(), vec![ids[1]]);
    }

    #[test]
    fn large_batches_keep_membership_consistent() {
        const N: usize = 50_000;
        let mut menu: Menu = Menu::new();
        let ids: Vec<ItemId> = (0..N).map(|i| menu.push_item(format!("item{i}")).unwrap()).collect();
        assert_eq!(menu.items().len(), N);
        assert!(ids.iter().all(|&id| menu.contains(id)));

        let doubled: Vec<ItemId> = ids.iter().chain(ids.iter().rev()).copied().collect();
        menu.set_items(&doubled).unwrap();
        assert_eq!(menu.items(), &ids[..]);

        menu.remove_item(ids[N / 2]).unwrap();
        assert!(!menu.contains(ids[N / 2]));
        assert!(matches!(menu.remove_item(ids[N / 2]), Err(MenuError::NotFound)));
        menu.add_item(ids[N / 2]).unwrap();
        assert_eq!(menu.items().last(), Some(&ids[N / 2]));

        menu.clear_items();
        assert!(!menu.contains(ids[0]));
        menu.add_item(ids[0]).unwrap();
        assert_eq!(menu.items(), &[ids[0]]);
    }

    #[test]
    fn set_selected_items_requires_attached_items() {
        let (mut menu, ids) = menu(&["a"]);
        let detached = menu.register(Item::new("b"));
        assert!(matches!(
            menu.set_selected_items(&[ids[0], detached]),
            Err(MenuError::NotFound)
        ));
        assert!(menu.selected_items().is_empty());
    }

    #[test]
    fn selected_items_follow_item_order() {
        let (mut menu, ids) = menu(&["a", "b", "c"]);
        menu.set_selected_items(&[ids[2], ids[0]]).unwrap();
        assert_eq!(menu.selected_items(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn api_filter_changes_wait_for_filter_call() {
        let (mut menu, ids) = menu(&["apple", "banana"]);
        menu.set_filter_text("ban").unwrap();
        assert!(menu.is_filter_stale());
        assert_eq!(menu.filtered_items().len(), 2);
        menu.filter();
        assert!(!menu.is_filter_stale());
        assert_eq!(menu.filtered_items(), &[ids[1]]);
    }

    #[test]
    fn items_added_under_active_filter_appear_after_refilter() {
        let (mut menu, _) = menu(&["apple"]);
        menu.set_filter_text("an").unwrap();
        menu.filter();
        let id = menu.push_item("banana").unwrap();
        assert!(menu.filtered_items().is_empty());
        menu.filter();
        assert_eq!(menu.filtered_items(), &[id]);
    }

    #[test]
    fn refilter_relocates_highlighted_item() {
        let (mut menu, ids) = menu(&["ab", "b", "abc"]);
        menu.set_highlighted_index(2).unwrap();
        menu.set_filter_text("a").unwrap();
        menu.filter();
        assert_eq!(menu.highlighted_item(), Some(ids[2]));
        assert_eq!(menu.highlighted_index(), Some(1));
    }

    #[test]
    fn refilter_falls_back_to_first_row() {
        let (mut menu, ids) = menu(&["ab", "b", "abc"]);
        menu.set_highlighted_index(1).unwrap();
        menu.set_filter_text("a").unwrap();
        menu.filter();
        assert_eq!(menu.highlighted_item(), Some(ids[0]));
    }

    #[test]
    fn highlight_setters_validate() {
        let (mut menu, ids) = menu(&["a", "b"]);
        assert!(menu.set_highlighted_index(2).is_err());
        menu.set_filter_text("b").unwrap();
        menu.filter();
        assert!(matches!(menu.set_highlighted_item(ids[0]), Err(MenuError::NotFound)));
        menu.set_highlighted_item(ids[1]).unwrap();
        assert_eq!(menu.highlighted_index(), Some(0));
    }

    #[test]
    fn presentation_fields_are_stored_verbatim() {
        let mut menu: Menu = Menu::new();
        menu.set_title(Some("run:")).unwrap();
        menu.set_prefix(Some(">")).unwrap();
        menu.set_font(Some("Terminus 9")).unwrap();
        menu.set_color(ColorElement::HighlightedFg, "not-a-color").unwrap();
        assert_eq!(menu.title(), Some("run:"));
        assert_eq!(menu.prefix(), Some(">"));
        assert_eq!(menu.font(), "Terminus 9");
        assert_eq!(menu.color(ColorElement::HighlightedFg), "not-a-color");
        menu.set_font(None).unwrap();
        assert_eq!(menu.font(), DEFAULT_FONT);
        menu.set_title(None).unwrap();
        assert_eq!(menu.title(), None);
    }

    #[test]
    fn userdata_is_type_erased() {
        let mut menu: Menu = Menu::new();
        menu.set_userdata(7_u8);
        assert_eq!(menu.userdata::<u8>(), Some(&7));
        assert_eq!(menu.userdata::<String>(), None);
        assert!(menu.take_userdata().is_some());
    }

    #[test]
    fn page_len_uses_lines_or_hint() {
        let mut menu: Menu = Menu::new();
        assert_eq!(menu.page_len(), 1);
        menu.set_page_hint(12);
        assert_eq!(menu.page_len(), 12);
        menu.set_lines(5);
        assert_eq!(menu.page_len(), 5);
    }

    #[test]
    fn compute_view_windows_around_highlight() {
        let texts: Vec<String> = (0..10).map(|i| format!("item{i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let (mut menu, _) = menu(&refs);
        menu.set_highlighted_index(9).unwrap();
        let view = menu.compute_view(4);
        assert_eq!(view.first_row, 6);
        assert_eq!(view.rows.len(), 4);
        assert!(view.rows[3].is_highlighted);

        menu.set_highlighted_index(5).unwrap();
        let view = menu.compute_view(4);
        assert_eq!(view.first_row, 3);
        assert!(view.rows[2].is_highlighted);
    }

    #[test]
    fn compute_view_reports_matches_and_counts() {
        let (mut menu, ids) = menu(&["foobar", "bar"]);
        menu.set_selected_items(&[ids[1]]).unwrap();
        menu.set_filter_text("bar").unwrap();
        menu.filter();
        let view = menu.compute_view(10);
        assert_eq!(view.filtered_count, 2);
        assert_eq!(view.total_count, 2);
        assert_eq!(view.selected_count, 1);
        assert_eq!(view.rows[0].match_ranges, vec![(3, 6)]);
        assert!(view.rows[1].is_selected);
    }
}
