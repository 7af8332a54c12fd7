//! Single-choice adapter.

use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::filtering::Matchable;
use crate::selection;

use super::{ChoiceMode, ListAdapter};

/// A list adapter in which at most one enabled, non-filtered item is
/// selected at any time.
///
/// Mutations elsewhere in the list automatically repair this invariant.
/// With automatic adaptation (the default), removing or disabling the
/// selected item moves the selection to the nearest eligible item — scanning
/// ascending from the old position and wrapping to index 0 once — and the
/// first item added to an empty adapter becomes the selection.
///
/// When a filter hides the selected item the adapter reports no selection,
/// but the item keeps its flag internally: resetting the filter restores the
/// previous selection without any scan.
///
/// Triggering the selection of the currently selected item deselects it and
/// leaves the adapter without a selection.
///
/// # Example
///
/// ```
/// use roster::SingleChoiceAdapter;
///
/// let mut adapter = SingleChoiceAdapter::new();
/// adapter.add_item("x".to_string()); // first item is selected automatically
/// adapter.add_item("y".to_string());
///
/// adapter.trigger_selection_at(1).unwrap();
/// assert_eq!(adapter.selected_index(), Some(1));
/// ```
pub struct SingleChoiceAdapter<T> {
    inner: ListAdapter<T>,
}

impl<T: Clone + PartialEq + Matchable> Default for SingleChoiceAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + Matchable> SingleChoiceAdapter<T> {
    /// Creates an empty single-choice adapter with automatic selection
    /// adaptation enabled.
    pub fn new() -> Self {
        Self::with_adapt_selection(true)
    }

    /// Creates an empty single-choice adapter with the given adaptation
    /// behavior.
    pub fn with_adapt_selection(adapt: bool) -> Self {
        Self {
            inner: ListAdapter::with_mode(ChoiceMode::Single { adapt }),
        }
    }

    pub(crate) fn from_core(inner: ListAdapter<T>) -> Self {
        Self { inner }
    }

    /// `true` if the selection automatically moves to a neighboring
    /// eligible item when the selected item becomes ineligible.
    pub fn adapt_selection_automatically(&self) -> bool {
        matches!(self.inner.mode(), ChoiceMode::Single { adapt: true })
    }

    /// Changes the adaptation behavior. Turning adaptation on while no item
    /// is selected immediately assigns the selection to the first eligible
    /// item.
    pub fn set_adapt_selection_automatically(&mut self, adapt: bool) {
        self.inner.set_mode(ChoiceMode::Single { adapt });
        if adapt {
            let mut events = Vec::new();
            self.inner.repair_single_selection(&mut events);
            self.inner.finish(events);
        }
    }

    /// Selects (`true`) or unselects (`false`) the item at `index`.
    ///
    /// Selecting an eligible item while another is selected unselects the
    /// previous one first; observers see the unselection followed by the
    /// selection as one batch. Selecting the already-selected item and
    /// unselecting an unselected item are no-ops returning `false`, as are
    /// selection attempts on disabled or filtered-out items.
    pub fn set_selected_at(&mut self, index: usize, selected: bool) -> Result<bool> {
        self.inner.check_index(index)?;
        let mut events = Vec::new();
        let changed = self.inner.apply_selection(index, selected, &mut events);
        self.inner.finish(events);
        Ok(changed)
    }

    /// Selects or unselects the first item equal to `data`.
    pub fn set_selected(&mut self, data: &T, selected: bool) -> Result<bool> {
        let index = self.inner.position_of(data)?;
        self.set_selected_at(index, selected)
    }

    /// Toggles the selection of the item at `index`. Triggering the
    /// currently selected item deselects it (no other item is selected in
    /// its place).
    pub fn trigger_selection_at(&mut self, index: usize) -> Result<bool> {
        self.inner.check_index(index)?;
        let mut events = Vec::new();
        let changed = self.inner.toggle_selection(index, &mut events);
        self.inner.finish(events);
        Ok(changed)
    }

    /// Toggles the selection of the first item equal to `data`.
    pub fn trigger_selection(&mut self, data: &T) -> Result<bool> {
        let index = self.inner.position_of(data)?;
        self.trigger_selection_at(index)
    }

    /// Clears the selection, if any. Returns `false` if nothing was
    /// selected. The selection is not reassigned afterwards, regardless of
    /// the adaptation flag.
    pub fn unselect(&mut self) -> bool {
        let Some(index) = selection::selected_flag_index(self.inner.items_ref()) else {
            return false;
        };
        let mut events = Vec::new();
        let changed = self.inner.apply_selection(index, false, &mut events);
        self.inner.finish(events);
        changed
    }

    /// Backing index of the selected item, or `None` while no selection
    /// exists or the selected item is hidden by a filter.
    pub fn selected_index(&self) -> Option<usize> {
        selection::selected_flag_index(self.inner.items_ref()).filter(|&index| {
            self.inner
                .filters_ref()
                .is_visible(&self.inner.items_ref()[index])
        })
    }

    /// Payload of the selected item, or `None` while no selection exists or
    /// the selected item is hidden by a filter.
    pub fn selected_item(&self) -> Option<&T> {
        self.selected_index()
            .map(|index| self.inner.items_ref()[index].data())
    }

    /// Creates an independent copy of this adapter: the backing sequence
    /// and all flags are cloned, no listener connections are carried over.
    pub fn deep_copy(&self) -> Self {
        Self {
            inner: self.inner.deep_copy_core(),
        }
    }
}

impl<T> Deref for SingleChoiceAdapter<T> {
    type Target = ListAdapter<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for SingleChoiceAdapter<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
