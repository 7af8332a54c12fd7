//! Multiple-choice adapter.

use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::filtering::Matchable;
use crate::item::Item;

use super::{ChoiceMode, ListAdapter};

/// A list adapter in which any subset of enabled, non-filtered items may be
/// selected independently.
///
/// There is no cross-item coupling: removing or disabling one item never
/// affects another item's selection. The shared adapter surface (CRUD,
/// filtering, enable-state, item-state, sorting) is available through
/// `Deref` to [`ListAdapter`].
///
/// # Example
///
/// ```
/// use roster::MultipleChoiceAdapter;
///
/// let mut adapter = MultipleChoiceAdapter::new();
/// adapter.add_all_items(["x".to_string(), "y".to_string(), "z".to_string()]);
///
/// adapter.set_selected_at(0, true).unwrap();
/// adapter.set_selected_at(2, true).unwrap();
/// assert_eq!(adapter.selected_indices(), vec![0, 2]);
/// ```
pub struct MultipleChoiceAdapter<T> {
    inner: ListAdapter<T>,
}

impl<T: Clone + PartialEq + Matchable> Default for MultipleChoiceAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + Matchable> MultipleChoiceAdapter<T> {
    /// Creates an empty multiple-choice adapter.
    pub fn new() -> Self {
        Self {
            inner: ListAdapter::with_mode(ChoiceMode::Multiple),
        }
    }

    pub(crate) fn from_core(inner: ListAdapter<T>) -> Self {
        Self { inner }
    }

    /// Selects or unselects the item at `index`. Returns `false` if the
    /// item already was in the requested state, or if a selection was
    /// attempted on a disabled or filtered-out item.
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

    /// Toggles the selection of the item at `index`.
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

    /// Selects or unselects all items. Returns `true` only if every item
    /// ended up in the requested state; disabled or filtered-out items
    /// cannot be selected and flip the result to `false`.
    pub fn set_all_selected(&mut self, selected: bool) -> bool {
        let mut events = Vec::new();
        let mut all = true;
        for index in 0..self.inner.len() {
            self.inner.apply_selection(index, selected, &mut events);
            if self.inner.items_ref()[index].selected() != selected {
                all = false;
            }
        }
        self.inner.finish(events);
        all
    }

    /// Toggles the selection of every item. Returns `true` only if every
    /// toggle succeeded.
    pub fn trigger_all_selections(&mut self) -> bool {
        let mut events = Vec::new();
        let mut all = true;
        for index in 0..self.inner.len() {
            if !self.inner.toggle_selection(index, &mut events) {
                all = false;
            }
        }
        self.inner.finish(events);
        all
    }

    /// Backing indices of all selected items, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.inner
            .items_ref()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.selected())
            .map(|(index, _)| index)
            .collect()
    }

    /// Payloads of all selected items, in backing order.
    pub fn selected_items(&self) -> Vec<&T> {
        self.inner
            .items_ref()
            .iter()
            .filter(|item| item.selected())
            .map(Item::data)
            .collect()
    }

    /// Backing indices of all unselected items, ascending.
    pub fn unselected_indices(&self) -> Vec<usize> {
        self.inner
            .items_ref()
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.selected())
            .map(|(index, _)| index)
            .collect()
    }

    /// Payloads of all unselected items, in backing order.
    pub fn unselected_items(&self) -> Vec<&T> {
        self.inner
            .items_ref()
            .iter()
            .filter(|item| !item.selected())
            .map(Item::data)
            .collect()
    }

    /// Number of selected items.
    pub fn selection_count(&self) -> usize {
        self.inner
            .items_ref()
            .iter()
            .filter(|item| item.selected())
            .count()
    }

    /// Lowest backing index carrying a selection.
    pub fn first_selected_index(&self) -> Option<usize> {
        self.inner.items_ref().iter().position(Item::selected)
    }

    /// Highest backing index carrying a selection.
    pub fn last_selected_index(&self) -> Option<usize> {
        self.inner.items_ref().iter().rposition(Item::selected)
    }

    /// Creates an independent copy of this adapter: the backing sequence
    /// and all flags are cloned, no listener connections are carried over.
    pub fn deep_copy(&self) -> Self {
        Self {
            inner: self.inner.deep_copy_core(),
        }
    }
}

impl<T> Deref for MultipleChoiceAdapter<T> {
    type Target = ListAdapter<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for MultipleChoiceAdapter<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn adapter(payloads: &[&str]) -> MultipleChoiceAdapter<String> {
        let mut adapter = MultipleChoiceAdapter::new();
        adapter.add_all_items(payloads.iter().map(|p| p.to_string()));
        adapter
    }

    #[test]
    fn test_independent_selection() {
        // Scenario: [x, y, z]; selecting x and z yields indices [0, 2].
        let mut adapter = adapter(&["x", "y", "z"]);
        assert!(adapter.set_selected_at(0, true).unwrap());
        assert!(adapter.set_selected_at(2, true).unwrap());

        assert_eq!(adapter.selected_indices(), vec![0, 2]);
        assert_eq!(adapter.selected_items(), vec!["x", "z"]);
        assert_eq!(adapter.unselected_indices(), vec![1]);
        assert_eq!(adapter.selection_count(), 2);
        assert_eq!(adapter.first_selected_index(), Some(0));
        assert_eq!(adapter.last_selected_index(), Some(2));
    }

    #[test]
    fn test_set_selected_is_idempotent() {
        let mut adapter = adapter(&["x"]);
        assert!(adapter.set_selected_at(0, true).unwrap());
        assert!(!adapter.set_selected_at(0, true).unwrap());
        assert!(adapter.set_selected_at(0, false).unwrap());
        assert!(!adapter.set_selected_at(0, false).unwrap());
    }

    #[test]
    fn test_selection_on_disabled_fails_silently() {
        let mut adapter = adapter(&["x"]);
        adapter.set_enabled_at(0, false).unwrap();

        let fired = Arc::new(Mutex::new(false));
        let recv = fired.clone();
        adapter.signals().item_selected.connect(move |_| {
            *recv.lock() = true;
        });

        assert!(!adapter.set_selected_at(0, true).unwrap());
        assert!(!adapter.trigger_selection_at(0).unwrap());
        assert!(!*fired.lock());
        assert_eq!(adapter.selection_count(), 0);
    }

    #[test]
    fn test_selection_on_filtered_out_fails_silently() {
        let mut adapter = adapter(&["apple", "banana"]);
        adapter.apply_filter("apple", 0);

        assert!(!adapter.set_selected_at(1, true).unwrap()); // banana hidden
        assert!(adapter.set_selected_at(0, true).unwrap());
    }

    #[test]
    fn test_disabling_selected_item_forces_deselection() {
        let mut adapter = adapter(&["x", "y"]);
        adapter.set_selected_at(0, true).unwrap();
        adapter.set_selected_at(1, true).unwrap();

        let log = Arc::new(Mutex::new(Vec::new()));
        let recv = log.clone();
        adapter
            .signals()
            .item_unselected
            .connect(move |(item, index)| {
                recv.lock().push(("unselected", item.clone(), *index));
            });
        let recv = log.clone();
        adapter.signals().item_disabled.connect(move |(item, index)| {
            recv.lock().push(("disabled", item.clone(), *index));
        });

        adapter.set_enabled_at(0, false).unwrap();

        // Deselection is observed before the enable-state change, and the
        // other item's selection is untouched.
        assert_eq!(
            *log.lock(),
            vec![
                ("unselected", "x".to_string(), 0),
                ("disabled", "x".to_string(), 0)
            ]
        );
        assert_eq!(adapter.selected_indices(), vec![1]);
    }

    #[test]
    fn test_removing_item_leaves_others_untouched() {
        let mut adapter = adapter(&["x", "y", "z"]);
        adapter.set_selected_at(0, true).unwrap();
        adapter.set_selected_at(2, true).unwrap();

        adapter.remove_item_at(0).unwrap();
        // z shifted to index 1 and is still selected.
        assert_eq!(adapter.selected_indices(), vec![1]);
        assert_eq!(adapter.selected_items(), vec!["z"]);
    }

    #[test]
    fn test_disable_then_remove() {
        let mut adapter = adapter(&["x", "y"]);
        adapter.set_selected_at(1, true).unwrap();

        adapter.set_enabled_at(0, false).unwrap();
        adapter.remove_item_at(0).unwrap();

        assert_eq!(adapter.selected_indices(), vec![0]);
        assert_eq!(adapter.selected_items(), vec!["y"]);
    }

    #[test]
    fn test_set_all_selected() {
        let mut adapter = adapter(&["x", "y", "z"]);
        adapter.set_enabled_at(1, false).unwrap();

        // y cannot be selected, so the bulk operation reports failure but
        // still selects the rest.
        assert!(!adapter.set_all_selected(true));
        assert_eq!(adapter.selected_indices(), vec![0, 2]);

        assert!(adapter.set_all_selected(false));
        assert_eq!(adapter.selection_count(), 0);
    }

    #[test]
    fn test_trigger_all_selections() {
        let mut adapter = adapter(&["x", "y"]);
        adapter.set_selected_at(0, true).unwrap();

        assert!(adapter.trigger_all_selections());
        assert_eq!(adapter.selected_indices(), vec![1]);
    }

    #[test]
    fn test_selection_survives_filter_cycle() {
        let mut adapter = adapter(&["apple", "banana"]);
        adapter.set_selected_at(1, true).unwrap();

        adapter.apply_filter("apple", 0);
        adapter.reset_all_filters();

        assert_eq!(adapter.selected_indices(), vec![1]);
    }

    #[test]
    fn test_deep_copy_keeps_selection() {
        let mut adapter = adapter(&["x", "y"]);
        adapter.set_selected_at(1, true).unwrap();

        let copy = adapter.deep_copy();
        assert_eq!(copy.selected_indices(), vec![1]);
    }
}
