//! Adapter core.
//!
//! [`ListAdapter`] owns the backing sequence of [`Item`]s and sequences the
//! engines in a fixed order for every compound mutation:
//!
//! 1. backing-sequence edit
//! 2. enable-state repair
//! 3. selection repair
//! 4. filter-visibility recompute
//! 5. listener fan-out
//!
//! Events raised along the way are queued and dispatched only after the
//! mutation has fully completed, so listeners observe each public call as
//! one atomic batch followed by at most one `data_changed` notification.
//! Failed mutations leave the backing sequence, flags and filter set exactly
//! as they were and fire nothing.
//!
//! `ListAdapter` is never constructed on its own: it is the shared surface
//! of [`SingleChoiceAdapter`] and [`MultipleChoiceAdapter`], reachable
//! through `Deref`.

mod multiple;
mod single;

pub use multiple::MultipleChoiceAdapter;
pub use single::SingleChoiceAdapter;

use std::cmp::Ordering;

use crate::enable::{self, Scope};
use crate::error::{AdapterError, Result};
use crate::filtering::{AppliedFilter, FilterEngine, Matchable};
use crate::item::Item;
use crate::selection;
use crate::signals::{AdapterEvent, AdapterSignals};
use crate::visibility::VisibleMap;

/// Sort direction for [`ListAdapter::sort`] and [`ListAdapter::sort_by`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Which selection discipline the adapter enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChoiceMode {
    /// Any subset of eligible items may be selected independently.
    Multiple,
    /// At most one eligible item is selected; `adapt` controls whether
    /// mutations that invalidate the selection reassign it automatically.
    Single { adapt: bool },
}

/// The shared adapter surface: backing sequence, CRUD, enable-state,
/// item-state, filtering, sorting and click dispatch.
///
/// Selection mutators live on the concrete choice adapters, which wrap this
/// type and expose it via `Deref`/`DerefMut`.
pub struct ListAdapter<T> {
    items: Vec<Item<T>>,
    filters: FilterEngine,
    visible: VisibleMap,
    signals: AdapterSignals<T>,
    mode: ChoiceMode,
    allow_duplicates: bool,
    select_item_on_click: bool,
    trigger_state_on_click: bool,
    number_of_states: u32,
}

impl<T: Clone + PartialEq + Matchable> ListAdapter<T> {
    pub(crate) fn with_mode(mode: ChoiceMode) -> Self {
        Self {
            items: Vec::new(),
            filters: FilterEngine::new(),
            visible: VisibleMap::new(),
            signals: AdapterSignals::new(),
            mode,
            allow_duplicates: false,
            select_item_on_click: true,
            trigger_state_on_click: false,
            number_of_states: 1,
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// `true` if equal payloads may occur more than once.
    pub fn allow_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    /// Sets the duplicate policy for future insertions. Items already in the
    /// backing sequence are not re-checked.
    pub fn set_allow_duplicates(&mut self, allow: bool) {
        self.allow_duplicates = allow;
    }

    /// `true` if [`click_item`](Self::click_item) toggles the selection.
    pub fn select_item_on_click(&self) -> bool {
        self.select_item_on_click
    }

    pub fn set_select_item_on_click(&mut self, select: bool) {
        self.select_item_on_click = select;
    }

    /// `true` if [`click_item`](Self::click_item) advances the item state.
    pub fn trigger_state_on_click(&self) -> bool {
        self.trigger_state_on_click
    }

    pub fn set_trigger_state_on_click(&mut self, trigger: bool) {
        self.trigger_state_on_click = trigger;
    }

    /// The number of states items may be in; states are values in
    /// `[0, number_of_states)`.
    pub fn number_of_states(&self) -> u32 {
        self.number_of_states
    }

    /// Sets the number of states. Existing item states at or above the new
    /// bound are clamped to `count - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidArgument`] if `count` is zero.
    pub fn set_number_of_states(&mut self, count: u32) -> Result<()> {
        if count < 1 {
            return Err(AdapterError::invalid_argument(
                "the number of states must be at least 1",
            ));
        }
        self.number_of_states = count;
        let mut events = Vec::new();
        for index in 0..self.items.len() {
            if self.items[index].state() >= count {
                self.items[index].set_state(count - 1);
                events.push(AdapterEvent::StateChanged(
                    self.items[index].data().clone(),
                    index,
                    count - 1,
                ));
            }
        }
        self.finish(events);
        Ok(())
    }

    /// The signals observers connect to.
    pub fn signals(&self) -> &AdapterSignals<T> {
        &self.signals
    }

    // =========================================================================
    // Backing-sequence queries
    // =========================================================================

    /// Number of items in the backing sequence, filtered or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the backing sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the payload at `index`.
    pub fn get_item(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        Ok(self.items[index].data())
    }

    /// Backing index of the first item equal to `data`.
    pub fn index_of(&self, data: &T) -> Option<usize> {
        self.items.iter().position(|item| item.data() == data)
    }

    /// `true` if an item equal to `data` is present.
    pub fn contains(&self, data: &T) -> bool {
        self.index_of(data).is_some()
    }

    /// Iterates over all payloads in backing order.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().map(Item::data)
    }

    // =========================================================================
    // CRUD
    // =========================================================================

    /// Appends an item. Returns `false` without side effects if duplicates
    /// are disallowed and an equal payload already exists.
    pub fn add_item(&mut self, data: T) -> bool {
        let mut events = Vec::new();
        let added = self.insert_at(self.items.len(), data, &mut events);
        self.finish(events);
        added
    }

    /// Inserts an item at `index` (which may equal `len()`).
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::OutOfBounds`] if `index > len()`.
    pub fn add_item_at(&mut self, index: usize, data: T) -> Result<bool> {
        if index > self.items.len() {
            return Err(AdapterError::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let mut events = Vec::new();
        let added = self.insert_at(index, data, &mut events);
        self.finish(events);
        Ok(added)
    }

    /// Appends every item of the iterator. Returns `true` only if all of
    /// them were inserted; duplicates skipped under the duplicate policy
    /// flip the result to `false` but do not abort the rest.
    pub fn add_all_items<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut events = Vec::new();
        let mut all_added = true;
        for data in items {
            let index = self.items.len();
            if !self.insert_at(index, data, &mut events) {
                all_added = false;
            }
        }
        self.finish(events);
        all_added
    }

    /// Removes and returns the item at `index`.
    pub fn remove_item_at(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        let mut events = Vec::new();
        let data = self.remove_at(index, &mut events);
        self.finish(events);
        Ok(data)
    }

    /// Removes the first item equal to `data` and returns its former index.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::NotFound`] if no such item exists.
    pub fn remove_item(&mut self, data: &T) -> Result<usize> {
        let index = self.position_of(data)?;
        let mut events = Vec::new();
        self.remove_at(index, &mut events);
        self.finish(events);
        Ok(index)
    }

    /// Replaces the item at `index` and returns the previous payload. The
    /// replacement starts with default flags (enabled, state 0, unselected).
    pub fn replace_item_at(&mut self, index: usize, data: T) -> Result<T> {
        self.check_index(index)?;
        let mut events = Vec::new();
        let old = self.replace_at(index, data, &mut events);
        self.finish(events);
        Ok(old)
    }

    /// Replaces the first item equal to `old` and returns its index.
    pub fn replace_item(&mut self, old: &T, data: T) -> Result<usize> {
        let index = self.position_of(old)?;
        let mut events = Vec::new();
        self.replace_at(index, data, &mut events);
        self.finish(events);
        Ok(index)
    }

    /// Removes every item.
    pub fn clear_items(&mut self) {
        let mut events = Vec::new();
        let drained: Vec<Item<T>> = self.items.drain(..).collect();
        for (index, item) in drained.into_iter().enumerate() {
            if item.selected() {
                events.push(AdapterEvent::Unselected(item.data().clone(), index));
            }
            events.push(AdapterEvent::Removed(item.into_data(), index));
        }
        self.finish(events);
    }

    // =========================================================================
    // Enable-state
    // =========================================================================

    /// `true` if the item at `index` is enabled.
    pub fn is_enabled_at(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.items[index].enabled())
    }

    /// `true` if the first item equal to `data` is enabled.
    pub fn is_enabled(&self, data: &T) -> Result<bool> {
        let index = self.position_of(data)?;
        Ok(self.items[index].enabled())
    }

    /// Enables or disables the item at `index`. Returns `false` if the flag
    /// already had the requested value.
    ///
    /// Disabling a selected item deselects it through the selection engine
    /// first, so observers see the deselection event before the disable
    /// event; in single-choice mode with automatic adaptation the selection
    /// then moves to the nearest eligible item.
    pub fn set_enabled_at(&mut self, index: usize, enabled: bool) -> Result<bool> {
        self.check_index(index)?;
        let mut events = Vec::new();
        let changed = self.write_enabled(index, enabled, &mut events);
        self.finish(events);
        Ok(changed)
    }

    /// Enables or disables the first item equal to `data`.
    pub fn set_enabled(&mut self, data: &T, enabled: bool) -> Result<bool> {
        let index = self.position_of(data)?;
        self.set_enabled_at(index, enabled)
    }

    /// Indices of enabled items within `scope`.
    pub fn enabled_indices(&self, scope: Scope) -> Vec<usize> {
        enable::indices_with_enabled(&self.items, &self.filters, scope, true)
    }

    /// Indices of disabled items within `scope`.
    pub fn disabled_indices(&self, scope: Scope) -> Vec<usize> {
        enable::indices_with_enabled(&self.items, &self.filters, scope, false)
    }

    /// Payloads of enabled items within `scope`.
    pub fn enabled_items(&self, scope: Scope) -> Vec<&T> {
        self.enabled_indices(scope)
            .into_iter()
            .map(|index| self.items[index].data())
            .collect()
    }

    /// Payloads of disabled items within `scope`.
    pub fn disabled_items(&self, scope: Scope) -> Vec<&T> {
        self.disabled_indices(scope)
            .into_iter()
            .map(|index| self.items[index].data())
            .collect()
    }

    // =========================================================================
    // Item state
    // =========================================================================

    /// The state of the item at `index`.
    pub fn state_at(&self, index: usize) -> Result<u32> {
        self.check_index(index)?;
        Ok(self.items[index].state())
    }

    /// The state of the first item equal to `data`.
    pub fn state_of(&self, data: &T) -> Result<u32> {
        let index = self.position_of(data)?;
        Ok(self.items[index].state())
    }

    /// Sets the state of the item at `index`. Returns `false` if the item
    /// already was in that state.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidArgument`] if `state` is outside
    /// `[0, number_of_states)`.
    pub fn set_state_at(&mut self, index: usize, state: u32) -> Result<bool> {
        self.check_index(index)?;
        if state >= self.number_of_states {
            return Err(AdapterError::invalid_argument(format!(
                "state {state} out of range [0, {})",
                self.number_of_states
            )));
        }
        let mut events = Vec::new();
        let changed = self.write_state(index, state, &mut events);
        self.finish(events);
        Ok(changed)
    }

    /// Sets the state of the first item equal to `data`.
    pub fn set_state(&mut self, data: &T, state: u32) -> Result<bool> {
        let index = self.position_of(data)?;
        self.set_state_at(index, state)
    }

    /// Advances the state of the item at `index` cyclically through
    /// `[0, number_of_states)`. Returns `false` without an event if the item
    /// is disabled or only one state exists.
    pub fn trigger_state_at(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let mut events = Vec::new();
        let changed = self.advance_state(index, &mut events);
        self.finish(events);
        Ok(changed)
    }

    /// Advances the state of the first item equal to `data`.
    pub fn trigger_state(&mut self, data: &T) -> Result<bool> {
        let index = self.position_of(data)?;
        self.trigger_state_at(index)
    }

    /// Payloads of all items currently in `state`.
    pub fn items_with_state(&self, state: u32) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.state() == state)
            .map(Item::data)
            .collect()
    }

    /// Indices of all items currently in `state`.
    pub fn indices_with_state(&self, state: u32) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.state() == state)
            .map(|(index, _)| index)
            .collect()
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Applies a filter. Returns `false` without side effects if an equal
    /// filter is already active. Items remain in the visible view only if
    /// they match **all** active filters.
    pub fn apply_filter(&mut self, query: &str, flags: u32) -> bool {
        let mut events = Vec::new();
        if !self
            .filters
            .apply(&mut self.items, AppliedFilter::new(query, flags))
        {
            return false;
        }
        let visible = self.count_visible();
        events.push(AdapterEvent::FilterApplied(query.to_string(), flags, visible));
        // Applying a filter only hides items, so no item becomes newly
        // eligible and the selection is never reassigned here. A hidden
        // selection keeps its flag and reappears when the filter is reset.
        self.finish(events);
        true
    }

    /// Removes the filter equal to the given query/flags pair. Returns
    /// `false` if it was not active. Remaining filters stay in force: an
    /// item hidden by two filters stays hidden while it fails the other.
    pub fn reset_filter(&mut self, query: &str, flags: u32) -> bool {
        let mut events = Vec::new();
        if !self
            .filters
            .reset(&mut self.items, &AppliedFilter::new(query, flags))
        {
            return false;
        }
        let visible = self.count_visible();
        events.push(AdapterEvent::FilterReset(query.to_string(), flags, visible));
        self.repair_single_selection(&mut events);
        self.finish(events);
        true
    }

    /// Clears every active filter; all items become visible again.
    pub fn reset_all_filters(&mut self) {
        if !self.filters.is_filtered() {
            return;
        }
        let cleared = self.filters.reset_all(&mut self.items);
        let visible = self.items.len();
        let mut events: Vec<AdapterEvent<T>> = cleared
            .into_iter()
            .map(|filter| {
                AdapterEvent::FilterReset(filter.query().to_string(), filter.flags(), visible)
            })
            .collect();
        self.repair_single_selection(&mut events);
        self.finish(events);
    }

    /// `true` iff at least one filter is active.
    pub fn is_filtered(&self) -> bool {
        self.filters.is_filtered()
    }

    /// The active filters in application order.
    pub fn applied_filters(&self) -> &[AppliedFilter] {
        self.filters.applied()
    }

    /// Number of items in the visible view.
    pub fn visible_count(&self) -> usize {
        self.visible.visible_count()
    }

    /// Backing indices of the visible view, in order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.visible.visible_indices().to_vec()
    }

    /// Iterates over the payloads of the visible view.
    pub fn visible_items(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible
            .visible_indices()
            .iter()
            .map(|&backing| self.items[backing].data())
    }

    /// `true` if the item at `index` is part of the visible view.
    pub fn is_visible_at(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.filters.is_visible(&self.items[index]))
    }

    /// Translates a visible index to its backing index.
    pub fn to_backing_index(&self, visible: usize) -> Option<usize> {
        self.visible.to_backing(visible)
    }

    /// Translates a backing index to its visible index, `None` when the
    /// item is filtered out.
    pub fn to_visible_index(&self, backing: usize) -> Option<usize> {
        self.visible.to_visible(backing)
    }

    // =========================================================================
    // Selection queries (shared surface)
    // =========================================================================

    /// `true` if the item at `index` is selected.
    ///
    /// In single-choice mode an item whose selection is currently suppressed
    /// by a filter reports `false`; the internal flag is restored together
    /// with the item's visibility.
    pub fn is_selected_at(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let item = &self.items[index];
        match self.mode {
            ChoiceMode::Multiple => Ok(item.selected()),
            ChoiceMode::Single { .. } => Ok(item.selected() && self.filters.is_visible(item)),
        }
    }

    /// `true` if the first item equal to `data` is selected.
    pub fn is_selected(&self, data: &T) -> Result<bool> {
        let index = self.position_of(data)?;
        self.is_selected_at(index)
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Sorts the backing sequence by the payloads' natural order. Flags
    /// travel with their items and the selection follows the item, not the
    /// index.
    pub fn sort(&mut self, order: Order)
    where
        T: Ord,
    {
        self.sort_by(order, T::cmp);
    }

    /// Sorts the backing sequence with a comparator (stable).
    pub fn sort_by<F>(&mut self, order: Order, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(|a, b| {
            let ordering = compare(a.data(), b.data());
            match order {
                Order::Ascending => ordering,
                Order::Descending => ordering.reverse(),
            }
        });
        self.finish(vec![AdapterEvent::Sorted(order)]);
    }

    // =========================================================================
    // Click dispatch
    // =========================================================================

    /// Dispatches an item click from the host widget: toggles the selection
    /// when `select_item_on_click` is set, then advances the item state when
    /// `trigger_state_on_click` is set.
    pub fn click_item(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let mut events = Vec::new();
        if self.select_item_on_click {
            self.toggle_selection(index, &mut events);
        }
        if self.trigger_state_on_click {
            self.advance_state(index, &mut events);
        }
        self.finish(events);
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(AdapterError::OutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn position_of(&self, data: &T) -> Result<usize> {
        self.index_of(data).ok_or(AdapterError::NotFound)
    }

    pub(crate) fn mode(&self) -> ChoiceMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: ChoiceMode) {
        self.mode = mode;
    }

    pub(crate) fn items_ref(&self) -> &[Item<T>] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Item<T>> {
        &mut self.items
    }

    pub(crate) fn filters_ref(&self) -> &FilterEngine {
        &self.filters
    }

    pub(crate) fn visible_ref(&self) -> &VisibleMap {
        &self.visible
    }

    pub(crate) fn rebuild_visible(&mut self) {
        self.visible.rebuild(&self.items, &self.filters);
    }

    /// Re-applies a filter without events or repair; used when re-deriving
    /// restored state.
    pub(crate) fn reapply_filter_silent(&mut self, filter: AppliedFilter) -> bool {
        self.filters.apply(&mut self.items, filter)
    }

    fn count_visible(&self) -> usize {
        self.items
            .iter()
            .filter(|item| self.filters.is_visible(item))
            .count()
    }

    /// Rebuilds the visible map and dispatches the queued events. No-op for
    /// an empty queue, so failed or no-op calls stay silent.
    pub(crate) fn finish(&mut self, events: Vec<AdapterEvent<T>>) {
        if events.is_empty() {
            return;
        }
        self.visible.rebuild(&self.items, &self.filters);
        self.signals.dispatch(events);
    }

    /// Backing-sequence insert plus selection repair. Returns `false` if the
    /// duplicate policy rejected the payload.
    pub(crate) fn insert_at(
        &mut self,
        index: usize,
        data: T,
        events: &mut Vec<AdapterEvent<T>>,
    ) -> bool {
        if !self.allow_duplicates && self.items.iter().any(|item| item.data() == &data) {
            tracing::trace!(target: "roster::adapter", "duplicate payload rejected");
            return false;
        }
        let was_empty = self.items.is_empty();
        let mut item = Item::new(data);
        self.filters.refresh(&mut item);
        self.items.insert(index, item);
        events.push(AdapterEvent::Added(self.items[index].data().clone(), index));

        // A first item added to an empty single-choice adapter becomes the
        // selection under automatic adaptation.
        if let ChoiceMode::Single { adapt: true } = self.mode {
            if was_empty {
                self.assign_selection_by_scan(0, events);
            }
        }
        true
    }

    pub(crate) fn remove_at(&mut self, index: usize, events: &mut Vec<AdapterEvent<T>>) -> T {
        let was_selected = self.items[index].selected();
        if was_selected {
            self.items[index].set_selected(false);
            events.push(AdapterEvent::Unselected(
                self.items[index].data().clone(),
                index,
            ));
        }
        let item = self.items.remove(index);
        events.push(AdapterEvent::Removed(item.data().clone(), index));

        if was_selected {
            if let ChoiceMode::Single { adapt: true } = self.mode {
                self.assign_selection_by_scan(index, events);
            }
        }
        item.into_data()
    }

    pub(crate) fn replace_at(
        &mut self,
        index: usize,
        data: T,
        events: &mut Vec<AdapterEvent<T>>,
    ) -> T {
        let was_selected = self.items[index].selected();
        if was_selected {
            self.items[index].set_selected(false);
            events.push(AdapterEvent::Unselected(
                self.items[index].data().clone(),
                index,
            ));
        }
        let mut replacement = Item::new(data);
        self.filters.refresh(&mut replacement);
        let old = std::mem::replace(&mut self.items[index], replacement);
        events.push(AdapterEvent::Changed(self.items[index].data().clone(), index));

        if was_selected {
            if let ChoiceMode::Single { adapt: true } = self.mode {
                self.assign_selection_by_scan(index, events);
            }
        }
        old.into_data()
    }

    /// Writes the enabled flag, routing a deselection through the selection
    /// engine first when a selected item is disabled. Returns `false` if the
    /// flag already had the requested value.
    pub(crate) fn write_enabled(
        &mut self,
        index: usize,
        enabled: bool,
        events: &mut Vec<AdapterEvent<T>>,
    ) -> bool {
        if self.items[index].enabled() == enabled {
            return false;
        }

        if !enabled {
            let was_selected = self.items[index].selected();
            if was_selected {
                self.items[index].set_selected(false);
                events.push(AdapterEvent::Unselected(
                    self.items[index].data().clone(),
                    index,
                ));
            }
            self.items[index].set_enabled(false);
            events.push(AdapterEvent::Disabled(
                self.items[index].data().clone(),
                index,
            ));
            if was_selected {
                if let ChoiceMode::Single { adapt: true } = self.mode {
                    self.assign_selection_by_scan(index, events);
                }
            }
        } else {
            self.items[index].set_enabled(true);
            events.push(AdapterEvent::Enabled(
                self.items[index].data().clone(),
                index,
            ));
            // A revived item may become the selection when none exists.
            self.repair_single_selection(events);
        }
        true
    }

    pub(crate) fn write_state(
        &mut self,
        index: usize,
        state: u32,
        events: &mut Vec<AdapterEvent<T>>,
    ) -> bool {
        if self.items[index].state() == state {
            return false;
        }
        self.items[index].set_state(state);
        events.push(AdapterEvent::StateChanged(
            self.items[index].data().clone(),
            index,
            state,
        ));
        true
    }

    pub(crate) fn advance_state(
        &mut self,
        index: usize,
        events: &mut Vec<AdapterEvent<T>>,
    ) -> bool {
        if !self.items[index].enabled() {
            return false;
        }
        if self.number_of_states <= 1 {
            return false;
        }
        let next = (self.items[index].state() + 1) % self.number_of_states;
        self.write_state(index, next, events)
    }

    /// Applies a selection request to one item. The disabled gate runs
    /// before any mode-specific logic; selecting additionally requires the
    /// item to be part of the visible view.
    pub(crate) fn apply_selection(
        &mut self,
        index: usize,
        selected: bool,
        events: &mut Vec<AdapterEvent<T>>,
    ) -> bool {
        if !self.items[index].enabled() {
            tracing::trace!(
                target: "roster::selection",
                index,
                "selection attempt on disabled item ignored"
            );
            return false;
        }

        if selected {
            if !self.filters.is_visible(&self.items[index]) {
                return false;
            }
            if self.items[index].selected() {
                return false;
            }
            if let ChoiceMode::Single { .. } = self.mode {
                if let Some(previous) = selection::selected_flag_index(&self.items) {
                    self.items[previous].set_selected(false);
                    events.push(AdapterEvent::Unselected(
                        self.items[previous].data().clone(),
                        previous,
                    ));
                }
            }
            self.items[index].set_selected(true);
            events.push(AdapterEvent::Selected(
                self.items[index].data().clone(),
                index,
            ));
            true
        } else {
            if !self.items[index].selected() {
                return false;
            }
            self.items[index].set_selected(false);
            events.push(AdapterEvent::Unselected(
                self.items[index].data().clone(),
                index,
            ));
            true
        }
    }

    /// Toggles the selection of one item. In single-choice mode toggling the
    /// selected item deselects it and leaves the adapter without a
    /// selection.
    pub(crate) fn toggle_selection(
        &mut self,
        index: usize,
        events: &mut Vec<AdapterEvent<T>>,
    ) -> bool {
        if !self.items[index].enabled() {
            return false;
        }
        if self.items[index].selected() {
            self.apply_selection(index, false, events)
        } else {
            self.apply_selection(index, true, events)
        }
    }

    /// Selects the first eligible item when automatic adaptation is on and
    /// no item — visible or filter-hidden — carries the selected flag. A
    /// hidden selection suppresses reassignment so that un-filtering
    /// restores it losslessly.
    pub(crate) fn repair_single_selection(&mut self, events: &mut Vec<AdapterEvent<T>>) {
        if let ChoiceMode::Single { adapt: true } = self.mode {
            if selection::selected_flag_index(&self.items).is_none() {
                self.assign_selection_by_scan(0, events);
            }
        }
    }

    fn assign_selection_by_scan(&mut self, start: usize, events: &mut Vec<AdapterEvent<T>>) {
        if let Some(target) = selection::scan_for_eligible(&self.items, &self.filters, start) {
            self.items[target].set_selected(true);
            events.push(AdapterEvent::Selected(
                self.items[target].data().clone(),
                target,
            ));
            tracing::debug!(target: "roster::selection", index = target, "selection reassigned");
        }
    }

    pub(crate) fn deep_copy_core(&self) -> Self {
        let mut copy = Self {
            items: self.items.clone(),
            filters: self.filters.clone(),
            visible: VisibleMap::new(),
            signals: AdapterSignals::new(),
            mode: self.mode,
            allow_duplicates: self.allow_duplicates,
            select_item_on_click: self.select_item_on_click,
            trigger_state_on_click: self.trigger_state_on_click,
            number_of_states: self.number_of_states,
        };
        copy.rebuild_visible();
        copy
    }
}
