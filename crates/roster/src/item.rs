//! Item state holder.
//!
//! [`Item<T>`] wraps one payload together with the mutable per-item flags
//! the adapters coordinate: enabled, state, selected, and the set of active
//! filters the payload currently satisfies. The item itself has no behavior
//! beyond flag storage; every invariant between the flags is enforced by the
//! engines that mutate them.

use crate::filtering::AppliedFilter;

/// One element of an adapter's backing sequence.
///
/// Items are created when their payload is added to an adapter and destroyed
/// when it is removed, replaced, or cleared. The flags are owned exclusively
/// by the adapter; external code reads them through the accessors but all
/// mutation goes through the adapter so invariants and notifications stay
/// centralized.
///
/// Invariant (holds after every public adapter operation):
/// `selected() == true` implies `enabled() == true`.
#[derive(Clone, Debug)]
pub struct Item<T> {
    data: T,
    enabled: bool,
    state: u32,
    selected: bool,
    /// Active filters this payload satisfies, in application order.
    matched_filters: Vec<AppliedFilter>,
}

impl<T> Item<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            data,
            enabled: true,
            state: 0,
            selected: false,
            matched_filters: Vec::new(),
        }
    }

    /// Returns a reference to the wrapped payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    pub(crate) fn into_data(self) -> T {
        self.data
    }

    /// Returns `true` if the item is enabled for interaction.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the item's state, a value in `[0, number_of_states)`.
    pub fn state(&self) -> u32 {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: u32) {
        self.state = state;
    }

    /// Returns `true` if the item is selected.
    pub fn selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Returns the active filters this item currently satisfies, in
    /// application order.
    pub fn matched_filters(&self) -> &[AppliedFilter] {
        &self.matched_filters
    }

    pub(crate) fn matches_filter(&self, filter: &AppliedFilter) -> bool {
        self.matched_filters.contains(filter)
    }

    pub(crate) fn add_matched(&mut self, filter: AppliedFilter) {
        if !self.matched_filters.contains(&filter) {
            self.matched_filters.push(filter);
        }
    }

    pub(crate) fn remove_matched(&mut self, filter: &AppliedFilter) {
        self.matched_filters.retain(|existing| existing != filter);
    }

    pub(crate) fn clear_matched(&mut self) {
        self.matched_filters.clear();
    }
}
