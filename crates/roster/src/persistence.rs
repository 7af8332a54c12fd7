//! Adapter state persistence.
//!
//! Adapters save and restore their state through the [`StateStore`]
//! contract: an ordered key/value store with string keys and primitive or
//! array values, such as an OS-provided instance-state bundle. The core only
//! requires put/get/contains operations, never a concrete host type;
//! [`MemoryStore`] is the in-tree implementation.
//!
//! Restoring never trusts the serialized flags blindly. The backing sequence
//! is rebuilt, filters are re-applied in their original order (re-running
//! every match predicate), and the same repair rules used after a structural
//! mutation are enforced: a selected flag on a disabled item is dropped,
//! out-of-range states are clamped, and single-choice uniqueness is
//! re-established.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adapter::{ChoiceMode, ListAdapter, MultipleChoiceAdapter, SingleChoiceAdapter};
use crate::error::{AdapterError, Result};
use crate::filtering::{AppliedFilter, Matchable};
use crate::item::Item;

/// Keys used in the persisted-state layout.
pub mod keys {
    pub const ITEMS: &str = "items";
    pub const ALLOW_DUPLICATES: &str = "allow_duplicates";
    pub const SELECT_ITEM_ON_CLICK: &str = "select_item_on_click";
    pub const TRIGGER_STATE_ON_CLICK: &str = "trigger_state_on_click";
    pub const ADAPT_SELECTION_AUTOMATICALLY: &str = "adapt_selection_automatically";
    pub const NUMBER_OF_STATES: &str = "number_of_states";
    pub const ENABLED_FLAGS: &str = "enabled_flags";
    pub const STATES: &str = "states";
    pub const SELECTED_FLAGS: &str = "selected_flags";
    pub const APPLIED_FILTERS: &str = "applied_filters";
}

/// A value stored under one key.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreValue {
    Bool(bool),
    Int(i64),
    Str(String),
    BoolArray(Vec<bool>),
    IntArray(Vec<i64>),
    Json(serde_json::Value),
}

/// The opaque key/value store the adapters persist into.
pub trait StateStore {
    /// Stores `value` under `key`, replacing any previous entry.
    fn put(&mut self, key: &str, value: StoreValue);

    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&StoreValue>;

    /// `true` if an entry exists under `key`.
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory [`StateStore`] with ordered keys.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, StoreValue>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over the stored keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn put(&mut self, key: &str, value: StoreValue) {
        self.entries.insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<&StoreValue> {
        self.entries.get(key)
    }
}

impl<T: Clone + PartialEq + Matchable> ListAdapter<T> {
    /// Writes the adapter's complete state into `store`.
    pub fn save_state(&self, store: &mut dyn StateStore) -> Result<()>
    where
        T: Serialize,
    {
        let payloads: Vec<&T> = self.items().collect();
        store.put(keys::ITEMS, StoreValue::Json(serde_json::to_value(&payloads)?));
        store.put(
            keys::ALLOW_DUPLICATES,
            StoreValue::Bool(self.allow_duplicates()),
        );
        store.put(
            keys::SELECT_ITEM_ON_CLICK,
            StoreValue::Bool(self.select_item_on_click()),
        );
        store.put(
            keys::TRIGGER_STATE_ON_CLICK,
            StoreValue::Bool(self.trigger_state_on_click()),
        );
        store.put(
            keys::NUMBER_OF_STATES,
            StoreValue::Int(i64::from(self.number_of_states())),
        );
        if let ChoiceMode::Single { adapt } = self.mode() {
            store.put(
                keys::ADAPT_SELECTION_AUTOMATICALLY,
                StoreValue::Bool(adapt),
            );
        }
        store.put(
            keys::ENABLED_FLAGS,
            StoreValue::BoolArray(self.items_ref().iter().map(Item::enabled).collect()),
        );
        store.put(
            keys::STATES,
            StoreValue::IntArray(
                self.items_ref()
                    .iter()
                    .map(|item| i64::from(item.state()))
                    .collect(),
            ),
        );
        store.put(
            keys::SELECTED_FLAGS,
            StoreValue::BoolArray(self.items_ref().iter().map(Item::selected).collect()),
        );
        store.put(
            keys::APPLIED_FILTERS,
            StoreValue::Json(serde_json::to_value(self.applied_filters())?),
        );
        tracing::debug!(
            target: "roster::persistence",
            items = self.len(),
            filters = self.applied_filters().len(),
            "adapter state saved"
        );
        Ok(())
    }
}

impl<T: Clone + PartialEq + Matchable + DeserializeOwned> MultipleChoiceAdapter<T> {
    /// Rebuilds a multiple-choice adapter from a previously saved state.
    pub fn restore_state(store: &dyn StateStore) -> Result<Self> {
        Ok(Self::from_core(restore_core(store, ChoiceMode::Multiple)?))
    }
}

impl<T: Clone + PartialEq + Matchable + DeserializeOwned> SingleChoiceAdapter<T> {
    /// Rebuilds a single-choice adapter from a previously saved state.
    pub fn restore_state(store: &dyn StateStore) -> Result<Self> {
        let adapt = get_bool(store, keys::ADAPT_SELECTION_AUTOMATICALLY, true)?;
        Ok(Self::from_core(restore_core(
            store,
            ChoiceMode::Single { adapt },
        )?))
    }
}

fn restore_core<T>(store: &dyn StateStore, mode: ChoiceMode) -> Result<ListAdapter<T>>
where
    T: Clone + PartialEq + Matchable + DeserializeOwned,
{
    let payloads: Vec<T> = match store.get(keys::ITEMS) {
        Some(StoreValue::Json(value)) => serde_json::from_value(value.clone())?,
        Some(_) => return Err(wrong_type(keys::ITEMS)),
        None => return Err(missing(keys::ITEMS)),
    };
    let len = payloads.len();

    let enabled = get_bool_array(store, keys::ENABLED_FLAGS, len)?;
    let states = get_int_array(store, keys::STATES, len)?;
    let selected = get_bool_array(store, keys::SELECTED_FLAGS, len)?;
    let filters: Vec<AppliedFilter> = match store.get(keys::APPLIED_FILTERS) {
        Some(StoreValue::Json(value)) => serde_json::from_value(value.clone())?,
        Some(_) => return Err(wrong_type(keys::APPLIED_FILTERS)),
        None => Vec::new(),
    };

    let number_of_states = match store.get(keys::NUMBER_OF_STATES) {
        Some(StoreValue::Int(value)) => u32::try_from(*value)
            .map_err(|_| AdapterError::invalid_argument("negative number of states"))?,
        Some(_) => return Err(wrong_type(keys::NUMBER_OF_STATES)),
        None => 1,
    };

    let mut adapter = ListAdapter::with_mode(mode);
    adapter.set_allow_duplicates(get_bool(store, keys::ALLOW_DUPLICATES, false)?);
    adapter.set_select_item_on_click(get_bool(store, keys::SELECT_ITEM_ON_CLICK, true)?);
    adapter.set_trigger_state_on_click(get_bool(store, keys::TRIGGER_STATE_ON_CLICK, false)?);
    adapter.set_number_of_states(number_of_states)?;

    // Rebuild the backing sequence directly; the repair rules below
    // re-derive the invariants instead of trusting the serialized flags.
    {
        let items = adapter.items_mut();
        for (index, payload) in payloads.into_iter().enumerate() {
            let mut item = Item::new(payload);
            item.set_enabled(enabled[index]);
            let state = u32::try_from(states[index].max(0)).unwrap_or(0);
            item.set_state(state.min(number_of_states - 1));
            // selected implies enabled
            item.set_selected(selected[index] && enabled[index]);
            items.push(item);
        }
    }

    // Re-apply the filters in their original order, re-running every match
    // predicate against the restored payloads.
    for filter in filters {
        adapter.reapply_filter_silent(filter);
    }

    // Single-choice uniqueness: keep the first selected flag, drop the rest.
    if let ChoiceMode::Single { .. } = mode {
        let mut seen = false;
        for item in adapter.items_mut().iter_mut() {
            if item.selected() {
                if seen {
                    item.set_selected(false);
                } else {
                    seen = true;
                }
            }
        }
    }

    adapter.rebuild_visible();
    tracing::debug!(
        target: "roster::persistence",
        items = adapter.len(),
        "adapter state restored"
    );
    Ok(adapter)
}

fn missing(key: &str) -> AdapterError {
    AdapterError::invalid_argument(format!("missing `{key}` entry"))
}

fn wrong_type(key: &str) -> AdapterError {
    AdapterError::invalid_argument(format!("unexpected value type for `{key}`"))
}

fn get_bool(store: &dyn StateStore, key: &str, default: bool) -> Result<bool> {
    match store.get(key) {
        Some(StoreValue::Bool(value)) => Ok(*value),
        Some(_) => Err(wrong_type(key)),
        None => Ok(default),
    }
}

fn get_bool_array(store: &dyn StateStore, key: &str, expected_len: usize) -> Result<Vec<bool>> {
    match store.get(key) {
        Some(StoreValue::BoolArray(values)) if values.len() == expected_len => Ok(values.clone()),
        Some(StoreValue::BoolArray(values)) => Err(AdapterError::invalid_argument(format!(
            "`{key}` length {} does not match item count {expected_len}",
            values.len()
        ))),
        Some(_) => Err(wrong_type(key)),
        None => Err(missing(key)),
    }
}

fn get_int_array(store: &dyn StateStore, key: &str, expected_len: usize) -> Result<Vec<i64>> {
    match store.get(key) {
        Some(StoreValue::IntArray(values)) if values.len() == expected_len => Ok(values.clone()),
        Some(StoreValue::IntArray(values)) => Err(AdapterError::invalid_argument(format!(
            "`{key}` length {} does not match item count {expected_len}",
            values.len()
        ))),
        Some(_) => Err(wrong_type(key)),
        None => Err(missing(key)),
    }
}
