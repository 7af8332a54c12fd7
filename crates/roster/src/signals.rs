//! Adapter change notifications.
//!
//! Observers connect to the signals in [`AdapterSignals`] to stay
//! synchronized with an adapter. Signals fire synchronously, in listener
//! registration order, after the triggering mutation has fully completed;
//! each logical change produces exactly one event, and every public call
//! that changed observable state is followed by at most one
//! [`data_changed`](AdapterSignals::data_changed) emission.
//!
//! A panicking listener aborts the remaining fan-out for that event and
//! propagates to the caller; the adapter does not guard against it.

use roster_core::Signal;

use crate::adapter::Order;

/// Collection of signals emitted by an adapter.
///
/// Item-carrying signals pass a clone of the payload together with its
/// backing index at the time the event occurred. Filter signals pass the
/// query, the match-mode flags, and the number of visible items after the
/// change.
pub struct AdapterSignals<T> {
    /// Emitted after an item has been added. Args: (item, index)
    pub item_added: Signal<(T, usize)>,

    /// Emitted after an item has been removed. Args: (item, former index)
    pub item_removed: Signal<(T, usize)>,

    /// Emitted after an item has been replaced. Args: (new item, index)
    pub item_changed: Signal<(T, usize)>,

    /// Emitted after an item has been enabled. Args: (item, index)
    pub item_enabled: Signal<(T, usize)>,

    /// Emitted after an item has been disabled. Args: (item, index)
    pub item_disabled: Signal<(T, usize)>,

    /// Emitted after an item's state changed. Args: (item, index, new state)
    pub item_state_changed: Signal<(T, usize, u32)>,

    /// Emitted after an item became selected. Args: (item, index)
    pub item_selected: Signal<(T, usize)>,

    /// Emitted after an item became unselected. Args: (item, index)
    pub item_unselected: Signal<(T, usize)>,

    /// Emitted after a filter has been applied.
    /// Args: (query, flags, visible count)
    pub filter_applied: Signal<(String, u32, usize)>,

    /// Emitted after a filter has been reset.
    /// Args: (query, flags, visible count)
    pub filter_reset: Signal<(String, u32, usize)>,

    /// Emitted after the backing sequence has been reordered.
    pub sorted: Signal<Order>,

    /// Emitted once at the end of every public call that changed observable
    /// state, after all per-change signals.
    pub data_changed: Signal<()>,
}

impl<T> Default for AdapterSignals<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AdapterSignals<T> {
    /// Creates a new set of adapter signals.
    pub fn new() -> Self {
        Self {
            item_added: Signal::new(),
            item_removed: Signal::new(),
            item_changed: Signal::new(),
            item_enabled: Signal::new(),
            item_disabled: Signal::new(),
            item_state_changed: Signal::new(),
            item_selected: Signal::new(),
            item_unselected: Signal::new(),
            filter_applied: Signal::new(),
            filter_reset: Signal::new(),
            sorted: Signal::new(),
            data_changed: Signal::new(),
        }
    }
}

/// One pending notification, queued while a mutation runs and dispatched
/// after it completes so listeners observe each compound operation as a
/// single atomic batch.
#[derive(Debug)]
pub(crate) enum AdapterEvent<T> {
    Added(T, usize),
    Removed(T, usize),
    Changed(T, usize),
    Enabled(T, usize),
    Disabled(T, usize),
    StateChanged(T, usize, u32),
    Selected(T, usize),
    Unselected(T, usize),
    FilterApplied(String, u32, usize),
    FilterReset(String, u32, usize),
    Sorted(Order),
}

impl<T> AdapterSignals<T> {
    /// Fires the queued events in order, then `data_changed` once if there
    /// was anything to report.
    pub(crate) fn dispatch(&self, events: Vec<AdapterEvent<T>>) {
        if events.is_empty() {
            return;
        }
        for event in events {
            match event {
                AdapterEvent::Added(item, index) => self.item_added.emit((item, index)),
                AdapterEvent::Removed(item, index) => self.item_removed.emit((item, index)),
                AdapterEvent::Changed(item, index) => self.item_changed.emit((item, index)),
                AdapterEvent::Enabled(item, index) => self.item_enabled.emit((item, index)),
                AdapterEvent::Disabled(item, index) => self.item_disabled.emit((item, index)),
                AdapterEvent::StateChanged(item, index, state) => {
                    self.item_state_changed.emit((item, index, state))
                }
                AdapterEvent::Selected(item, index) => self.item_selected.emit((item, index)),
                AdapterEvent::Unselected(item, index) => self.item_unselected.emit((item, index)),
                AdapterEvent::FilterApplied(query, flags, count) => {
                    self.filter_applied.emit((query, flags, count))
                }
                AdapterEvent::FilterReset(query, flags, count) => {
                    self.filter_reset.emit((query, flags, count))
                }
                AdapterEvent::Sorted(order) => self.sorted.emit(order),
            }
        }
        self.data_changed.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_dispatch_order_and_single_data_changed() {
        let signals = AdapterSignals::<String>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let recv = log.clone();
        signals.item_unselected.connect(move |(item, index)| {
            recv.lock().push(format!("unselected {item} {index}"));
        });
        let recv = log.clone();
        signals.item_selected.connect(move |(item, index)| {
            recv.lock().push(format!("selected {item} {index}"));
        });
        let recv = log.clone();
        signals.data_changed.connect(move |_| {
            recv.lock().push("data_changed".to_string());
        });

        signals.dispatch(vec![
            AdapterEvent::Unselected("x".to_string(), 0),
            AdapterEvent::Selected("y".to_string(), 1),
        ]);

        assert_eq!(
            *log.lock(),
            vec!["unselected x 0", "selected y 1", "data_changed"]
        );
    }

    #[test]
    fn test_dispatch_empty_is_silent() {
        let signals = AdapterSignals::<String>::new();
        let fired = Arc::new(Mutex::new(false));

        let recv = fired.clone();
        signals.data_changed.connect(move |_| {
            *recv.lock() = true;
        });

        signals.dispatch(Vec::new());
        assert!(!*fired.lock());
    }
}
