//! roster — choice-aware list adapters.
//!
//! This crate binds in-memory item collections to list-style views, adding
//! the cross-cutting behaviors list UIs need: enable/disable state,
//! multi-state items, sorting, filtering, and single/multiple selection.
//! The view itself stays external: rendering is delegated to a
//! [`Decorator`], and the host widget drives the adapter through its public
//! operations.
//!
//! # Core Types
//!
//! - [`SingleChoiceAdapter`]: at most one enabled, non-filtered item is
//!   selected; mutations elsewhere repair the invariant automatically
//! - [`MultipleChoiceAdapter`]: any subset of eligible items may be
//!   selected independently
//! - [`ListAdapter`]: the shared surface both adapters expose via `Deref` —
//!   CRUD, filtering, enable-state, item-state, sorting, click dispatch
//! - [`Item`]: one payload plus its flags (enabled, state, selected)
//! - [`AdapterSignals`]: change notifications, fired synchronously in
//!   listener registration order after each mutation completes
//! - [`StateStore`]: the key/value contract for saving and restoring
//!   adapter state
//!
//! # Example
//!
//! ```
//! use roster::SingleChoiceAdapter;
//!
//! let mut adapter = SingleChoiceAdapter::new();
//!
//! adapter.signals().item_selected.connect(|(item, index)| {
//!     println!("selected {item} at {index}");
//! });
//!
//! // The first item added to an empty adapter becomes the selection.
//! adapter.add_item("inbox".to_string());
//! adapter.add_item("archive".to_string());
//! assert_eq!(adapter.selected_index(), Some(0));
//!
//! // Filters combine by AND and never clear flags: resetting a filter
//! // restores whatever selection it had hidden.
//! adapter.apply_filter("arch", 0);
//! assert_eq!(adapter.selected_index(), None);
//! adapter.reset_all_filters();
//! assert_eq!(adapter.selected_index(), Some(0));
//! ```
//!
//! # Concurrency
//!
//! Adapters are single-threaded by design: all operations are synchronous
//! and expected to run on the thread that owns the widget binding. Listener
//! callbacks run synchronously on the calling thread and must not re-enter
//! the adapter with a structural mutation.

mod adapter;
mod decorator;
mod enable;
mod error;
mod filtering;
mod item;
mod persistence;
pub mod prelude;
mod selection;
mod signals;
mod visibility;

pub use adapter::{ListAdapter, MultipleChoiceAdapter, Order, SingleChoiceAdapter};
pub use decorator::Decorator;
pub use enable::Scope;
pub use error::{AdapterError, Result};
pub use filtering::{match_flags, AppliedFilter, Matchable};
pub use item::Item;
pub use persistence::{keys as store_keys, MemoryStore, StateStore, StoreValue};
pub use signals::AdapterSignals;
