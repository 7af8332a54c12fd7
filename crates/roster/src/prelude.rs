//! Convenience re-exports for typical adapter usage.
//!
//! ```
//! use roster::prelude::*;
//!
//! let mut adapter = MultipleChoiceAdapter::new();
//! adapter.add_item("hello".to_string());
//! ```

pub use crate::{
    AdapterError, AdapterSignals, AppliedFilter, Decorator, Item, ListAdapter, Matchable,
    MemoryStore, MultipleChoiceAdapter, Order, Scope, SingleChoiceAdapter, StateStore, StoreValue,
};
