//! Filtering support.
//!
//! Adapters filter their backing sequence with one or more active
//! [`AppliedFilter`]s, combined by logical AND: an item is part of the
//! visible view only if it matches every currently applied filter.
//!
//! Filtering is never destructive. The backing sequence is only annotated —
//! each [`Item`](crate::Item) records which active filters it satisfies — so
//! removing a filter is an exact reversal derived from the unchanged backing
//! sequence and the shrunk active-filter set, without re-running any match
//! predicate. This is what lets selection and enable-state survive filter
//! cycles losslessly.

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Match-mode flags understood by the [`Matchable`] implementations provided
/// by this crate. Custom payload types are free to interpret the flag bits
/// however they like; the adapters pass them through untouched.
pub mod match_flags {
    /// Compare query and payload case-insensitively.
    pub const CASE_INSENSITIVE: u32 = 1 << 0;
}

/// Capability required of payloads used with filtering.
///
/// The adapters call [`matches`](Matchable::matches) to decide whether a
/// payload satisfies an applied filter. The `flags` value is opaque to the
/// adapter; it is handed through from [`apply_filter`] unchanged.
///
/// [`apply_filter`]: crate::ListAdapter::apply_filter
pub trait Matchable {
    /// Returns `true` if this payload matches the given query.
    fn matches(&self, query: &str, flags: u32) -> bool;
}

impl Matchable for str {
    /// Substring match, case-insensitive when
    /// [`match_flags::CASE_INSENSITIVE`] is set.
    fn matches(&self, query: &str, flags: u32) -> bool {
        if flags & match_flags::CASE_INSENSITIVE != 0 {
            self.to_lowercase().contains(&query.to_lowercase())
        } else {
            self.contains(query)
        }
    }
}

impl Matchable for String {
    fn matches(&self, query: &str, flags: u32) -> bool {
        // Qualified call: `str` has an inherent `matches` that would
        // otherwise shadow the trait method.
        Matchable::matches(self.as_str(), query, flags)
    }
}

/// One active filter: a query string plus opaque match-mode flags.
///
/// Filters are identified by value — applying an equal filter twice is a
/// no-op, and resetting a filter removes the filter equal to the given
/// query/flags pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilter {
    query: String,
    flags: u32,
}

impl AppliedFilter {
    /// Creates a filter from a query and match-mode flags.
    pub fn new(query: impl Into<String>, flags: u32) -> Self {
        Self {
            query: query.into(),
            flags,
        }
    }

    /// The filter's query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The filter's match-mode flags.
    pub fn flags(&self) -> u32 {
        self.flags
    }
}

/// The filter engine: the ordered set of active filters plus the per-item
/// match bookkeeping.
#[derive(Clone, Debug, Default)]
pub(crate) struct FilterEngine {
    /// Active filters in application order.
    applied: Vec<AppliedFilter>,
}

impl FilterEngine {
    pub(crate) fn new() -> Self {
        Self {
            applied: Vec::new(),
        }
    }

    /// `true` iff at least one filter is active.
    pub(crate) fn is_filtered(&self) -> bool {
        !self.applied.is_empty()
    }

    pub(crate) fn applied(&self) -> &[AppliedFilter] {
        &self.applied
    }

    /// Adds a filter to the active set and records, per item, whether the
    /// payload matches it. Returns `false` without side effects if an equal
    /// filter is already active.
    pub(crate) fn apply<T: Matchable>(
        &mut self,
        items: &mut [Item<T>],
        filter: AppliedFilter,
    ) -> bool {
        if self.applied.contains(&filter) {
            tracing::trace!(
                target: "roster::filter",
                query = filter.query(),
                "filter already applied, ignoring"
            );
            return false;
        }

        for item in items.iter_mut() {
            if item.data().matches(filter.query(), filter.flags()) {
                item.add_matched(filter.clone());
            }
        }

        tracing::debug!(
            target: "roster::filter",
            query = filter.query(),
            flags = filter.flags(),
            "filter applied"
        );
        self.applied.push(filter);
        true
    }

    /// Removes the filter equal to `filter` from the active set and strips
    /// its key from every item's match record. Returns `false` if no such
    /// filter is active. Items hidden by more than one filter stay hidden as
    /// long as any remaining filter is unmatched.
    pub(crate) fn reset<T>(&mut self, items: &mut [Item<T>], filter: &AppliedFilter) -> bool {
        let Some(position) = self.applied.iter().position(|active| active == filter) else {
            return false;
        };
        self.applied.remove(position);

        for item in items.iter_mut() {
            item.remove_matched(filter);
        }

        tracing::debug!(
            target: "roster::filter",
            query = filter.query(),
            flags = filter.flags(),
            "filter reset"
        );
        true
    }

    /// Clears every active filter; all items become visible.
    pub(crate) fn reset_all<T>(&mut self, items: &mut [Item<T>]) -> Vec<AppliedFilter> {
        let cleared = std::mem::take(&mut self.applied);
        for item in items.iter_mut() {
            item.clear_matched();
        }
        cleared
    }

    /// Re-evaluates a single (new or replaced) item against every active
    /// filter, rebuilding its match record from scratch.
    pub(crate) fn refresh<T: Matchable>(&self, item: &mut Item<T>) {
        item.clear_matched();
        for filter in &self.applied {
            if item.data().matches(filter.query(), filter.flags()) {
                item.add_matched(filter.clone());
            }
        }
    }

    /// `true` iff the item matches all active filters (vacuously true with
    /// no active filters).
    pub(crate) fn is_visible<T>(&self, item: &Item<T>) -> bool {
        self.applied.iter().all(|filter| item.matches_filter(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(payloads: &[&str]) -> Vec<Item<String>> {
        payloads.iter().map(|p| Item::new(p.to_string())).collect()
    }

    #[test]
    fn test_apply_is_and_combined() {
        let mut engine = FilterEngine::new();
        let mut items = items(&["cdefghij", "bcquerystringdef", "xsbiquerystringdjwi"]);

        assert!(engine.apply(&mut items, AppliedFilter::new("querystring", 0)));
        let visible: Vec<bool> = items.iter().map(|i| engine.is_visible(i)).collect();
        assert_eq!(visible, vec![false, true, true]);

        assert!(engine.apply(&mut items, AppliedFilter::new("bc", 0)));
        let visible: Vec<bool> = items.iter().map(|i| engine.is_visible(i)).collect();
        assert_eq!(visible, vec![false, true, false]);
    }

    #[test]
    fn test_duplicate_apply_is_noop() {
        let mut engine = FilterEngine::new();
        let mut items = items(&["abc"]);

        assert!(engine.apply(&mut items, AppliedFilter::new("a", 0)));
        assert!(!engine.apply(&mut items, AppliedFilter::new("a", 0)));
        assert_eq!(engine.applied().len(), 1);
    }

    #[test]
    fn test_reset_reevaluates_remaining_filters() {
        let mut engine = FilterEngine::new();
        // Hidden by both "x" and "y"
        let mut items = items(&["x only", "y only", "x and y"]);

        engine.apply(&mut items, AppliedFilter::new("x", 0));
        engine.apply(&mut items, AppliedFilter::new("y", 0));
        assert!(!engine.is_visible(&items[0]));
        assert!(!engine.is_visible(&items[1]));
        assert!(engine.is_visible(&items[2]));

        // Removing "y" leaves "x" active: item 1 stays hidden.
        assert!(engine.reset(&mut items, &AppliedFilter::new("y", 0)));
        assert!(engine.is_visible(&items[0]));
        assert!(!engine.is_visible(&items[1]));
        assert!(engine.is_visible(&items[2]));
    }

    #[test]
    fn test_reset_unknown_filter_returns_false() {
        let mut engine = FilterEngine::new();
        let mut items = items(&["abc"]);
        assert!(!engine.reset(&mut items, &AppliedFilter::new("a", 0)));

        // Same query with different flags is a different filter.
        engine.apply(&mut items, AppliedFilter::new("a", 0));
        assert!(!engine.reset(&mut items, &AppliedFilter::new("a", 1)));
        assert!(engine.is_filtered());
    }

    #[test]
    fn test_reset_all() {
        let mut engine = FilterEngine::new();
        let mut items = items(&["abc", "def"]);

        engine.apply(&mut items, AppliedFilter::new("abc", 0));
        let cleared = engine.reset_all(&mut items);
        assert_eq!(cleared.len(), 1);
        assert!(!engine.is_filtered());
        assert!(items.iter().all(|i| engine.is_visible(i)));
    }

    #[test]
    fn test_case_insensitive_matching() {
        assert!(Matchable::matches(
            "Hello World",
            "hello",
            match_flags::CASE_INSENSITIVE
        ));
        assert!(!Matchable::matches("Hello World", "hello", 0));
    }
}
