//! Selection engine primitives.
//!
//! Both choice modes share the same eligibility rule: only an enabled item
//! in the visible view may become selected. The single-choice adapter
//! additionally relies on the auto-adapt scan defined here to repair its
//! at-most-one invariant after mutations.

use crate::filtering::FilterEngine;
use crate::item::Item;

/// `true` iff the item may become selected: enabled and part of the visible
/// view.
pub(crate) fn is_eligible<T>(item: &Item<T>, filters: &FilterEngine) -> bool {
    item.enabled() && filters.is_visible(item)
}

/// Backing index of the first item carrying the selected flag, whether or
/// not it is currently visible. `None` if no item is selected.
pub(crate) fn selected_flag_index<T>(items: &[Item<T>]) -> Option<usize> {
    items.iter().position(Item::selected)
}

/// The single-choice "nearest eligible item" scan.
///
/// Scans ascending from `start` to the end of the backing sequence, then
/// wraps to index 0 and continues up to (but not past) `start` — exactly one
/// pass over the sequence. Returns the first enabled, visible item found.
pub(crate) fn scan_for_eligible<T>(
    items: &[Item<T>],
    filters: &FilterEngine,
    start: usize,
) -> Option<usize> {
    let len = items.len();
    let start = start.min(len);
    (start..len)
        .chain(0..start)
        .find(|&index| is_eligible(&items[index], filters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::AppliedFilter;

    fn items(payloads: &[&str]) -> Vec<Item<String>> {
        payloads.iter().map(|p| Item::new(p.to_string())).collect()
    }

    #[test]
    fn test_scan_skips_disabled_forward() {
        let mut items = items(&["x", "y", "z"]);
        items[1].set_enabled(false);
        let filters = FilterEngine::new();

        // Scanning from index 0 skips the disabled y and lands on... x itself.
        assert_eq!(scan_for_eligible(&items, &filters, 0), Some(0));
        // From index 1 the disabled item is skipped in favour of z.
        assert_eq!(scan_for_eligible(&items, &filters, 1), Some(2));
    }

    #[test]
    fn test_scan_wraps_to_start_once() {
        let mut items = items(&["x", "y", "z"]);
        items[1].set_enabled(false);
        items[2].set_enabled(false);
        let filters = FilterEngine::new();

        // Nothing eligible forward of index 1: wrap and find index 0.
        assert_eq!(scan_for_eligible(&items, &filters, 1), Some(0));

        items[0].set_enabled(false);
        assert_eq!(scan_for_eligible(&items, &filters, 1), None);
    }

    #[test]
    fn test_scan_respects_visibility() {
        let mut items = items(&["apple", "banana", "apricot"]);
        let mut filters = FilterEngine::new();
        filters.apply(&mut items, AppliedFilter::new("ap", 0));

        // banana is filtered out; scanning from 1 lands on apricot.
        assert_eq!(scan_for_eligible(&items, &filters, 1), Some(2));
    }

    #[test]
    fn test_scan_start_past_end() {
        let items = items(&["x"]);
        let filters = FilterEngine::new();
        assert_eq!(scan_for_eligible(&items, &filters, 5), Some(0));
    }
}
