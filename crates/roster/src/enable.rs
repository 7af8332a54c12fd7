//! Enable-state queries.
//!
//! The enabled flag itself is written by the adapter core (disabling a
//! selected item routes through the selection engine first, so listeners
//! observe the deselection before the enable-state change). This module
//! holds the pure queries over the backing sequence, optionally scoped to
//! the visible view.

use crate::filtering::FilterEngine;
use crate::item::Item;

/// Scope for enable-state queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Scope {
    /// The whole backing sequence.
    #[default]
    All,
    /// Only items in the visible view (matching all active filters).
    Visible,
}

/// Indices of items whose enabled flag equals `enabled`, within `scope`.
pub(crate) fn indices_with_enabled<T>(
    items: &[Item<T>],
    filters: &FilterEngine,
    scope: Scope,
    enabled: bool,
) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.enabled() == enabled)
        .filter(|(_, item)| scope == Scope::All || filters.is_visible(item))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::AppliedFilter;

    #[test]
    fn test_scoped_queries() {
        let mut items: Vec<Item<String>> = ["apple", "banana", "apricot"]
            .iter()
            .map(|p| Item::new(p.to_string()))
            .collect();
        items[0].set_enabled(false);

        let mut filters = FilterEngine::new();
        filters.apply(&mut items, AppliedFilter::new("ap", 0));

        assert_eq!(
            indices_with_enabled(&items, &filters, Scope::All, true),
            vec![1, 2]
        );
        assert_eq!(
            indices_with_enabled(&items, &filters, Scope::Visible, true),
            vec![2]
        );
        assert_eq!(
            indices_with_enabled(&items, &filters, Scope::All, false),
            vec![0]
        );
    }
}
