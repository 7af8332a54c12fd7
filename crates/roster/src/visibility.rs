//! Visible-view row mapping.
//!
//! The visible view is a derived ordered subsequence of the backing
//! sequence: the items that satisfy every active filter. [`VisibleMap`]
//! holds the index translation between the two, and is rebuilt
//! deterministically from the backing sequence and the active filter set
//! after every mutation — it is never carried across structural changes.

use crate::filtering::FilterEngine;
use crate::item::Item;

#[derive(Clone, Debug, Default)]
pub(crate) struct VisibleMap {
    /// Mapping from visible index to backing index.
    visible_to_backing: Vec<usize>,
    /// Mapping from backing index to visible index (`None` if filtered out).
    backing_to_visible: Vec<Option<usize>>,
}

impl VisibleMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Rebuilds both mappings from scratch.
    pub(crate) fn rebuild<T>(&mut self, items: &[Item<T>], filters: &FilterEngine) {
        self.visible_to_backing.clear();
        self.backing_to_visible.clear();
        self.backing_to_visible.resize(items.len(), None);

        for (backing, item) in items.iter().enumerate() {
            if filters.is_visible(item) {
                self.backing_to_visible[backing] = Some(self.visible_to_backing.len());
                self.visible_to_backing.push(backing);
            }
        }
    }

    pub(crate) fn visible_count(&self) -> usize {
        self.visible_to_backing.len()
    }

    pub(crate) fn to_backing(&self, visible: usize) -> Option<usize> {
        self.visible_to_backing.get(visible).copied()
    }

    pub(crate) fn to_visible(&self, backing: usize) -> Option<usize> {
        self.backing_to_visible.get(backing).and_then(|entry| *entry)
    }

    pub(crate) fn visible_indices(&self) -> &[usize] {
        &self.visible_to_backing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::AppliedFilter;

    #[test]
    fn test_mapping_roundtrip() {
        let mut items: Vec<Item<String>> = ["apple", "banana", "apricot"]
            .iter()
            .map(|p| Item::new(p.to_string()))
            .collect();
        let mut filters = FilterEngine::new();
        filters.apply(&mut items, AppliedFilter::new("ap", 0));

        let mut map = VisibleMap::new();
        map.rebuild(&items, &filters);

        assert_eq!(map.visible_count(), 2);
        assert_eq!(map.visible_indices(), &[0, 2]);
        assert_eq!(map.to_backing(1), Some(2));
        assert_eq!(map.to_backing(2), None);
        assert_eq!(map.to_visible(0), Some(0));
        assert_eq!(map.to_visible(1), None);
        assert_eq!(map.to_visible(2), Some(1));
    }

    #[test]
    fn test_unfiltered_is_identity() {
        let items: Vec<Item<String>> =
            ["a", "b"].iter().map(|p| Item::new(p.to_string())).collect();
        let filters = FilterEngine::new();

        let mut map = VisibleMap::new();
        map.rebuild(&items, &filters);

        assert_eq!(map.visible_count(), 2);
        assert_eq!(map.to_backing(0), Some(0));
        assert_eq!(map.to_visible(1), Some(1));
    }
}
