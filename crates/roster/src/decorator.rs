//! Decorator capability.
//!
//! Rendering is delegated entirely to an external collaborator: the adapter
//! calls [`Decorator::decorate`] once per visible item at draw time and
//! never inspects the result beyond handing it back to the host widget.

use crate::adapter::ListAdapter;
use crate::filtering::Matchable;

/// Renders one item into whatever the host widget consumes.
///
/// # Example
///
/// ```
/// use roster::{Decorator, MultipleChoiceAdapter};
///
/// struct RowDecorator;
///
/// impl Decorator<String> for RowDecorator {
///     type Output = String;
///
///     fn decorate(
///         &mut self,
///         item: &String,
///         index: usize,
///         enabled: bool,
///         _state: u32,
///         _filtered: bool,
///         selected: bool,
///     ) -> String {
///         let marker = if selected { "*" } else { " " };
///         let suffix = if enabled { "" } else { " (disabled)" };
///         format!("{marker}{index} {item}{suffix}")
///     }
/// }
///
/// let mut adapter = MultipleChoiceAdapter::new();
/// adapter.add_item("hello".to_string());
/// let rows = adapter.render_visible(&mut RowDecorator);
/// assert_eq!(rows, vec![" 0 hello"]);
/// ```
pub trait Decorator<T> {
    /// The view representation produced for one item.
    type Output;

    /// Renders one visible item. `index` is the item's position within the
    /// visible view; `filtered` reports whether any filter is currently
    /// active on the adapter.
    fn decorate(
        &mut self,
        item: &T,
        index: usize,
        enabled: bool,
        state: u32,
        filtered: bool,
        selected: bool,
    ) -> Self::Output;
}

impl<T: Clone + PartialEq + Matchable> ListAdapter<T> {
    /// Walks the visible view in order, calling the decorator once per item,
    /// and returns the rendered outputs for the host widget.
    pub fn render_visible<D: Decorator<T>>(&self, decorator: &mut D) -> Vec<D::Output> {
        let filtered = self.is_filtered();
        self.visible_ref()
            .visible_indices()
            .iter()
            .enumerate()
            .map(|(visible_index, &backing)| {
                let item = &self.items_ref()[backing];
                decorator.decorate(
                    item.data(),
                    visible_index,
                    item.enabled(),
                    item.state(),
                    filtered,
                    item.selected(),
                )
            })
            .collect()
    }
}
