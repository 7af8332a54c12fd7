//! Cross-engine scenario tests: selection, enable-state and filtering
//! interacting over whole mutation sequences.

use parking_lot::Mutex;
use std::sync::Arc;

use roster::{MultipleChoiceAdapter, Scope, SingleChoiceAdapter};

fn single(payloads: &[&str]) -> SingleChoiceAdapter<String> {
    let mut adapter = SingleChoiceAdapter::new();
    adapter.add_all_items(payloads.iter().map(|p| p.to_string()));
    adapter
}

fn multiple(payloads: &[&str]) -> MultipleChoiceAdapter<String> {
    let mut adapter = MultipleChoiceAdapter::new();
    adapter.add_all_items(payloads.iter().map(|p| p.to_string()));
    adapter
}

/// selected(i) implies enabled(i), for every item.
fn assert_selection_enabled_invariant(adapter: &MultipleChoiceAdapter<String>) {
    for index in adapter.selected_indices() {
        assert!(
            adapter.is_enabled_at(index).unwrap(),
            "item {index} is selected but disabled"
        );
    }
}

#[test]
fn selection_enabled_invariant_across_mutation_sequence() {
    let mut adapter = multiple(&["a", "b", "c", "d"]);
    adapter.set_all_selected(true);
    assert_selection_enabled_invariant(&adapter);

    adapter.set_enabled_at(1, false).unwrap();
    assert_selection_enabled_invariant(&adapter);

    adapter.remove_item_at(0).unwrap();
    assert_selection_enabled_invariant(&adapter);

    adapter.replace_item_at(0, "e".to_string()).unwrap();
    assert_selection_enabled_invariant(&adapter);

    adapter.set_enabled_at(0, true).unwrap();
    adapter.trigger_all_selections();
    assert_selection_enabled_invariant(&adapter);
}

#[test]
fn single_choice_uniqueness_across_mutation_sequence() {
    let mut adapter = single(&["a", "b", "c"]);

    let count_selected = |adapter: &SingleChoiceAdapter<String>| {
        (0..adapter.len())
            .filter(|&i| adapter.is_selected_at(i).unwrap())
            .count()
    };

    assert_eq!(count_selected(&adapter), 1);

    adapter.trigger_selection_at(2).unwrap();
    assert_eq!(count_selected(&adapter), 1);

    adapter.set_enabled_at(2, false).unwrap();
    assert!(count_selected(&adapter) <= 1);

    adapter.remove_item_at(0).unwrap();
    assert!(count_selected(&adapter) <= 1);

    adapter.apply_filter("b", 0);
    assert!(count_selected(&adapter) <= 1);
    adapter.reset_all_filters();
    assert!(count_selected(&adapter) <= 1);
}

#[test]
fn filter_round_trip_preserves_single_choice_selection() {
    // Items A, B, C with B selected: hiding B and resetting all filters
    // restores exactly the previous selection, with no scan reassignment.
    let mut adapter = single(&["alpha", "beta", "gamma"]);
    adapter.trigger_selection_at(1).unwrap();

    let scans = Arc::new(Mutex::new(Vec::new()));
    let recv = scans.clone();
    adapter.signals().item_selected.connect(move |(item, _)| {
        recv.lock().push(item.clone());
    });

    adapter.apply_filter("gamma", 0); // hides alpha and beta
    assert_eq!(adapter.selected_index(), None);

    adapter.reset_all_filters();
    assert_eq!(adapter.selected_index(), Some(1));
    assert!(!adapter.is_selected_at(0).unwrap());
    assert!(!adapter.is_selected_at(2).unwrap());

    // The filter cycle itself fired no selection events at all.
    assert!(scans.lock().is_empty());
}

#[test]
fn disable_then_remove_multiple_choice() {
    let mut adapter = multiple(&["a", "b", "c"]);
    adapter.set_selected_at(2, true).unwrap();

    adapter.set_enabled_at(0, false).unwrap();
    adapter.remove_item_at(0).unwrap();

    // The other selection is untouched (now at index 1 after the shift).
    assert_eq!(adapter.selected_indices(), vec![1]);
    assert_eq!(adapter.selected_items(), vec!["c"]);
}

#[test]
fn disable_then_remove_single_choice_rescans() {
    let mut adapter = single(&["a", "b", "c"]);
    assert_eq!(adapter.selected_index(), Some(0));

    adapter.set_enabled_at(0, false).unwrap(); // selection moves to b
    assert_eq!(adapter.selected_index(), Some(1));

    adapter.remove_item_at(0).unwrap();
    assert_eq!(adapter.selected_index(), Some(0));
    assert_eq!(adapter.selected_item().map(String::as_str), Some("b"));
}

#[test]
fn scenario_multi_choice_selected_indices() {
    // Items [x, y, z]; selecting x and z yields [0, 2].
    let mut adapter = multiple(&["x", "y", "z"]);
    adapter.set_selected(&"x".to_string(), true).unwrap();
    adapter.set_selected(&"z".to_string(), true).unwrap();
    assert_eq!(adapter.selected_indices(), vec![0, 2]);
}

#[test]
fn scenario_single_choice_trigger_moves_selection() {
    // Items [x, y], both enabled; triggering y yields index 1 and the
    // listener sees unselected(x, 0) then selected(y, 1).
    let mut adapter = single(&["x", "y"]);

    let log = Arc::new(Mutex::new(Vec::new()));
    let recv = log.clone();
    adapter
        .signals()
        .item_unselected
        .connect(move |(item, index)| {
            recv.lock().push(format!("unselected({item}, {index})"));
        });
    let recv = log.clone();
    adapter.signals().item_selected.connect(move |(item, index)| {
        recv.lock().push(format!("selected({item}, {index})"));
    });

    adapter.trigger_selection(&"y".to_string()).unwrap();

    assert_eq!(adapter.selected_index(), Some(1));
    assert_eq!(*log.lock(), vec!["unselected(x, 0)", "selected(y, 1)"]);
}

#[test]
fn scenario_single_choice_auto_adapt_skips_disabled() {
    // Items [x, y, z], y disabled, x selected; disabling x moves the
    // selection to z because the forward scan skips y.
    let mut adapter = single(&["x", "y", "z"]);
    adapter.set_enabled_at(1, false).unwrap();
    assert_eq!(adapter.selected_index(), Some(0));

    adapter.set_enabled_at(0, false).unwrap();
    assert_eq!(adapter.selected_index(), Some(2));
}

#[test]
fn scenario_empty_adapter_auto_select() {
    let mut adapter = SingleChoiceAdapter::new();
    adapter.add_item("x".to_string());
    assert_eq!(adapter.selected_item().map(String::as_str), Some("x"));
}

#[test]
fn scenario_filters_combine_by_and() {
    let payloads = ["cdefghij", "bcquerystringdef", "xsbiquerystringdjwi"];

    let mut adapter = multiple(&payloads);
    assert!(adapter.apply_filter("querystring", 0));
    assert_eq!(adapter.visible_indices(), vec![1, 2]);

    assert!(adapter.apply_filter("bc", 0));
    assert_eq!(adapter.visible_indices(), vec![1]);

    // Removing one filter re-evaluates against the remaining one.
    assert!(adapter.reset_filter("bc", 0));
    assert_eq!(adapter.visible_indices(), vec![1, 2]);
}

#[test]
fn filtered_enable_queries_follow_visible_scope() {
    let mut adapter = multiple(&["apple", "banana", "apricot"]);
    adapter.set_enabled_at(0, false).unwrap();
    adapter.apply_filter("ap", 0);

    assert_eq!(adapter.enabled_indices(Scope::All), vec![1, 2]);
    assert_eq!(adapter.enabled_indices(Scope::Visible), vec![2]);
    assert_eq!(adapter.disabled_indices(Scope::Visible), vec![0]);
}

#[test]
fn mutations_while_filtered_keep_visible_view_consistent() {
    let mut adapter = single(&["apple", "banana", "apricot"]);
    adapter.apply_filter("ap", 0);
    assert_eq!(adapter.visible_count(), 2);

    // A hidden item arrives: backing grows, visible view does not.
    adapter.add_item("berry".to_string());
    assert_eq!(adapter.len(), 4);
    assert_eq!(adapter.visible_count(), 2);

    // A matching item arrives: both grow.
    adapter.add_item("grape".to_string());
    assert_eq!(adapter.visible_count(), 3);

    adapter.remove_item(&"apple".to_string()).unwrap();
    assert_eq!(adapter.visible_count(), 2);
    assert_eq!(adapter.len(), 4);

    adapter.reset_all_filters();
    assert_eq!(adapter.visible_count(), adapter.len());
}
