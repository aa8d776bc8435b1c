//! Property-based tests for filtering and highlight invariants.
//!
//! Tests validate:
//! 1. The visible list is an order-preserving subset of the items
//! 2. Extending the query never widens the visible list
//! 3. Highlight movement stays inside the visible list
//! 4. Confirm without a highlight changes nothing

use proptest::prelude::*;
use tui_combobox::model::{ComboBoxId, InstanceIdGenerator};
use tui_combobox::state::{filter_indices, ComboBox, ComboBoxProps, FilterPolicy};

fn identity(s: &String) -> String {
    s.clone()
}

fn labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z ]{0,8}", 0..30)
}

fn query() -> impl Strategy<Value = String> {
    "[a-zA-Z]{0,4}"
}

fn combo(items: Vec<String>) -> ComboBox<String> {
    let props = ComboBoxProps::new(
        ComboBoxId::new("prop").unwrap(),
        items,
        "",
        |_: Option<&String>| {},
    );
    ComboBox::new(props, &InstanceIdGenerator::new())
}

// ===== Property 1: Subset in item order =====

proptest! {
    #[test]
    fn visible_list_is_ordered_subset(items in labels(), q in query()) {
        let visible = filter_indices(&items, &identity, &q, &FilterPolicy::Prefix);

        prop_assert!(visible.windows(2).all(|w| w[0] < w[1]), "indices must be strictly increasing");
        prop_assert!(visible.iter().all(|&i| i < items.len()));
    }

    #[test]
    fn every_visible_item_matches_and_every_match_is_visible(items in labels(), q in query()) {
        let visible = filter_indices(&items, &identity, &q, &FilterPolicy::Prefix);
        let expected: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, label)| label.to_lowercase().starts_with(&q.to_lowercase()))
            .map(|(i, _)| i)
            .collect();

        prop_assert_eq!(visible, expected);
    }

    #[test]
    fn empty_query_shows_everything(items in labels()) {
        let visible = filter_indices(&items, &identity, "", &FilterPolicy::Prefix);
        prop_assert_eq!(visible, (0..items.len()).collect::<Vec<_>>());
    }
}

// ===== Property 2: Monotonic narrowing =====

proptest! {
    #[test]
    fn extending_query_never_widens(items in labels(), q in query(), extra in "[a-zA-Z]{1,3}") {
        let longer = format!("{q}{extra}");
        let wide = filter_indices(&items, &identity, &q, &FilterPolicy::Prefix);
        let narrow = filter_indices(&items, &identity, &longer, &FilterPolicy::Prefix);

        prop_assert!(narrow.iter().all(|i| wide.contains(i)));
    }
}

// ===== Property 3: Highlight bounds =====

proptest! {
    #[test]
    fn highlight_stays_in_bounds(
        items in labels(),
        q in query(),
        moves in prop::collection::vec(-12isize..12, 0..20),
    ) {
        let mut combo = combo(items);
        combo.set_query(q);
        combo.open();

        for delta in moves {
            combo.move_highlight(delta);
            if let Some(row) = combo.highlighted_index() {
                prop_assert!(row < combo.visible_len());
            }
        }
    }

    #[test]
    fn query_change_clears_highlight(items in labels(), q in query()) {
        let mut combo = combo(items);
        combo.open();
        combo.move_highlight(1);

        combo.set_query(q);

        prop_assert_eq!(combo.highlighted_index(), None);
    }
}

// ===== Property 4: Confirm needs a highlight =====

proptest! {
    #[test]
    fn confirm_without_highlight_is_noop(items in labels(), q in query()) {
        let mut combo = combo(items);
        combo.set_query(q.clone());
        combo.open();

        let changed = combo.confirm_selection();

        prop_assert!(!changed);
        prop_assert_eq!(combo.selected_item(), None);
        prop_assert_eq!(combo.query(), q.as_str());
    }
}
