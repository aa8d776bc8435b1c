//! Item filtering (pure).
//!
//! The visible list is always `filter(items, query)` expressed as indices into
//! the item set. Filtering is stable and never touches the items themselves.

use std::fmt;

/// Caller-supplied filter predicate: `(item, item_to_label, query) -> keep`.
pub type FilterPredicate<T> = Box<dyn Fn(&T, &dyn Fn(&T) -> String, &str) -> bool>;

/// How the query narrows the item set.
pub enum FilterPolicy<T> {
    /// Case-insensitive prefix match on the item label.
    Prefix,
    /// Caller predicate. Replaces the prefix match entirely.
    Custom(FilterPredicate<T>),
}

impl<T> FilterPolicy<T> {
    /// Wrap a custom predicate.
    pub fn custom(f: impl Fn(&T, &dyn Fn(&T) -> String, &str) -> bool + 'static) -> Self {
        FilterPolicy::Custom(Box::new(f))
    }

    /// Whether `item` stays visible for `query`.
    pub fn matches(&self, item: &T, label: &dyn Fn(&T) -> String, query: &str) -> bool {
        match self {
            FilterPolicy::Prefix => prefix_match(&label(item), query),
            FilterPolicy::Custom(predicate) => predicate(item, label, query),
        }
    }
}

impl<T> Default for FilterPolicy<T> {
    fn default() -> Self {
        FilterPolicy::Prefix
    }
}

impl<T> fmt::Debug for FilterPolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPolicy::Prefix => f.write_str("Prefix"),
            FilterPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Case-insensitive `label.starts_with(query)`.
pub fn prefix_match(label: &str, query: &str) -> bool {
    label.to_lowercase().starts_with(&query.to_lowercase())
}

/// Indices of the items that pass `policy` for `query`, in item order.
pub fn filter_indices<T>(
    items: &[T],
    label: &dyn Fn(&T) -> String,
    query: &str,
    policy: &FilterPolicy<T>,
) -> Vec<usize> {
    match policy {
        FilterPolicy::Prefix => {
            if query.is_empty() {
                return (0..items.len()).collect();
            }
            let needle = query.to_lowercase();
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| label(*item).to_lowercase().starts_with(&needle))
                .map(|(i, _)| i)
                .collect()
        }
        FilterPolicy::Custom(predicate) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| predicate(*item, label, query))
            .map(|(i, _)| i)
            .collect(),
    }
}
