//! Case-insensitive substring search over history items.

use crate::clipboard::ClipboardItem;

/// Whether `item` matches an already lowercased query.
fn matches_lowercase(item: &ClipboardItem, query: &str) -> bool {
    item.content()
        .searchable_text()
        .is_some_and(|text| text.to_lowercase().contains(query))
}

/// Items visible for `query`, in list order.
///
/// An empty query shows everything, images included. A non-empty query
/// matches text, URL strings and file names; images never match.
pub fn filter_items<'a>(items: &'a [ClipboardItem], query: &str) -> Vec<&'a ClipboardItem> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let query = query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_lowercase(item, &query))
        .collect()
}
