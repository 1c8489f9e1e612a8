//! History ordering and retention rules.

use std::cmp::Reverse;

use crate::clipboard::ClipboardItem;

/// Sort favorites first, newest first within each group.
///
/// The sort is stable, so items with equal timestamps keep their current
/// relative order. A freshly inserted head therefore stays ahead of an older
/// item that happens to share its timestamp.
pub fn sort_favorites_first(items: &mut [ClipboardItem]) {
    items.sort_by_key(|item| (Reverse(item.is_favorite()), Reverse(item.timestamp())));
}

/// Whether `items` already satisfies the favorites-first ordering.
pub fn is_favorites_first(items: &[ClipboardItem]) -> bool {
    items.windows(2).all(|pair| {
        let (a, b) = (&pair[0], &pair[1]);
        match (a.is_favorite(), b.is_favorite()) {
            (false, true) => false,
            (true, false) => true,
            _ => a.timestamp() >= b.timestamp(),
        }
    })
}

/// Drop tail elements until `items.len() <= capacity`.
///
/// Must run on a sorted list: the tail is the oldest non-favorite, or the
/// oldest favorite once only favorites remain. Returns the evicted items in
/// removal order.
pub fn evict_over_capacity(items: &mut Vec<ClipboardItem>, capacity: usize) -> Vec<ClipboardItem> {
    if items.len() <= capacity {
        return Vec::new();
    }
    let mut evicted = items.split_off(capacity);
    evicted.reverse();
    evicted
}
