use crate::clipboard::ClipboardItem;

use super::HistoryState;

/// Read-only view of the history published to observers after every change.
///
/// 历史列表的只读快照，每次状态变化后发布。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySnapshot {
    pub items: Vec<ClipboardItem>,
    /// `items` filtered by `search_text`.
    pub visible_items: Vec<ClipboardItem>,
    pub search_text: String,
    pub is_monitoring: bool,
    pub capacity: usize,
}

impl From<&HistoryState> for HistorySnapshot {
    fn from(state: &HistoryState) -> Self {
        Self {
            items: state.items.clone(),
            visible_items: state.visible_items().into_iter().cloned().collect(),
            search_text: state.search_text.clone(),
            is_monitoring: state.is_monitoring(),
            capacity: state.capacity,
        }
    }
}
