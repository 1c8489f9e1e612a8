use std::sync::Arc;

use cs_core::history::filter_items;
use cs_core::ports::{HistoryStorePort, StorageError};
use cs_core::ClipboardItem;
use tracing::{debug, info_span, Instrument};

/// Use case for listing persisted history items
/// 列出已持久化的历史条目
///
/// Reads storage directly, so it works without a running controller. Items
/// come back in stored order (favorites first, newest first).
pub struct ListHistoryItems {
    store: Arc<dyn HistoryStorePort>,
}

impl ListHistoryItems {
    pub fn new(store: Arc<dyn HistoryStorePort>) -> Self {
        Self { store }
    }

    /// Items matching `search` (case-insensitive, empty matches all), at most
    /// `limit` of them when a limit is given.
    pub async fn execute(
        &self,
        search: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ClipboardItem>, StorageError> {
        let span = info_span!("usecase.list_history_items.execute", search, ?limit);
        async {
            let items = self.store.load().await?;
            let total = items.len();
            let matched: Vec<ClipboardItem> = filter_items(&items, search)
                .into_iter()
                .take(limit.unwrap_or(usize::MAX))
                .cloned()
                .collect();
            debug!(total, returned = matched.len(), "history listed");
            Ok(matched)
        }
        .instrument(span)
        .await
    }
}
