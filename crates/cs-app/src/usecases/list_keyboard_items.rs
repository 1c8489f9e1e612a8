use std::sync::Arc;

use cs_core::ports::HistoryStorePort;
use cs_core::ClipboardItem;
use tracing::{info_span, warn, Instrument};

use super::COMPANION_ITEM_LIMIT;

/// Use case for the keyboard extension's item strip
/// 键盘扩展读取最近条目的用例
///
/// The keyboard must always render, so storage failures degrade to an empty
/// list instead of an error.
pub struct ListKeyboardItems {
    store: Arc<dyn HistoryStorePort>,
    limit: usize,
}

impl ListKeyboardItems {
    pub fn new(store: Arc<dyn HistoryStorePort>) -> Self {
        Self {
            store,
            limit: COMPANION_ITEM_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub async fn execute(&self) -> Vec<ClipboardItem> {
        let span = info_span!("usecase.list_keyboard_items.execute", limit = self.limit);
        async {
            match self.store.load().await {
                Ok(mut items) => {
                    items.truncate(self.limit);
                    items
                }
                Err(err) => {
                    warn!(error = %err, "keyboard history unavailable");
                    Vec::new()
                }
            }
        }
        .instrument(span)
        .await
    }
}
