//! Use case for the home-screen widget
//! 主屏幕小组件读取条目的用例

use std::sync::Arc;

use cs_core::ports::{HistoryStorePort, WidgetAccessPort};
use cs_core::ClipboardItem;
use tracing::{debug, info_span, warn, Instrument};

use super::COMPANION_ITEM_LIMIT;

/// Read-only view of the most recent items for the widget.
///
/// ## Behavior / 行为
/// - Returns nothing when the user turned widget access off
/// - Never writes to storage
/// - Storage failures degrade to an empty list
pub struct LoadWidgetItems {
    store: Arc<dyn HistoryStorePort>,
    widget_access: Arc<dyn WidgetAccessPort>,
    limit: usize,
}

impl LoadWidgetItems {
    pub fn new(store: Arc<dyn HistoryStorePort>, widget_access: Arc<dyn WidgetAccessPort>) -> Self {
        Self {
            store,
            widget_access,
            limit: COMPANION_ITEM_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub async fn execute(&self) -> Vec<ClipboardItem> {
        let span = info_span!("usecase.load_widget_items.execute", limit = self.limit);
        async {
            if !self.widget_access.is_widget_access_allowed().await {
                debug!("widget access disabled");
                return Vec::new();
            }
            match self.store.load().await {
                Ok(mut items) => {
                    items.truncate(self.limit);
                    items
                }
                Err(err) => {
                    warn!(error = %err, "widget history unavailable");
                    Vec::new()
                }
            }
        }
        .instrument(span)
        .await
    }
}
