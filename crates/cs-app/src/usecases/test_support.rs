//! Shared fixtures for use case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use cs_core::ports::{HistoryStorePort, StorageError, StorageUsage};
use cs_core::{ClipboardContent, ClipboardItem, ItemId, TimestampMs};

pub(crate) fn text_item(id: &str, text: &str, ts: i64) -> ClipboardItem {
    ClipboardItem::restore(
        ItemId::from(id),
        TimestampMs::from_epoch_millis(ts),
        ClipboardContent::Text(text.to_string()),
        false,
    )
}

/// Store serving a fixed list and recording what was called.
pub(crate) struct StaticStore {
    items: Vec<ClipboardItem>,
    usage: StorageUsage,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl StaticStore {
    pub(crate) fn with_items(items: Vec<ClipboardItem>) -> Self {
        Self {
            items,
            usage: StorageUsage {
                total_bytes: 0,
                quota_bytes: 1024,
            },
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_items(Vec::new())
        }
    }

    pub(crate) fn with_usage(mut self, usage: StorageUsage) -> Self {
        self.usage = usage;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn load_calls(&self) -> usize {
        self.calls().iter().filter(|c| *c == "load").count()
    }

    fn record(&self, call: impl Into<String>) -> Result<(), StorageError> {
        self.calls.lock().unwrap().push(call.into());
        if self.fail {
            return Err(StorageError::CorruptMetadata("unreadable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStorePort for StaticStore {
    async fn save(&self, items: &[ClipboardItem]) -> Result<(), StorageError> {
        self.record(format!("save:{}", items.len()))
    }

    async fn load(&self) -> Result<Vec<ClipboardItem>, StorageError> {
        self.record("load")?;
        Ok(self.items.clone())
    }

    async fn delete_item(&self, item: &ClipboardItem) -> Result<(), StorageError> {
        self.record(format!("delete:{}", item.id()))
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        self.record("clear_all")
    }

    async fn usage(&self) -> Result<StorageUsage, StorageError> {
        self.record("usage")?;
        Ok(self.usage)
    }
}
