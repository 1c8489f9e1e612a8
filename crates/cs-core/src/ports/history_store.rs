use std::sync::Arc;

use async_trait::async_trait;

use super::errors::StorageError;
use crate::clipboard::ClipboardItem;

/// Disk usage of the history store against its soft quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageUsage {
    pub total_bytes: u64,
    pub quota_bytes: u64,
}

impl StorageUsage {
    pub fn exceeds_quota(&self) -> bool {
        self.total_bytes > self.quota_bytes
    }
}

/// Durable storage of the history list.
///
/// 历史列表的持久化存储端口。
///
/// # Behavior / 行为
/// - `save` replaces the whole metadata document; readers see either the old
///   or the new document, never a mix.
/// - `load` of a fresh store is an empty list. Missing blobs degrade the
///   affected items instead of failing the load.
/// - `delete_item` and `clear_all` tolerate files that are already gone.
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    async fn save(&self, items: &[ClipboardItem]) -> Result<(), StorageError>;

    async fn load(&self) -> Result<Vec<ClipboardItem>, StorageError>;

    /// Remove the blobs belonging to `item`. The metadata document is left
    /// to the next `save`.
    async fn delete_item(&self, item: &ClipboardItem) -> Result<(), StorageError>;

    async fn clear_all(&self) -> Result<(), StorageError>;

    async fn usage(&self) -> Result<StorageUsage, StorageError>;
}

#[async_trait]
impl<T: HistoryStorePort + ?Sized> HistoryStorePort for Arc<T> {
    async fn save(&self, items: &[ClipboardItem]) -> Result<(), StorageError> {
        (**self).save(items).await
    }

    async fn load(&self) -> Result<Vec<ClipboardItem>, StorageError> {
        (**self).load().await
    }

    async fn delete_item(&self, item: &ClipboardItem) -> Result<(), StorageError> {
        (**self).delete_item(item).await
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        (**self).clear_all().await
    }

    async fn usage(&self) -> Result<StorageUsage, StorageError> {
        (**self).usage().await
    }
}
