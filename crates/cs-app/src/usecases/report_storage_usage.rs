use std::sync::Arc;

use cs_core::ports::{HistoryStorePort, StorageError, StorageUsage};
use tracing::{info_span, warn, Instrument};

/// Use case for reporting how much disk the history occupies
/// 报告历史记录占用的磁盘空间
pub struct ReportStorageUsage {
    store: Arc<dyn HistoryStorePort>,
}

impl ReportStorageUsage {
    pub fn new(store: Arc<dyn HistoryStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<StorageUsage, StorageError> {
        async {
            let usage = self.store.usage().await?;
            if usage.exceeds_quota() {
                warn!(
                    total_bytes = usage.total_bytes,
                    quota_bytes = usage.quota_bytes,
                    "history storage exceeds its quota"
                );
            }
            Ok(usage)
        }
        .instrument(info_span!("usecase.report_storage_usage.execute"))
        .await
    }
}
