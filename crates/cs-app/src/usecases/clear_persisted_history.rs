use std::sync::Arc;

use cs_core::ports::{HistoryStorePort, StorageError};
use tracing::{info, info_span, Instrument};

/// Use case for wiping persisted history without a running controller
/// 在没有运行控制器时清空已持久化的历史
///
/// Removes every stored file, then writes an empty document so readers see
/// an empty list rather than a missing one.
pub struct ClearPersistedHistory {
    store: Arc<dyn HistoryStorePort>,
}

impl ClearPersistedHistory {
    pub fn new(store: Arc<dyn HistoryStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<(), StorageError> {
        async {
            self.store.clear_all().await?;
            self.store.save(&[]).await?;
            info!("persisted history cleared");
            Ok(())
        }
        .instrument(info_span!("usecase.clear_persisted_history.execute"))
        .await
    }
}
