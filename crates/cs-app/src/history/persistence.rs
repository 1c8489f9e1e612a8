//! Ordered background persistence.
//!
//! Jobs run one at a time in the order they were queued, so a clear queued
//! before a save can never wipe the newer snapshot. Scheduling never blocks
//! the caller.

use std::sync::Arc;

use cs_core::ports::HistoryStorePort;
use cs_core::ClipboardItem;
use tokio::sync::{mpsc, oneshot};
use tokio_util::task::TaskTracker;
use tracing::{debug, error, warn};

enum PersistenceJob {
    Save(Vec<ClipboardItem>),
    Delete(ClipboardItem),
    Clear,
    Flush(oneshot::Sender<()>),
}

impl PersistenceJob {
    fn name(&self) -> &'static str {
        match self {
            PersistenceJob::Save(_) => "save",
            PersistenceJob::Delete(_) => "delete",
            PersistenceJob::Clear => "clear",
            PersistenceJob::Flush(_) => "flush",
        }
    }
}

/// Handle for queueing persistence jobs.
#[derive(Clone)]
pub struct PersistenceQueue {
    tx: mpsc::UnboundedSender<PersistenceJob>,
}

impl PersistenceQueue {
    /// Start the worker on `tasks`. It stops once every queue handle is
    /// dropped and the remaining jobs are done.
    pub fn spawn(store: Arc<dyn HistoryStorePort>, tasks: &TaskTracker) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tasks.spawn(PersistenceWorker { rx, store }.run());
        Self { tx }
    }

    pub fn save(&self, items: Vec<ClipboardItem>) {
        self.enqueue(PersistenceJob::Save(items));
    }

    pub fn delete(&self, item: ClipboardItem) {
        self.enqueue(PersistenceJob::Delete(item));
    }

    pub fn clear(&self) {
        self.enqueue(PersistenceJob::Clear);
    }

    /// Wait until every job queued before this call has finished.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.enqueue(PersistenceJob::Flush(done_tx));
        // A dropped sender means the worker is gone and nothing is pending.
        let _ = done_rx.await;
    }

    fn enqueue(&self, job: PersistenceJob) {
        let name = job.name();
        if self.tx.send(job).is_err() {
            error!(job = name, "persistence worker is gone, job dropped");
        }
    }
}

struct PersistenceWorker {
    rx: mpsc::UnboundedReceiver<PersistenceJob>,
    store: Arc<dyn HistoryStorePort>,
}

impl PersistenceWorker {
    async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            self.handle(job).await;
        }
        debug!("persistence worker stopped");
    }

    async fn handle(&self, job: PersistenceJob) {
        match job {
            PersistenceJob::Save(items) => {
                if let Err(err) = self.store.save(&items).await {
                    error!(error = %err, items = items.len(), "Failed to save history");
                    return;
                }
                self.check_quota().await;
            }
            PersistenceJob::Delete(item) => {
                if let Err(err) = self.store.delete_item(&item).await {
                    warn!(error = %err, item_id = %item.id(), "Failed to delete item blobs");
                }
            }
            PersistenceJob::Clear => {
                if let Err(err) = self.store.clear_all().await {
                    error!(error = %err, "Failed to clear history storage");
                }
            }
            PersistenceJob::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    async fn check_quota(&self) {
        match self.store.usage().await {
            Ok(usage) if usage.exceeds_quota() => warn!(
                total_bytes = usage.total_bytes,
                quota_bytes = usage.quota_bytes,
                "history storage exceeds its quota"
            ),
            Ok(_) => {}
            Err(err) => debug!(error = %err, "storage usage unavailable"),
        }
    }
}
