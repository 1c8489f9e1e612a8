//! History controller.
//!
//! Owns the [`HistoryState`] behind one async mutex and drives it through
//! [`HistoryStateMachine`]. Every public operation is a single event; the
//! actions that come back are executed in order while the lock is held, so
//! operations and clipboard signals are applied one at a time.
//!
//! 历史控制器：串行地把事件交给纯状态机，并执行其返回的副作用。

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use cs_core::clipboard::classify;
use cs_core::history::{
    HistoryAction, HistoryEvent, HistorySnapshot, HistoryState, HistoryStateMachine,
    RemovalReason,
};
use cs_core::ports::{ClipboardAccessError, ClipboardChangeHandler, StorageError};
use cs_core::{ClipboardItem, ItemId};
use tokio::sync::{watch, Mutex};
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::persistence::PersistenceQueue;
use crate::deps::HistoryDeps;

/// Paste of a stored item failed.
#[derive(Debug, thiserror::Error)]
pub enum CopyToClipboardError {
    #[error("history item not found: {0}")]
    NotFound(ItemId),

    #[error(transparent)]
    Clipboard(#[from] ClipboardAccessError),
}

/// Serialized owner of the clipboard history.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct HistoryController {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<HistoryState>,
    deps: HistoryDeps,
    persistence: PersistenceQueue,
    /// Hosts the persistence worker for the lifetime of the controller.
    workers: TaskTracker,
    /// In-flight thumbnail generations.
    thumbnail_tasks: TaskTracker,
    snapshot_tx: watch::Sender<HistorySnapshot>,
}

impl HistoryController {
    pub fn new(deps: HistoryDeps) -> Self {
        let workers = TaskTracker::new();
        let persistence = PersistenceQueue::spawn(deps.store.clone(), &workers);
        workers.close();

        let state = HistoryState::default();
        let (snapshot_tx, _) = watch::channel(HistorySnapshot::from(&state));

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                deps,
                persistence,
                workers,
                thumbnail_tasks: TaskTracker::new(),
                snapshot_tx,
            }),
        }
    }

    /// Apply the current entitlement and replace the list with what storage
    /// holds. Call once at startup before monitoring begins.
    ///
    /// On a storage error the capacity is still applied and the list stays
    /// as it was (empty at startup).
    pub async fn load(&self) -> Result<(), StorageError> {
        let capacity = self.inner.deps.entitlement.max_items().await;
        let mut state = self.inner.state.lock().await;
        self.apply(&mut state, HistoryEvent::CapacityChanged { capacity })
            .await;

        let items = self.inner.deps.store.load().await?;
        info!(capacity, loaded = items.len(), "history loaded");
        self.apply(&mut state, HistoryEvent::ItemsLoaded { items })
            .await;
        Ok(())
    }

    pub async fn add_item(&self, item: ClipboardItem) {
        self.dispatch(HistoryEvent::ItemAdded { item }).await;
    }

    /// Remove items by position in the full, unfiltered list. Out-of-range
    /// positions are ignored.
    pub async fn remove_at(&self, indices: Vec<usize>) {
        self.dispatch(HistoryEvent::ItemsRemovedAt { indices }).await;
    }

    pub async fn remove_item(&self, id: &ItemId) {
        self.dispatch(HistoryEvent::ItemRemoved { id: id.clone() })
            .await;
    }

    pub async fn clear_all(&self) {
        self.dispatch(HistoryEvent::AllCleared).await;
    }

    pub async fn toggle_favorite(&self, id: &ItemId) {
        self.dispatch(HistoryEvent::FavoriteToggled { id: id.clone() })
            .await;
    }

    pub async fn update_search_text(&self, text: impl Into<String>) {
        self.dispatch(HistoryEvent::SearchTextUpdated { text: text.into() })
            .await;
    }

    pub async fn start_monitoring(&self) {
        self.dispatch(HistoryEvent::MonitoringStartRequested).await;
    }

    pub async fn stop_monitoring(&self) {
        self.dispatch(HistoryEvent::MonitoringStopRequested).await;
    }

    pub async fn set_host_active(&self, active: bool) {
        self.dispatch(HistoryEvent::HostActivityChanged { active })
            .await;
    }

    pub async fn set_background_monitoring(&self, enabled: bool) {
        self.dispatch(HistoryEvent::BackgroundMonitoringChanged { enabled })
            .await;
    }

    /// Re-read the entitlement, e.g. after a purchase or a downgrade.
    pub async fn refresh_capacity(&self) {
        let capacity = self.inner.deps.entitlement.max_items().await;
        self.dispatch(HistoryEvent::CapacityChanged { capacity })
            .await;
    }

    /// Write a stored item back to the system clipboard.
    ///
    /// The resulting clipboard change is acknowledged so the watcher does not
    /// capture it again.
    pub async fn paste_item(&self, id: &ItemId) -> Result<(), CopyToClipboardError> {
        let mut state = self.inner.state.lock().await;
        let item = state
            .find(id)
            .cloned()
            .ok_or_else(|| CopyToClipboardError::NotFound(id.clone()))?;

        let writer = self.inner.deps.clipboard_writer.clone();
        let content = item.content().clone();
        run_blocking(move || writer.write_content(&content)).await?;
        debug!(item_id = %id, kind = %item.kind(), "item written to clipboard");

        let reader = self.inner.deps.clipboard_reader.clone();
        match run_blocking(move || reader.change_signature()).await {
            Ok(signature) => {
                self.apply(&mut state, HistoryEvent::SignatureAcknowledged { signature })
                    .await;
            }
            Err(err) => {
                warn!(error = %err, "clipboard signature unavailable after paste");
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Receiver that sees a new snapshot after every observable change.
    pub fn subscribe(&self) -> watch::Receiver<HistorySnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    pub fn items(&self) -> Vec<ClipboardItem> {
        self.inner.snapshot_tx.borrow().items.clone()
    }

    pub fn visible_items(&self) -> Vec<ClipboardItem> {
        self.inner.snapshot_tx.borrow().visible_items.clone()
    }

    /// Wait for pending thumbnails and every queued storage write.
    pub async fn flush(&self) {
        let tasks = &self.inner.thumbnail_tasks;
        tasks.close();
        tasks.wait().await;
        tasks.reopen();
        self.inner.persistence.flush().await;
    }

    /// Stop monitoring and drain background work.
    pub async fn shutdown(&self) {
        self.stop_monitoring().await;
        self.flush().await;
        debug!(
            workers = self.inner.workers.len(),
            "history controller shut down"
        );
    }

    async fn dispatch(&self, event: HistoryEvent) {
        let mut state = self.inner.state.lock().await;
        self.apply(&mut state, event).await;
    }

    /// Run `event` and every follow-up event its actions produce, then
    /// publish the snapshot if it changed.
    async fn apply(&self, state: &mut HistoryState, event: HistoryEvent) {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            let (next, actions) = HistoryStateMachine::transition(std::mem::take(state), event);
            *state = next;
            for action in actions {
                if let Some(follow_up) = self.execute(state, action).await {
                    pending.push_back(follow_up);
                }
            }
        }
        self.publish(state);
    }

    async fn execute(&self, state: &HistoryState, action: HistoryAction) -> Option<HistoryEvent> {
        let deps = &self.inner.deps;
        match action {
            HistoryAction::PersistSnapshot { items } => {
                self.inner.persistence.save(items);
                None
            }
            HistoryAction::DeleteBlobs { item, reason } => {
                if reason == RemovalReason::Evicted {
                    info!(item_id = %item.id(), kind = %item.kind(), "item evicted over capacity");
                }
                self.inner.persistence.delete(item);
                None
            }
            HistoryAction::ClearStorage => {
                self.inner.persistence.clear();
                None
            }
            HistoryAction::StartWatcher => match deps.watcher_control.start_watcher().await {
                Ok(()) => {
                    info!("clipboard monitoring started");
                    None
                }
                Err(err) => {
                    error!(error = %err, "failed to start clipboard watcher");
                    Some(HistoryEvent::WatcherStartFailed)
                }
            },
            HistoryAction::StopWatcher => {
                match deps.watcher_control.stop_watcher().await {
                    Ok(()) => info!("clipboard monitoring stopped"),
                    Err(err) => warn!(error = %err, "failed to stop clipboard watcher"),
                }
                None
            }
            HistoryAction::CaptureClipboard { baseline } => self.capture(state, baseline).await,
            HistoryAction::GenerateThumbnail { id, image } => {
                self.spawn_thumbnail(id, image);
                None
            }
        }
    }

    async fn capture(&self, state: &HistoryState, baseline: bool) -> Option<HistoryEvent> {
        let reader = self.inner.deps.clipboard_reader.clone();
        let observation = match run_blocking(move || reader.read_observation()).await {
            Ok(observation) => observation,
            Err(err) => {
                warn!(error = %err, "failed to read clipboard");
                return None;
            }
        };
        let Some(content) = classify(observation) else {
            debug!("clipboard holds nothing storable");
            return None;
        };
        let timestamp = state.next_timestamp(self.inner.deps.clock.now());
        let item = ClipboardItem::new(content, timestamp);
        debug!(item_id = %item.id(), kind = %item.kind(), baseline, "clipboard captured");
        Some(HistoryEvent::ItemCaptured { item, baseline })
    }

    fn spawn_thumbnail(&self, id: ItemId, image: Bytes) {
        let this = self.clone();
        let span = info_span!("generate_thumbnail", item_id = %id);
        self.inner.thumbnail_tasks.spawn(
            async move {
                match this.inner.deps.thumbnails.generate_thumbnail(image).await {
                    Ok(generated) => {
                        debug!(
                            width = generated.width,
                            height = generated.height,
                            "thumbnail generated"
                        );
                        this.dispatch(HistoryEvent::ThumbnailGenerated {
                            id,
                            thumbnail: generated.bytes,
                        })
                        .await;
                    }
                    Err(err) => warn!(error = %err, "thumbnail generation failed"),
                }
            }
            .instrument(span),
        );
    }

    fn publish(&self, state: &HistoryState) {
        let next = HistorySnapshot::from(state);
        self.inner.snapshot_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

/// Clipboard ports block on the platform; keep them off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, ClipboardAccessError>
where
    F: FnOnce() -> Result<T, ClipboardAccessError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ClipboardAccessError::Unavailable(format!("clipboard task failed: {e}")))?
}

#[async_trait]
impl ClipboardChangeHandler for HistoryController {
    async fn on_clipboard_changed(&self) -> anyhow::Result<()> {
        let mut state = self.inner.state.lock().await;
        if !state.accepts_signals() {
            return Ok(());
        }
        let reader = self.inner.deps.clipboard_reader.clone();
        let signature = run_blocking(move || reader.change_signature())
            .await
            .context("read clipboard change signature")?;
        self.apply(&mut state, HistoryEvent::ClipboardSignalled { signature })
            .await;
        Ok(())
    }
}
