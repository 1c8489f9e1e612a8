//! History state machine.
//!
//! Pure transition function for the clipboard history. Every mutation of the
//! history goes through [`HistoryStateMachine::transition`]; persistence,
//! blob cleanup and watcher control are returned as actions for the caller
//! to execute in order.

use bytes::Bytes;

use crate::clipboard::{ChangeSignature, ClipboardItem};
use crate::ids::ItemId;

use super::ordering::{evict_over_capacity, sort_favorites_first};
use super::state::{HistoryState, MonitoringState};

/// Events that drive the history.
///
/// 驱动历史列表的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// Items read from storage at startup.
    ///
    /// 启动时从存储读取的条目。
    ItemsLoaded { items: Vec<ClipboardItem> },
    /// An item supplied by the caller.
    ItemAdded { item: ClipboardItem },
    /// An item built from a clipboard read. `baseline` marks the first read
    /// of a monitoring session, which is dropped when it repeats the newest
    /// stored item.
    ItemCaptured { item: ClipboardItem, baseline: bool },
    /// Remove items at positions of the full list.
    ItemsRemovedAt { indices: Vec<usize> },
    ItemRemoved { id: ItemId },
    AllCleared,
    FavoriteToggled { id: ItemId },
    SearchTextUpdated { text: String },
    /// The watcher saw a clipboard signature.
    ///
    /// 监听器观察到剪贴板签名。
    ClipboardSignalled { signature: ChangeSignature },
    /// The app itself wrote to the clipboard; this signature must not be
    /// captured.
    SignatureAcknowledged { signature: ChangeSignature },
    MonitoringStartRequested,
    MonitoringStopRequested,
    /// The platform refused to start the watcher.
    WatcherStartFailed,
    HostActivityChanged { active: bool },
    BackgroundMonitoringChanged { enabled: bool },
    CapacityChanged { capacity: usize },
    ThumbnailGenerated { id: ItemId, thumbnail: Bytes },
}

/// Why an item's blobs are being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Dropped to stay within capacity.
    Evicted,
    /// Removed on user request.
    Deleted,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// Write the full list to storage.
    PersistSnapshot { items: Vec<ClipboardItem> },
    /// Delete the blobs of a removed item.
    DeleteBlobs {
        item: ClipboardItem,
        reason: RemovalReason,
    },
    /// Remove everything from storage.
    ClearStorage,
    StartWatcher,
    StopWatcher,
    /// Read the clipboard and feed the result back as `ItemCaptured`.
    CaptureClipboard { baseline: bool },
    GenerateThumbnail { id: ItemId, image: Bytes },
}

/// Pure history state machine.
///
/// 纯状态机：不包含副作用。
pub struct HistoryStateMachine;

impl HistoryStateMachine {
    pub fn transition(
        mut state: HistoryState,
        event: HistoryEvent,
    ) -> (HistoryState, Vec<HistoryAction>) {
        let actions = match event {
            HistoryEvent::ItemsLoaded { items } => {
                let mut seen = std::collections::HashSet::new();
                state.items = items
                    .into_iter()
                    .filter(|item| seen.insert(item.id().clone()))
                    .collect();
                sort_favorites_first(&mut state.items);
                let evicted = evict_over_capacity(&mut state.items, state.capacity);
                removal_actions(&state, evicted, RemovalReason::Evicted)
            }
            HistoryEvent::ItemAdded { item } => insert_item(&mut state, item),
            HistoryEvent::ItemCaptured { item, baseline } => {
                let repeats_newest = state
                    .newest()
                    .is_some_and(|newest| newest.content() == item.content());
                if baseline && repeats_newest {
                    Vec::new()
                } else {
                    insert_item(&mut state, item)
                }
            }
            HistoryEvent::ItemsRemovedAt { mut indices } => {
                indices.sort_unstable();
                indices.dedup();
                let mut removed = Vec::new();
                for index in indices.into_iter().rev() {
                    if index < state.items.len() {
                        removed.push(state.items.remove(index));
                    }
                }
                removal_actions(&state, removed, RemovalReason::Deleted)
            }
            HistoryEvent::ItemRemoved { id } => match state.position(&id) {
                Some(index) => {
                    let removed = state.items.remove(index);
                    removal_actions(&state, vec![removed], RemovalReason::Deleted)
                }
                None => Vec::new(),
            },
            HistoryEvent::AllCleared => {
                state.items.clear();
                vec![
                    HistoryAction::ClearStorage,
                    HistoryAction::PersistSnapshot { items: Vec::new() },
                ]
            }
            HistoryEvent::FavoriteToggled { id } => match state.position(&id) {
                Some(index) => {
                    state.items[index].toggle_favorite();
                    sort_favorites_first(&mut state.items);
                    vec![persist(&state)]
                }
                None => Vec::new(),
            },
            HistoryEvent::SearchTextUpdated { text } => {
                state.search_text = text;
                Vec::new()
            }
            HistoryEvent::ClipboardSignalled { signature } => {
                if !state.accepts_signals() || state.last_observed_signature == Some(signature) {
                    Vec::new()
                } else {
                    let baseline = state.last_observed_signature.is_none();
                    state.last_observed_signature = Some(signature);
                    vec![HistoryAction::CaptureClipboard { baseline }]
                }
            }
            HistoryEvent::SignatureAcknowledged { signature } => {
                state.last_observed_signature = Some(signature);
                Vec::new()
            }
            HistoryEvent::MonitoringStartRequested => match state.monitoring {
                MonitoringState::Stopped => {
                    state.monitoring = MonitoringState::Monitoring;
                    vec![HistoryAction::StartWatcher]
                }
                MonitoringState::Monitoring => Vec::new(),
            },
            HistoryEvent::MonitoringStopRequested => match state.monitoring {
                MonitoringState::Monitoring => {
                    state.monitoring = MonitoringState::Stopped;
                    state.last_observed_signature = None;
                    vec![HistoryAction::StopWatcher]
                }
                MonitoringState::Stopped => Vec::new(),
            },
            HistoryEvent::WatcherStartFailed => {
                state.monitoring = MonitoringState::Stopped;
                state.last_observed_signature = None;
                Vec::new()
            }
            HistoryEvent::HostActivityChanged { active } => {
                state.is_host_active = active;
                Vec::new()
            }
            HistoryEvent::BackgroundMonitoringChanged { enabled } => {
                state.background_monitoring = enabled;
                Vec::new()
            }
            HistoryEvent::CapacityChanged { capacity } => {
                state.capacity = capacity.max(1);
                let evicted = evict_over_capacity(&mut state.items, state.capacity);
                removal_actions(&state, evicted, RemovalReason::Evicted)
            }
            HistoryEvent::ThumbnailGenerated { id, thumbnail } => {
                let attached = match state.position(&id) {
                    Some(index) => state.items[index].attach_thumbnail(thumbnail),
                    None => false,
                };
                if attached {
                    vec![persist(&state)]
                } else {
                    Vec::new()
                }
            }
        };
        (state, actions)
    }
}

fn persist(state: &HistoryState) -> HistoryAction {
    HistoryAction::PersistSnapshot {
        items: state.items.clone(),
    }
}

/// Blob deletions for `removed`, followed by one save. Nothing when no item
/// was removed.
fn removal_actions(
    state: &HistoryState,
    removed: Vec<ClipboardItem>,
    reason: RemovalReason,
) -> Vec<HistoryAction> {
    if removed.is_empty() {
        return Vec::new();
    }
    let mut actions: Vec<HistoryAction> = removed
        .into_iter()
        .map(|item| HistoryAction::DeleteBlobs { item, reason })
        .collect();
    actions.push(persist(state));
    actions
}

fn insert_item(state: &mut HistoryState, item: ClipboardItem) -> Vec<HistoryAction> {
    if state.position(item.id()).is_some() {
        return Vec::new();
    }
    let id = item.id().clone();
    let thumbnail_source = item.pending_thumbnail_source().cloned();

    state.items.insert(0, item);
    sort_favorites_first(&mut state.items);
    let evicted = evict_over_capacity(&mut state.items, state.capacity);
    let inserted_survived = !evicted.iter().any(|e| e.id() == &id);

    let mut actions: Vec<HistoryAction> = evicted
        .into_iter()
        .map(|item| HistoryAction::DeleteBlobs {
            item,
            reason: RemovalReason::Evicted,
        })
        .collect();
    actions.push(persist(state));
    if let (true, Some(image)) = (inserted_survived, thumbnail_source) {
        actions.push(HistoryAction::GenerateThumbnail { id, image });
    }
    actions
}
