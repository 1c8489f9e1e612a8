use crate::clipboard::{ChangeSignature, ClipboardItem, TimestampMs};
use crate::ids::ItemId;

use super::search::filter_items;

/// Capacity of the free tier.
pub const DEFAULT_CAPACITY: usize = 20;

/// Whether the clipboard watcher is supposed to be running.
///
/// 剪贴板监听状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitoringState {
    #[default]
    Stopped,
    Monitoring,
}

/// In-memory history owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    /// Favorites first, newest first. Never longer than `capacity`.
    pub items: Vec<ClipboardItem>,
    pub monitoring: MonitoringState,
    /// Signature of the last clipboard change that was consumed.
    pub last_observed_signature: Option<ChangeSignature>,
    /// Host application is in the foreground.
    pub is_host_active: bool,
    /// User opted into capturing while the host is in the background.
    pub background_monitoring: bool,
    pub search_text: String,
    pub capacity: usize,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            monitoring: MonitoringState::Stopped,
            last_observed_signature: None,
            is_host_active: true,
            background_monitoring: false,
            search_text: String::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl HistoryState {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            ..Self::default()
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring == MonitoringState::Monitoring
    }

    /// Clipboard signals are consumed only while monitoring and while the host
    /// is active or background capture is enabled.
    pub fn accepts_signals(&self) -> bool {
        self.is_monitoring() && (self.is_host_active || self.background_monitoring)
    }

    pub fn find(&self, id: &ItemId) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Most recently created item regardless of favorite status.
    pub fn newest(&self) -> Option<&ClipboardItem> {
        self.items.iter().max_by_key(|item| item.timestamp())
    }

    /// Timestamp for a new capture: `now`, bumped past the newest item so
    /// capture order survives a coarse or skewed clock.
    pub fn next_timestamp(&self, now: TimestampMs) -> TimestampMs {
        match self.newest() {
            Some(newest) if newest.timestamp() >= now => newest.timestamp().successor(),
            _ => now,
        }
    }

    /// Items visible under the current search text.
    pub fn visible_items(&self) -> Vec<&ClipboardItem> {
        filter_items(&self.items, &self.search_text)
    }
}
