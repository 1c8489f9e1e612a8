//! # History Dependencies / 历史依赖
//!
//! Parameter grouping for [`crate::HistoryController`] construction. Every
//! port is required; there are no defaults and no build steps.

use std::sync::Arc;

use cs_core::ports::*;

/// Ports the history controller drives.
///
/// 历史控制器依赖的端口集合。
pub struct HistoryDeps {
    // Storage / 存储
    pub store: Arc<dyn HistoryStorePort>,

    // Clipboard / 剪贴板
    pub clipboard_reader: Arc<dyn ClipboardReaderPort>,
    pub clipboard_writer: Arc<dyn ClipboardWriterPort>,
    pub watcher_control: Arc<dyn WatcherControlPort>,
    pub thumbnails: Arc<dyn ThumbnailGeneratorPort>,

    // Entitlement / 权益
    pub entitlement: Arc<dyn EntitlementPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
}
