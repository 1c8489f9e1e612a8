//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on `cs-infra`, `cs-platform` and `cs-app`
//! together. It assembles; it does not decide.
//!
//! 仅负责组装，不做业务决策。

use std::sync::Arc;
use std::time::Duration;

use cs_app::{HistoryController, HistoryDeps};
use async_trait::async_trait;
use cs_core::ports::{
    ClipboardAccessError, ClipboardReaderPort, ClipboardWriterPort, WatcherControlError,
    WatcherControlPort,
};
use cs_core::{AppConfig, ChangeSignature, ClipboardContent, ClipboardObservation};
use cs_infra::{
    FileSharedDefaults, FsHistoryStore, HistoryLimits, InfraThumbnailGenerator, SystemClock,
};
use cs_platform::adapters::InMemoryWatcherControl;
use cs_platform::clipboard::LocalClipboard;
use cs_platform::runtime::{command_channel, PlatformCommandSender, PlatformRuntime};
use tracing::debug;

pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("clipboard initialization failed: {0}")]
    ClipboardInit(#[from] ClipboardAccessError),
}

/// Fully assembled daemon.
pub struct WiredDaemon {
    pub controller: HistoryController,
    /// Must be started by the caller; it exits on `Shutdown`.
    pub runtime: PlatformRuntime,
    pub command_tx: PlatformCommandSender,
}

pub fn build_history_store(config: &AppConfig) -> Arc<FsHistoryStore> {
    Arc::new(FsHistoryStore::new(
        config.storage_dir.clone(),
        config.storage_quota_bytes,
    ))
}

pub fn build_shared_defaults(config: &AppConfig) -> Arc<FileSharedDefaults> {
    Arc::new(FileSharedDefaults::new(
        config.shared_defaults_path.clone(),
        HistoryLimits::from_config(config),
    ))
}

/// Controller over the configured store, entitlement and thumbnailer.
pub fn wire_history(
    config: &AppConfig,
    clipboard_reader: Arc<dyn ClipboardReaderPort>,
    clipboard_writer: Arc<dyn ClipboardWriterPort>,
    watcher_control: Arc<dyn WatcherControlPort>,
) -> HistoryController {
    HistoryController::new(HistoryDeps {
        store: build_history_store(config),
        clipboard_reader,
        clipboard_writer,
        watcher_control,
        thumbnails: Arc::new(InfraThumbnailGenerator::new(config.thumbnail_max_edge)),
        entitlement: build_shared_defaults(config),
        clock: Arc::new(SystemClock),
    })
}

/// Controller for one-shot edits (favorite, delete) that never touch the
/// system clipboard and never monitor.
pub fn wire_offline_history(config: &AppConfig) -> HistoryController {
    let detached = Arc::new(Detached);
    wire_history(config, detached.clone(), detached.clone(), detached)
}

/// Controller that can write to the system clipboard but does not monitor.
pub fn wire_paste_history(config: &AppConfig) -> WiringResult<HistoryController> {
    let clipboard = Arc::new(LocalClipboard::new()?);
    Ok(wire_history(
        config,
        clipboard.clone(),
        clipboard,
        Arc::new(Detached),
    ))
}

/// Wire the controller to the system clipboard and the platform runtime.
///
/// The controller sends watcher commands through the channel; the runtime
/// calls back into the controller on every poll.
pub fn wire_daemon(config: &AppConfig) -> WiringResult<WiredDaemon> {
    let clipboard = Arc::new(LocalClipboard::new()?);
    let (command_tx, command_rx) = command_channel();

    let controller = wire_history(
        config,
        clipboard.clone(),
        clipboard,
        Arc::new(InMemoryWatcherControl::new(command_tx.clone())),
    );

    let poll_interval = Duration::from_millis(config.poll_interval_ms.max(1));
    let runtime = PlatformRuntime::new(command_rx, Arc::new(controller.clone()), poll_interval);
    debug!(
        storage_dir = %config.storage_dir.display(),
        poll_interval_ms = poll_interval.as_millis() as u64,
        "daemon wired"
    );

    Ok(WiredDaemon {
        controller,
        runtime,
        command_tx,
    })
}

/// Stand-in for the clipboard and watcher in processes that only edit the
/// stored history.
struct Detached;

impl ClipboardReaderPort for Detached {
    fn change_signature(&self) -> Result<ChangeSignature, ClipboardAccessError> {
        Err(ClipboardAccessError::Unavailable("no clipboard in this process".into()))
    }

    fn read_observation(&self) -> Result<ClipboardObservation, ClipboardAccessError> {
        Err(ClipboardAccessError::Unavailable("no clipboard in this process".into()))
    }
}

impl ClipboardWriterPort for Detached {
    fn write_content(&self, _content: &ClipboardContent) -> Result<(), ClipboardAccessError> {
        Err(ClipboardAccessError::Unavailable("no clipboard in this process".into()))
    }
}

#[async_trait]
impl WatcherControlPort for Detached {
    async fn start_watcher(&self) -> Result<(), WatcherControlError> {
        Err(WatcherControlError::RuntimeGone)
    }

    async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
        Ok(())
    }
}
