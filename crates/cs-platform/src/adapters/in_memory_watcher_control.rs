use tokio::sync::mpsc::error::TrySendError;
use cs_core::ports::{WatcherControlError, WatcherControlPort};

use crate::ipc::PlatformCommand;
use crate::runtime::PlatformCommandSender;

/// In-process watcher control.
///
/// 内存版的剪贴板监听器控制实现。
///
/// Commands are queued without waiting, so callers holding the history lock
/// never block on the runtime loop.
pub struct InMemoryWatcherControl {
    cmd_tx: PlatformCommandSender,
}

impl InMemoryWatcherControl {
    pub fn new(cmd_tx: PlatformCommandSender) -> Self {
        Self { cmd_tx }
    }

    fn send(&self, command: PlatformCommand) -> Result<(), WatcherControlError> {
        self.cmd_tx.try_send(command).map_err(|err| match err {
            TrySendError::Closed(_) => WatcherControlError::RuntimeGone,
            TrySendError::Full(_) => WatcherControlError::CommandRejected {
                command: command.name(),
                reason: "command queue is full".to_string(),
            },
        })
    }
}

#[async_trait::async_trait]
impl WatcherControlPort for InMemoryWatcherControl {
    async fn start_watcher(&self) -> Result<(), WatcherControlError> {
        self.send(PlatformCommand::StartClipboardWatcher)
    }

    async fn stop_watcher(&self) -> Result<(), WatcherControlError> {
        self.send(PlatformCommand::StopClipboardWatcher)
    }
}
