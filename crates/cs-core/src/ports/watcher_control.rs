use async_trait::async_trait;

/// Port for controlling the clipboard watcher lifecycle.
///
/// 剪贴板监听器生命周期控制端口。
///
/// Both calls only enqueue a request for the platform runtime and must be
/// idempotent. A stop never interrupts a change signal that is already being
/// handled.
#[async_trait]
pub trait WatcherControlPort: Send + Sync {
    async fn start_watcher(&self) -> Result<(), WatcherControlError>;

    async fn stop_watcher(&self) -> Result<(), WatcherControlError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WatcherControlError {
    #[error("platform runtime rejected `{command}`: {reason}")]
    CommandRejected {
        command: &'static str,
        reason: String,
    },

    #[error("platform runtime is no longer running")]
    RuntimeGone,
}
