use std::sync::Arc;
use std::time::Duration;

use cs_core::ports::ClipboardChangeHandler;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

use super::event_bus::PlatformCommandReceiver;
use crate::clipboard::ClipboardWatcher;
use crate::ipc::PlatformCommand;

/// Owns the clipboard watcher task and applies lifecycle commands in the
/// order they were sent.
pub struct PlatformRuntime {
    command_rx: PlatformCommandReceiver,
    clipboard_handler: Arc<dyn ClipboardChangeHandler>,
    poll_interval: Duration,
    watcher_token: Option<CancellationToken>,
    tasks: TaskTracker,
    shutting_down: bool,
}

impl PlatformRuntime {
    pub fn new(
        command_rx: PlatformCommandReceiver,
        clipboard_handler: Arc<dyn ClipboardChangeHandler>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            command_rx,
            clipboard_handler,
            poll_interval,
            watcher_token: None,
            tasks: TaskTracker::new(),
            shutting_down: false,
        }
    }

    pub fn is_watcher_running(&self) -> bool {
        self.watcher_token.is_some()
    }

    /// Run until `Shutdown` arrives or every command sender is dropped.
    ///
    /// On exit the watcher is cancelled and its last in-flight signal is
    /// awaited.
    pub async fn start(mut self) {
        info!("Platform runtime started");
        while !self.shutting_down {
            match self.command_rx.recv().await {
                Some(command) => self.handle_command(command),
                None => break,
            }
        }

        self.stop_clipboard_watcher();
        self.tasks.close();
        self.tasks.wait().await;
        info!("Platform runtime stopped");
    }

    fn handle_command(&mut self, command: PlatformCommand) {
        debug!(command = command.name(), "platform command received");
        match command {
            PlatformCommand::StartClipboardWatcher => self.start_clipboard_watcher(),
            PlatformCommand::StopClipboardWatcher => self.stop_clipboard_watcher(),
            PlatformCommand::Shutdown => {
                self.shutting_down = true;
                info!("Platform runtime shutting down");
            }
        }
    }

    fn start_clipboard_watcher(&mut self) {
        if self.watcher_token.is_some() {
            debug!("Clipboard watcher already running, skipping start");
            return;
        }

        let token = CancellationToken::new();
        let watcher = ClipboardWatcher::new(self.clipboard_handler.clone(), self.poll_interval);
        self.tasks.spawn(watcher.run(token.clone()));
        self.watcher_token = Some(token);
    }

    fn stop_clipboard_watcher(&mut self) {
        match self.watcher_token.take() {
            Some(token) => {
                token.cancel();
                info!("Clipboard watcher stopped");
            }
            None => debug!("Clipboard watcher already stopped"),
        }
    }
}
