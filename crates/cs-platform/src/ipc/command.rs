/// Requests handled by the platform runtime loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCommand {
    /// 启动剪贴板监听器
    StartClipboardWatcher,
    /// 停止剪贴板监听器
    StopClipboardWatcher,
    /// 关闭
    Shutdown,
}

impl PlatformCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PlatformCommand::StartClipboardWatcher => "start_clipboard_watcher",
            PlatformCommand::StopClipboardWatcher => "stop_clipboard_watcher",
            PlatformCommand::Shutdown => "shutdown",
        }
    }
}
