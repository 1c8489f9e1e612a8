//! Clipboard change handler port
//!
//! Callback interface the platform watcher uses to report that the clipboard
//! may have changed. The platform layer depends on this abstraction; the app
//! layer implements it.

use anyhow::Result;

/// Callback handler for clipboard change signals.
///
/// The signal carries no payload. The handler decides, under its own
/// serialization, whether the clipboard actually changed and what to read.
#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    async fn on_clipboard_changed(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    #[async_trait::async_trait]
    impl ClipboardChangeHandler for Noop {
        async fn on_clipboard_changed(&self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_clipboard_change_handler_is_object_safe() {
        let handler: std::sync::Arc<dyn ClipboardChangeHandler> = std::sync::Arc::new(Noop);
        assert!(handler.on_clipboard_changed().await.is_ok());
    }
}
