//! System clipboard access.

use thiserror::Error;

use crate::clipboard::{ChangeSignature, ClipboardContent, ClipboardObservation};

#[derive(Debug, Error)]
pub enum ClipboardAccessError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("failed to write clipboard: {0}")]
    WriteFailed(String),

    #[error("content cannot be written to the clipboard: {0}")]
    Unsupported(String),
}

/// Read side of the system clipboard.
///
/// 系统剪贴板读取端口。
pub trait ClipboardReaderPort: Send + Sync {
    /// Current change signature. Cheap enough to call on every poll tick.
    fn change_signature(&self) -> Result<ChangeSignature, ClipboardAccessError>;

    /// Read every representation the clipboard currently offers.
    fn read_observation(&self) -> Result<ClipboardObservation, ClipboardAccessError>;
}

/// Write side of the system clipboard.
///
/// 系统剪贴板写入端口。
pub trait ClipboardWriterPort: Send + Sync {
    /// Replace the clipboard with `content`.
    fn write_content(&self, content: &ClipboardContent) -> Result<(), ClipboardAccessError>;
}
