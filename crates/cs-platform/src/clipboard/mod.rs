mod common;
mod local_clipboard;
mod signature;
pub mod watcher;

pub use local_clipboard::LocalClipboard;
pub use signature::SignatureTracker;
pub use watcher::ClipboardWatcher;
