//! Port interfaces for the application layer
//!
//! Ports are the contract between the history controller and the adapters
//! in `cs-infra` and `cs-platform`. Everything here is implemented outside
//! the core and injected as `Arc<dyn Port>`.

mod clipboard_change_handler;
mod clock;
mod entitlement;
pub mod errors;
mod history_store;
mod system_clipboard;
mod thumbnail_generator;
mod watcher_control;
mod widget_access;

pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::ClockPort;
pub use entitlement::EntitlementPort;
pub use errors::StorageError;
pub use history_store::{HistoryStorePort, StorageUsage};
pub use system_clipboard::{ClipboardAccessError, ClipboardReaderPort, ClipboardWriterPort};
pub use thumbnail_generator::{GeneratedThumbnail, ThumbnailGeneratorPort};
pub use watcher_control::{WatcherControlError, WatcherControlPort};
pub use widget_access::WidgetAccessPort;
