//! # cs-core
//!
//! Core domain models and history logic for ClipStash.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod clipboard;
pub mod config;
pub mod history;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{
    ChangeSignature, ClipboardContent, ClipboardItem, ClipboardObservation, FileReference,
    ImagePayload, ItemKind, TimestampMs, WebUrl,
};
pub use config::AppConfig;
pub use history::{HistorySnapshot, HistoryState};
pub use ids::ItemId;
