//! ClipStash application orchestration layer
//!
//! Owns the live clipboard history and the use cases host surfaces call.

pub mod deps;
pub mod history;
pub mod usecases;

pub use deps::HistoryDeps;
pub use history::{CopyToClipboardError, HistoryController};
