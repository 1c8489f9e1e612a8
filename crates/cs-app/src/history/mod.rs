//! History orchestration: the serialized controller and its ordered
//! persistence worker.

mod controller;
mod persistence;

pub use controller::{CopyToClipboardError, HistoryController};
pub use persistence::PersistenceQueue;
