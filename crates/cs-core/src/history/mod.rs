//! Clipboard history: ordering, search and the pure state machine.

mod ordering;
mod search;
mod snapshot;
mod state;
mod state_machine;

pub use ordering::{evict_over_capacity, is_favorites_first, sort_favorites_first};
pub use search::filter_items;
pub use snapshot::HistorySnapshot;
pub use state::{HistoryState, MonitoringState, DEFAULT_CAPACITY};
pub use state_machine::{HistoryAction, HistoryEvent, HistoryStateMachine, RemovalReason};
