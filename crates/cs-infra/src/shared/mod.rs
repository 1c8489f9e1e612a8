mod shared_defaults;

pub use shared_defaults::{FileSharedDefaults, HistoryLimits, SharedDefaults};
