pub mod clipboard;
pub mod fs;
pub mod shared;
pub mod time;

pub use clipboard::InfraThumbnailGenerator;
pub use fs::FsHistoryStore;
pub use shared::{FileSharedDefaults, HistoryLimits, SharedDefaults};
pub use time::SystemClock;
