pub mod app_data_dir;
pub(crate) mod atomic_write;
pub mod history_store;
pub mod item_record;

pub use app_data_dir::{app_data_dir, default_config_path};
pub use history_store::FsHistoryStore;
