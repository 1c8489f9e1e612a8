//! Business logic use cases
//! 业务用例
//!
//! The history controller owns live state. The use cases here either wrap it
//! (monitoring) or read storage directly for surfaces that run without a
//! controller (widget, keyboard, CLI).

pub mod clear_persisted_history;
pub mod list_history_items;
pub mod list_keyboard_items;
pub mod load_widget_items;
pub mod monitoring;
pub mod report_storage_usage;

#[cfg(test)]
pub(crate) mod test_support;

pub use clear_persisted_history::ClearPersistedHistory;
pub use list_history_items::ListHistoryItems;
pub use list_keyboard_items::ListKeyboardItems;
pub use load_widget_items::LoadWidgetItems;
pub use monitoring::{StartMonitoring, StopMonitoring};
pub use report_storage_usage::ReportStorageUsage;

/// Items shown by the widget and the keyboard extension.
pub const COMPANION_ITEM_LIMIT: usize = 10;
