//! # Configuration DTO / 配置数据对象
//!
//! Plain data read from `config.toml`. Keys present in the file overlay a
//! base value (normally [`AppConfig::with_system_defaults`]); keys that are
//! missing or have the wrong type keep the base value. No validation happens
//! here.
//!
//! 仅包含数据：TOML 中存在的键覆盖基础值，缺失或类型不符的键保留基础值。

use std::path::{Path, PathBuf};

pub const DEFAULT_STORAGE_QUOTA_BYTES: u64 = 100 * 1024 * 1024;
pub const DEFAULT_FREE_MAX_ITEMS: u64 = 20;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_THUMBNAIL_MAX_EDGE: u32 = 200;

/// Application configuration DTO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the metadata document and blobs.
    pub storage_dir: PathBuf,

    /// Soft quota; exceeding it is logged, never enforced.
    pub storage_quota_bytes: u64,

    /// History capacity without a pro entitlement.
    pub free_max_items: u64,

    /// History capacity with a pro entitlement. `0` means unlimited.
    pub pro_max_items: u64,

    /// Clipboard polling period in milliseconds.
    pub poll_interval_ms: u64,

    /// Longest edge of generated thumbnails in pixels.
    pub thumbnail_max_edge: u32,

    /// JSON document shared with companion surfaces (widget, keyboard).
    pub shared_defaults_path: PathBuf,

    /// Directory for rolling log files.
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Overlay the keys present in `toml_value` onto `base`.
    ///
    /// 将 TOML 中存在的键覆盖到 `base` 上。
    pub fn from_toml(toml_value: &toml::Value, base: AppConfig) -> Self {
        let get = |section: &str, key: &str| toml_value.get(section).and_then(|s| s.get(key));
        let get_u64 = |section: &str, key: &str| {
            get(section, key)
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
        };
        let get_path =
            |section: &str, key: &str| get(section, key).and_then(|v| v.as_str()).map(PathBuf::from);

        Self {
            storage_dir: get_path("storage", "directory").unwrap_or(base.storage_dir),
            storage_quota_bytes: get_u64("storage", "quota_bytes")
                .unwrap_or(base.storage_quota_bytes),
            free_max_items: get_u64("history", "free_max_items").unwrap_or(base.free_max_items),
            pro_max_items: get_u64("history", "pro_max_items").unwrap_or(base.pro_max_items),
            poll_interval_ms: get_u64("watcher", "poll_interval_ms")
                .unwrap_or(base.poll_interval_ms),
            thumbnail_max_edge: get_u64("thumbnail", "max_edge")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(base.thumbnail_max_edge),
            shared_defaults_path: get_path("shared", "defaults_path")
                .unwrap_or(base.shared_defaults_path),
            log_dir: get_path("logging", "directory").unwrap_or(base.log_dir),
        }
    }

    /// Defaults rooted at `data_dir`, the platform application data directory
    /// computed by the caller.
    pub fn with_system_defaults(data_dir: &Path) -> Self {
        Self {
            storage_dir: data_dir.join("ClipboardHistory"),
            storage_quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
            free_max_items: DEFAULT_FREE_MAX_ITEMS,
            pro_max_items: 0,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            thumbnail_max_edge: DEFAULT_THUMBNAIL_MAX_EDGE,
            shared_defaults_path: data_dir.join("shared_defaults.json"),
            log_dir: data_dir.join("logs"),
        }
    }
}
