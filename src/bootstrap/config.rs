//! # Configuration Loader / 配置加载器
//!
//! Reads `config.toml` and overlays it on the system defaults. Resolution
//! order: an explicit `--config` path, then `<data_dir>/config.toml` when it
//! exists, then the defaults alone.
//!
//! No validation happens here; the values are facts handed to wiring.

use std::path::{Path, PathBuf};

use cs_core::AppConfig;
use cs_infra::fs::app_data_dir;

/// Name of the config file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to determine the application data directory: {0}")]
    DataDir(String),

    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load `path` and overlay it on `base`.
///
/// 读取 TOML 文件并覆盖到 `base` 上。
pub fn load_config(path: &Path, base: AppConfig) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let toml_value: toml::Value = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(AppConfig::from_toml(&toml_value, base))
}

/// Resolve the configuration rooted at the platform data directory.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let data_dir = app_data_dir().map_err(|e| ConfigError::DataDir(format!("{e:#}")))?;
    resolve_config_in(&data_dir, explicit)
}

/// Resolve the configuration for an explicit data directory.
///
/// An explicit path must exist; the implicit `config.toml` is optional.
pub fn resolve_config_in(
    data_dir: &Path,
    explicit: Option<&Path>,
) -> Result<AppConfig, ConfigError> {
    let base = AppConfig::with_system_defaults(data_dir);
    match explicit {
        Some(path) => load_config(path, base),
        None => {
            let implicit = data_dir.join(CONFIG_FILE_NAME);
            if implicit.is_file() {
                load_config(&implicit, base)
            } else {
                Ok(base)
            }
        }
    }
}
