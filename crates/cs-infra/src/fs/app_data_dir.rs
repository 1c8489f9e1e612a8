use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "ClipStash";

/// Get the ClipStash application data root directory.
///
/// 获取 ClipStash 应用数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/ClipStash
/// - Windows: %APPDATA%\ClipStash
/// - Linux: $XDG_DATA_HOME/ClipStash or ~/.local/share/ClipStash
///
/// The directory is not created here; the storage engine creates what it
/// needs on first write.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

/// Default location of `config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("config.toml"))
}

fn platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME wins over ~/.local/share
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to determine the user data directory"))
}
