use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Temp file next to `path`, e.g. `items.json` -> `items.json.tmp`.
pub(crate) fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("document"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `content` so that readers observe either the previous
/// file or the complete new one.
pub(crate) async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }

    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, content).await?;
    // Windows rename over an existing file may not be atomic; macOS/Linux are.
    fs::rename(&tmp_path, path).await
}
