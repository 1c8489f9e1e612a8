use std::path::PathBuf;

use thiserror::Error;

/// Failure of the history storage engine.
///
/// 历史存储引擎错误。
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed at {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("metadata document is corrupt: {0}")]
    CorruptMetadata(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoFailure {
            path: path.into(),
            source,
        }
    }
}
