use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use cs_core::ports::{HistoryStorePort, StorageError, StorageUsage};
use cs_core::{ClipboardContent, ClipboardItem, ItemId};
use tokio::fs;
use tracing::{debug, warn};

use super::atomic_write::atomic_write;
use super::item_record::{is_plain_file_name, ItemRecord};

pub const METADATA_FILE_NAME: &str = "items.json";
const IMAGE_BLOB_SUFFIX: &str = "image";
const THUMBNAIL_BLOB_SUFFIX: &str = "thumbnail";

/// History storage in a single directory: one JSON metadata document plus
/// one blob file per image and thumbnail.
///
/// ```text
/// <root>/items.json
/// <root>/<item-id>_image
/// <root>/<item-id>_thumbnail
/// ```
///
/// Blobs are immutable per id, so a blob that already exists with the
/// expected length is not rewritten on save.
pub struct FsHistoryStore {
    root: PathBuf,
    quota_bytes: u64,
}

impl FsHistoryStore {
    pub fn new(root: impl Into<PathBuf>, quota_bytes: u64) -> Self {
        Self {
            root: root.into(),
            quota_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE_NAME)
    }

    fn blob_name(id: &ItemId, suffix: &str) -> String {
        format!("{}_{}", id, suffix)
    }

    async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::io(&self.root, e))
    }

    async fn write_blob(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.root.join(name);
        if let Ok(meta) = fs::metadata(&path).await {
            if meta.is_file() && meta.len() == bytes.len() as u64 {
                return Ok(());
            }
        }
        fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::io(&path, e))
    }

    async fn read_blob(&self, name: &str) -> Result<Bytes, StorageError> {
        if !is_plain_file_name(name) {
            return Err(StorageError::CorruptMetadata(format!(
                "blob reference `{name}` escapes the storage directory"
            )));
        }
        let path = self.root.join(name);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Bytes::from(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// A blob the item can live without. Failures are logged and the payload
    /// is left absent.
    async fn read_optional_blob(&self, item_id: &str, name: Option<&str>) -> Option<Bytes> {
        let name = name?;
        match self.read_blob(name).await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!(item_id, blob = name, error = %err, "blob unavailable, loading item without it");
                None
            }
        }
    }

    async fn remove_file(&self, path: &Path) -> Result<(), StorageError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    /// Write the blobs of `item` and point `record` at them.
    async fn persist_item(
        &self,
        item: &ClipboardItem,
        mut record: ItemRecord,
    ) -> Result<ItemRecord, StorageError> {
        if let ClipboardContent::Image(payload) = item.content() {
            if let Some(image) = &payload.image {
                let name = Self::blob_name(item.id(), IMAGE_BLOB_SUFFIX);
                self.write_blob(&name, image).await?;
                record.image_file_name = Some(name);
            }
            if let Some(thumbnail) = &payload.thumbnail {
                let name = Self::blob_name(item.id(), THUMBNAIL_BLOB_SUFFIX);
                self.write_blob(&name, thumbnail).await?;
                record.thumbnail_file_name = Some(name);
            }
        }
        Ok(record)
    }
}

#[async_trait]
impl HistoryStorePort for FsHistoryStore {
    async fn save(&self, items: &[ClipboardItem]) -> Result<(), StorageError> {
        self.ensure_root().await?;

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match ItemRecord::from_item(item) {
                Ok(record) => records.push(self.persist_item(item, record).await?),
                Err(err) => {
                    warn!(item_id = %item.id(), error = %err, "skipping item that cannot be recorded");
                }
            }
        }

        let document = serde_json::to_vec_pretty(&records)
            .map_err(|e| StorageError::CorruptMetadata(format!("serialize failed: {e}")))?;
        let path = self.metadata_path();
        atomic_write(&path, &document)
            .await
            .map_err(|e| StorageError::io(&path, e))?;

        debug!(items = items.len(), "history saved");
        Ok(())
    }

    async fn load(&self) -> Result<Vec<ClipboardItem>, StorageError> {
        let path = self.metadata_path();
        let document = match fs::read(&path).await {
            Ok(document) => document,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        let records: Vec<ItemRecord> = serde_json::from_slice(&document)
            .map_err(|e| StorageError::CorruptMetadata(e.to_string()))?;

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            if !is_plain_file_name(&record.id) {
                warn!(item_id = %record.id, "skipping record with unusable id");
                continue;
            }
            if !seen.insert(record.id.clone()) {
                warn!(item_id = %record.id, "skipping duplicate record");
                continue;
            }

            let image = self
                .read_optional_blob(&record.id, record.image_file_name.as_deref())
                .await;
            let thumbnail = self
                .read_optional_blob(&record.id, record.thumbnail_file_name.as_deref())
                .await;

            let item_id = record.id.clone();
            match record.into_item(image, thumbnail) {
                Ok(item) => items.push(item),
                Err(err) => warn!(item_id = %item_id, error = %err, "skipping unreadable record"),
            }
        }

        debug!(items = items.len(), "history loaded");
        Ok(items)
    }

    async fn delete_item(&self, item: &ClipboardItem) -> Result<(), StorageError> {
        if !matches!(item.content(), ClipboardContent::Image(_)) {
            return Ok(());
        }
        for suffix in [IMAGE_BLOB_SUFFIX, THUMBNAIL_BLOB_SUFFIX] {
            let path = self.root.join(Self::blob_name(item.id(), suffix));
            self.remove_file(&path).await?;
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StorageError::io(&self.root, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(&self.root, e))?
        {
            let path = entry.path();
            let is_dir = entry
                .file_type()
                .await
                .map_err(|e| StorageError::io(&path, e))?
                .is_dir();
            if is_dir {
                fs::remove_dir_all(&path)
                    .await
                    .map_err(|e| StorageError::io(&path, e))?;
            } else {
                self.remove_file(&path).await?;
            }
        }
        Ok(())
    }

    async fn usage(&self) -> Result<StorageUsage, StorageError> {
        let mut total_bytes = 0u64;
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => Some(entries),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(StorageError::io(&self.root, e)),
        };

        if let Some(entries) = entries.as_mut() {
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| StorageError::io(&self.root, e))?
            {
                let meta = entry
                    .metadata()
                    .await
                    .map_err(|e| StorageError::io(entry.path(), e))?;
                if meta.is_file() {
                    total_bytes += meta.len();
                }
            }
        }

        Ok(StorageUsage {
            total_bytes,
            quota_bytes: self.quota_bytes,
        })
    }
}
