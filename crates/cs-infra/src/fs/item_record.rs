//! On-disk representation of one history item.
//!
//! The metadata document is a JSON array of these records. Images are not
//! inlined; the record names the blob files that hold them.

use std::path::{Component, Path};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use cs_core::{
    ClipboardContent, ClipboardItem, FileReference, ImagePayload, ItemId, ItemKind, TimestampMs,
    WebUrl,
};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("{kind} record is missing `{field}`")]
    MissingField {
        kind: ItemKind,
        field: &'static str,
    },

    #[error("invalid url `{0}`")]
    InvalidUrl(String),

    #[error("timestamp {0}ms is out of range")]
    TimestampOutOfRange(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_file_name: Option<String>,
}

impl ItemRecord {
    /// Record for `item` without blob references; the store fills those in
    /// after writing the blobs.
    pub fn from_item(item: &ClipboardItem) -> Result<Self, RecordError> {
        let millis = item.timestamp().as_millis();
        let timestamp = DateTime::from_timestamp_millis(millis)
            .ok_or(RecordError::TimestampOutOfRange(millis))?;
        let mut record = Self {
            id: item.id().as_str().to_string(),
            timestamp,
            kind: item.kind(),
            is_favorite: item.is_favorite(),
            text_content: None,
            url: None,
            file_name: None,
            file_size: None,
            file_url: None,
            image_file_name: None,
            thumbnail_file_name: None,
        };

        match item.content() {
            ClipboardContent::Text(text) => record.text_content = Some(text.clone()),
            ClipboardContent::Url(url) => record.url = Some(url.as_str().to_string()),
            ClipboardContent::File(file) => {
                record.file_name = Some(file.file_name.clone());
                record.file_size = file.file_size;
                record.file_url = file
                    .location
                    .as_deref()
                    .and_then(|path| Url::from_file_path(path).ok())
                    .map(String::from);
            }
            ClipboardContent::Image(_) => {}
        }
        Ok(record)
    }

    /// Rebuild the item, given whatever image blobs could be read.
    pub fn into_item(
        self,
        image: Option<Bytes>,
        thumbnail: Option<Bytes>,
    ) -> Result<ClipboardItem, RecordError> {
        let kind = self.kind;
        let content = match kind {
            ItemKind::Text => ClipboardContent::Text(self.text_content.ok_or(
                RecordError::MissingField {
                    kind,
                    field: "textContent",
                },
            )?),
            ItemKind::Url => {
                let raw = self.url.ok_or(RecordError::MissingField { kind, field: "url" })?;
                let url = WebUrl::parse(&raw).ok_or(RecordError::InvalidUrl(raw))?;
                ClipboardContent::Url(url)
            }
            ItemKind::File => {
                let file_name = self.file_name.ok_or(RecordError::MissingField {
                    kind,
                    field: "fileName",
                })?;
                ClipboardContent::File(FileReference {
                    file_name,
                    file_size: self.file_size,
                    location: self
                        .file_url
                        .as_deref()
                        .and_then(|raw| Url::parse(raw).ok())
                        .and_then(|url| url.to_file_path().ok()),
                })
            }
            ItemKind::Image => ClipboardContent::Image(ImagePayload { image, thumbnail }),
        };

        Ok(ClipboardItem::restore(
            ItemId::from_string(self.id),
            TimestampMs::from_epoch_millis(self.timestamp.timestamp_millis()),
            content,
            self.is_favorite,
        ))
    }
}

/// Whether `name` can be used as a single file name inside the store root.
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
