//! History item model.
//!
//! 剪贴板历史条目模型。

use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use super::{TimestampMs, WebUrl};
use crate::ids::ItemId;

/// Kind tag of a history item, also used as the persisted `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    Image,
    Url,
    File,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Image => "image",
            ItemKind::Url => "url",
            ItemKind::File => "file",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image bytes and an optional downscaled preview.
///
/// Either side may be absent after a partial blob read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePayload {
    pub image: Option<Bytes>,
    pub thumbnail: Option<Bytes>,
}

impl ImagePayload {
    pub fn new(image: Bytes) -> Self {
        Self {
            image: Some(image),
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: Bytes) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn byte_len(&self) -> i64 {
        self.image.as_ref().map(|b| b.len() as i64).unwrap_or(0)
    }
}

/// A file captured from the clipboard by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub file_name: String,
    pub file_size: Option<i64>,
    pub location: Option<PathBuf>,
}

impl FileReference {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_size: None,
            location: None,
        }
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.file_size = Some(size);
        self
    }

    pub fn with_location(mut self, location: PathBuf) -> Self {
        self.location = Some(location);
        self
    }
}

/// Payload of a history item. Exactly one variant is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    Text(String),
    Image(ImagePayload),
    Url(WebUrl),
    File(FileReference),
}

impl ClipboardContent {
    pub fn kind(&self) -> ItemKind {
        match self {
            ClipboardContent::Text(_) => ItemKind::Text,
            ClipboardContent::Image(_) => ItemKind::Image,
            ClipboardContent::Url(_) => ItemKind::Url,
            ClipboardContent::File(_) => ItemKind::File,
        }
    }

    /// String used for list rendering and search.
    pub fn display_text(&self) -> String {
        match self {
            ClipboardContent::Text(text) => text.clone(),
            ClipboardContent::Image(_) => "Image".to_string(),
            ClipboardContent::Url(url) => url.as_str().to_string(),
            ClipboardContent::File(file) => file.file_name.clone(),
        }
    }

    /// Text matched by history search. Images are never matched by a query.
    pub fn searchable_text(&self) -> Option<&str> {
        match self {
            ClipboardContent::Text(text) => Some(text),
            ClipboardContent::Image(_) => None,
            ClipboardContent::Url(url) => Some(url.as_str()),
            ClipboardContent::File(file) => Some(&file.file_name),
        }
    }

    /// Approximate payload size.
    ///
    /// Text counts UTF-8 bytes, images count the full-size bytes, URLs count
    /// the copied string and files report their recorded size.
    pub fn size_in_bytes(&self) -> i64 {
        match self {
            ClipboardContent::Text(text) => text.len() as i64,
            ClipboardContent::Image(payload) => payload.byte_len(),
            ClipboardContent::Url(url) => url.as_str().len() as i64,
            ClipboardContent::File(file) => file.file_size.unwrap_or(0),
        }
    }
}

/// One entry of the clipboard history.
///
/// `id`, `timestamp` and `content` are fixed at creation. Only the favorite
/// flag and a late-arriving image thumbnail change afterwards, and only through
/// the history state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    id: ItemId,
    timestamp: TimestampMs,
    content: ClipboardContent,
    is_favorite: bool,
}

impl ClipboardItem {
    /// Create a freshly captured, non-favorite item.
    pub fn new(content: ClipboardContent, timestamp: TimestampMs) -> Self {
        Self {
            id: ItemId::new(),
            timestamp,
            content,
            is_favorite: false,
        }
    }

    /// Rebuild an item from persisted fields.
    pub fn restore(
        id: ItemId,
        timestamp: TimestampMs,
        content: ClipboardContent,
        is_favorite: bool,
    ) -> Self {
        Self {
            id,
            timestamp,
            content,
            is_favorite,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn timestamp(&self) -> TimestampMs {
        self.timestamp
    }

    pub fn content(&self) -> &ClipboardContent {
        &self.content
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn kind(&self) -> ItemKind {
        self.content.kind()
    }

    pub fn display_text(&self) -> String {
        self.content.display_text()
    }

    pub fn size_in_bytes(&self) -> i64 {
        self.content.size_in_bytes()
    }

    pub(crate) fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }

    /// Full-size image bytes still waiting for a thumbnail, if any.
    pub fn pending_thumbnail_source(&self) -> Option<&Bytes> {
        match &self.content {
            ClipboardContent::Image(ImagePayload {
                image: Some(image),
                thumbnail: None,
            }) => Some(image),
            _ => None,
        }
    }

    /// Attach a generated thumbnail. Returns `false` when the item is not an
    /// image or already carries one.
    pub(crate) fn attach_thumbnail(&mut self, thumbnail: Bytes) -> bool {
        match &mut self.content {
            ClipboardContent::Image(payload) if payload.thumbnail.is_none() => {
                payload.thumbnail = Some(thumbnail);
                true
            }
            _ => false,
        }
    }
}
