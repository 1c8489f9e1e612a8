//! Observation → content classification.
//!
//! 将一次剪贴板读取结果映射为历史条目内容。
//!
//! Priority is fixed: image, then file, then URL, then text. An observation
//! with nothing usable is a skip, not an error.

use super::{ClipboardContent, ClipboardObservation, ImagePayload};

/// Pick the single representation that becomes the history item.
///
/// Returns `None` when the clipboard holds nothing capturable: no
/// representation at all, an empty image, a file without a name, or a string
/// that is empty after trimming.
pub fn classify(observation: ClipboardObservation) -> Option<ClipboardContent> {
    let ClipboardObservation {
        image,
        file,
        url,
        text,
    } = observation;

    if let Some(bytes) = image.filter(|b| !b.is_empty()) {
        return Some(ClipboardContent::Image(ImagePayload::new(bytes)));
    }
    if let Some(file) = file.filter(|f| !f.file_name.trim().is_empty()) {
        return Some(ClipboardContent::File(file));
    }
    if let Some(url) = url {
        return Some(ClipboardContent::Url(url));
    }
    text.filter(|t| !t.trim().is_empty())
        .map(ClipboardContent::Text)
}
