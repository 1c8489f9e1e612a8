use std::path::PathBuf;

use bytes::Bytes;
use clipboard_rs::{common::RustImage, Clipboard, ClipboardContext, ContentFormat, RustImageData};
use cs_core::ports::ClipboardAccessError;
use cs_core::{ClipboardContent, ClipboardObservation, FileReference};
use url::Url;

use super::signature::Fingerprint;

/// Shared clipboard-rs access used by every desktop platform.
pub struct CommonClipboardImpl;

type ClipboardRsResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn read_err<T>(result: ClipboardRsResult<T>) -> Result<T, ClipboardAccessError> {
    result.map_err(|e| ClipboardAccessError::ReadFailed(e.to_string()))
}

fn write_err<T>(result: ClipboardRsResult<T>) -> Result<T, ClipboardAccessError> {
    result.map_err(|e| ClipboardAccessError::WriteFailed(e.to_string()))
}

impl CommonClipboardImpl {
    /// Hash of everything the clipboard currently offers. Equal hashes mean
    /// equal content.
    ///
    /// Runs on every poll tick, so it only copies the raw platform buffers;
    /// images are never decoded or re-encoded here.
    pub fn fingerprint(ctx: &ClipboardContext) -> Result<blake3::Hash, ClipboardAccessError> {
        let mut formats = read_err(ctx.available_formats())?;
        formats.sort();

        let mut fingerprint = Fingerprint::new();
        for format in &formats {
            match ctx.get_buffer(format) {
                Ok(buffer) => fingerprint.add(format, &buffer),
                Err(_) => fingerprint.add(format, &[]),
            }
        }

        if ctx.has(ContentFormat::Text) {
            if let Ok(text) = ctx.get_text() {
                fingerprint.add("text", text.as_bytes());
            }
        }
        if ctx.has(ContentFormat::Files) {
            if let Ok(files) = ctx.get_files() {
                fingerprint.add("files", files.join("\n").as_bytes());
            }
        }

        Ok(fingerprint.finish())
    }

    pub fn read_observation(
        ctx: &ClipboardContext,
    ) -> Result<ClipboardObservation, ClipboardAccessError> {
        let mut observation = ClipboardObservation::empty();

        if ctx.has(ContentFormat::Text) {
            if let Ok(text) = ctx.get_text() {
                observation = ClipboardObservation::from_text(text);
            }
        }

        if ctx.has(ContentFormat::Files) {
            if let Ok(files) = ctx.get_files() {
                observation.file = files
                    .iter()
                    .find_map(|entry| parse_file_entry(entry))
                    .map(file_reference);
            }
        }

        observation.image = Self::read_png(ctx);
        Ok(observation)
    }

    pub fn write_content(
        ctx: &ClipboardContext,
        content: &ClipboardContent,
    ) -> Result<(), ClipboardAccessError> {
        match content {
            ClipboardContent::Text(text) => write_err(ctx.set_text(text.clone())),
            ClipboardContent::Url(url) => write_err(ctx.set_text(url.as_str().to_string())),
            ClipboardContent::Image(payload) => {
                let bytes = payload.image.as_ref().ok_or_else(|| {
                    ClipboardAccessError::Unsupported("image bytes are unavailable".into())
                })?;
                let image = write_err(RustImageData::from_bytes(bytes))?;
                write_err(ctx.set_image(image))
            }
            ClipboardContent::File(file) => {
                let location = file.location.as_deref().ok_or_else(|| {
                    ClipboardAccessError::Unsupported(format!(
                        "file `{}` has no location",
                        file.file_name
                    ))
                })?;
                let uri = Url::from_file_path(location).map_err(|_| {
                    ClipboardAccessError::Unsupported(format!(
                        "file location is not absolute: {}",
                        location.display()
                    ))
                })?;
                write_err(ctx.set_files(vec![uri.to_string()]))
            }
        }
    }

    fn read_png(ctx: &ClipboardContext) -> Option<Bytes> {
        if !ctx.has(ContentFormat::Image) {
            return None;
        }
        let image = ctx.get_image().ok()?;
        let png = image.to_png().ok()?;
        Some(Bytes::copy_from_slice(png.get_bytes()))
    }
}

/// Clipboard file entries are `file://` URIs on Linux and plain paths elsewhere.
pub(crate) fn parse_file_entry(entry: &str) -> Option<PathBuf> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }
    if entry.starts_with("file://") {
        return Url::parse(entry).ok()?.to_file_path().ok();
    }
    Some(PathBuf::from(entry))
}

fn file_reference(path: PathBuf) -> FileReference {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    let mut file = FileReference::new(name);
    if let Ok(meta) = std::fs::metadata(&path) {
        file = file.with_size(i64::try_from(meta.len()).unwrap_or(i64::MAX));
    }
    file.with_location(path)
}
