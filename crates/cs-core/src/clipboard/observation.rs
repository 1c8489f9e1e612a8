//! What the platform reports about the system clipboard.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use super::{FileReference, WebUrl};

/// Opaque counter that changes whenever the system clipboard changes.
///
/// Equal signatures mean "nothing new to capture".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ChangeSignature(u64);

impl ChangeSignature {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for ChangeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One read of the system clipboard.
///
/// The platform may expose several representations at once. Choosing which
/// one becomes the history item is the classifier's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardObservation {
    pub image: Option<Bytes>,
    pub file: Option<FileReference>,
    pub url: Option<WebUrl>,
    pub text: Option<String>,
}

impl ClipboardObservation {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Observation of a plain string. Web links are exposed as a URL as well.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            url: parse_web_url(&text),
            text: Some(text),
            ..Self::default()
        }
    }

    pub fn from_image(bytes: Bytes) -> Self {
        Self {
            image: Some(bytes),
            ..Self::default()
        }
    }

    pub fn from_file(file: FileReference) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.file.is_none() && self.url.is_none() && self.text.is_none()
    }
}

/// Parse `text` as an absolute http(s) link.
///
/// Only a single token with a host qualifies; prose that happens to contain a
/// link stays text.
pub fn parse_web_url(text: &str) -> Option<WebUrl> {
    WebUrl::parse(text)
}
