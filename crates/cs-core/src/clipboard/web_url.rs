//! Web links captured from the clipboard.

use url::Url;

/// An absolute http(s) link, kept exactly as it was copied.
///
/// `Url` normalizes on parse (lowercased host, trailing slash on an empty
/// path), so the parsed form is only used for validation and inspection.
/// Display, search, persistence and paste all use the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebUrl {
    raw: String,
    parsed: Url,
}

impl WebUrl {
    /// Accept `text` if it is a single http(s) token with a host.
    ///
    /// Surrounding whitespace is dropped; prose that happens to contain a
    /// link is rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let candidate = text.trim();
        if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
            return None;
        }
        let parsed = Url::parse(candidate).ok()?;
        match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => Some(Self {
                raw: candidate.to_string(),
                parsed,
            }),
            _ => None,
        }
    }

    /// The link as the user copied it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Normalized form.
    pub fn url(&self) -> &Url {
        &self.parsed
    }

    pub fn host_str(&self) -> Option<&str> {
        self.parsed.host_str()
    }
}

impl std::fmt::Display for WebUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
