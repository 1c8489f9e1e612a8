mod classify;
mod item;
mod observation;
mod timestamp;
mod web_url;

pub use classify::classify;
pub use item::{ClipboardContent, ClipboardItem, FileReference, ImagePayload, ItemKind};
pub use observation::{parse_web_url, ChangeSignature, ClipboardObservation};
pub use timestamp::TimestampMs;
pub use web_url::WebUrl;
