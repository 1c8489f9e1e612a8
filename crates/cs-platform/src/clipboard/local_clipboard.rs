use std::sync::Mutex;

use clipboard_rs::ClipboardContext;
use cs_core::ports::{ClipboardAccessError, ClipboardReaderPort, ClipboardWriterPort};
use cs_core::{ChangeSignature, ClipboardContent, ClipboardObservation};
use tracing::{debug, debug_span};

use super::common::CommonClipboardImpl;
use super::signature::SignatureTracker;

/// System clipboard backed by clipboard-rs.
pub struct LocalClipboard {
    ctx: Mutex<ClipboardContext>,
    tracker: Mutex<SignatureTracker>,
}

impl LocalClipboard {
    pub fn new() -> Result<Self, ClipboardAccessError> {
        let ctx = ClipboardContext::new().map_err(|e| {
            ClipboardAccessError::Unavailable(format!("Failed to create clipboard context: {e}"))
        })?;
        Ok(Self {
            ctx: Mutex::new(ctx),
            tracker: Mutex::new(SignatureTracker::new()),
        })
    }

    fn with_ctx<T>(
        &self,
        f: impl FnOnce(&ClipboardContext) -> Result<T, ClipboardAccessError>,
    ) -> Result<T, ClipboardAccessError> {
        let ctx = self
            .ctx
            .lock()
            .map_err(|_| ClipboardAccessError::Unavailable("clipboard lock poisoned".into()))?;
        f(&ctx)
    }
}

impl ClipboardReaderPort for LocalClipboard {
    fn change_signature(&self) -> Result<ChangeSignature, ClipboardAccessError> {
        let fingerprint = self.with_ctx(CommonClipboardImpl::fingerprint)?;
        let mut tracker = self
            .tracker
            .lock()
            .map_err(|_| ClipboardAccessError::Unavailable("signature lock poisoned".into()))?;
        Ok(tracker.observe(fingerprint))
    }

    fn read_observation(&self) -> Result<ClipboardObservation, ClipboardAccessError> {
        let span = debug_span!("platform.read_clipboard");
        span.in_scope(|| {
            let observation = self.with_ctx(CommonClipboardImpl::read_observation)?;
            debug!(
                has_image = observation.image.is_some(),
                has_file = observation.file.is_some(),
                has_url = observation.url.is_some(),
                has_text = observation.text.is_some(),
                "Read system clipboard"
            );
            Ok(observation)
        })
    }
}

impl ClipboardWriterPort for LocalClipboard {
    fn write_content(&self, content: &ClipboardContent) -> Result<(), ClipboardAccessError> {
        let span = debug_span!("platform.write_clipboard", kind = %content.kind());
        span.in_scope(|| self.with_ctx(|ctx| CommonClipboardImpl::write_content(ctx, content)))
    }
}
