use std::sync::Arc;
use std::time::Duration;

use cs_core::ports::ClipboardChangeHandler;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polls on a fixed period and signals the handler on every tick.
///
/// Change detection lives in the handler. Cancellation is observed only
/// between ticks, so a signal that is already being handled always runs to
/// completion.
pub struct ClipboardWatcher {
    handler: Arc<dyn ClipboardChangeHandler>,
    poll_interval: Duration,
}

impl ClipboardWatcher {
    pub fn new(handler: Arc<dyn ClipboardChangeHandler>, poll_interval: Duration) -> Self {
        Self {
            handler,
            poll_interval,
        }
    }

    pub async fn run(self, token: CancellationToken) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(poll_interval_ms = self.poll_interval.as_millis() as u64, "clipboard watch started");

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(err) = self.handler.on_clipboard_changed().await {
                        warn!(error = %err, "Failed to handle clipboard change");
                    }
                }
            }
        }

        debug!("clipboard watch stopped");
    }
}
