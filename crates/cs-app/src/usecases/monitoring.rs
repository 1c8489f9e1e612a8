//! Use cases for toggling clipboard monitoring
//! 开启 / 关闭剪贴板监听的用例

use tracing::{info, info_span, Instrument};

use crate::history::HistoryController;

/// Starts capturing clipboard changes.
///
/// ## Behavior / 行为
/// - Idempotent: starting while monitoring does nothing
/// - A watcher that fails to start leaves monitoring stopped; the return
///   value reports the resulting state
pub struct StartMonitoring {
    controller: HistoryController,
}

impl StartMonitoring {
    pub fn new(controller: HistoryController) -> Self {
        Self { controller }
    }

    /// Returns whether monitoring is active afterwards.
    pub async fn execute(&self) -> bool {
        async {
            self.controller.start_monitoring().await;
            let monitoring = self.controller.snapshot().is_monitoring;
            info!(monitoring, "start monitoring requested");
            monitoring
        }
        .instrument(info_span!("usecase.start_monitoring.execute"))
        .await
    }
}

/// Stops capturing clipboard changes. Idempotent.
pub struct StopMonitoring {
    controller: HistoryController,
}

impl StopMonitoring {
    pub fn new(controller: HistoryController) -> Self {
        Self { controller }
    }

    pub async fn execute(&self) {
        async {
            self.controller.stop_monitoring().await;
            info!("stop monitoring requested");
        }
        .instrument(info_span!("usecase.stop_monitoring.execute"))
        .await
    }
}
