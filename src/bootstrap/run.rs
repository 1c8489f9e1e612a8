//! Headless daemon lifecycle: load, monitor until Ctrl-C, drain, stop.

use anyhow::Context;
use cs_app::usecases::{StartMonitoring, StopMonitoring};
use cs_core::AppConfig;
use cs_platform::ipc::PlatformCommand;
use tracing::{error, info, warn};

use super::wiring::{wire_daemon, WiredDaemon};

pub async fn run_daemon(config: &AppConfig) -> anyhow::Result<()> {
    let WiredDaemon {
        controller,
        runtime,
        command_tx,
    } = wire_daemon(config).context("failed to wire clipboard daemon")?;

    let runtime_task = tokio::spawn(runtime.start());

    let outcome = async {
        if let Err(err) = controller.load().await {
            error!(error = %err, "failed to load clipboard history, starting empty");
        }

        if !StartMonitoring::new(controller.clone()).execute().await {
            anyhow::bail!("clipboard monitoring could not be started");
        }
        info!(
            items = controller.items().len(),
            "clipstash is monitoring the clipboard, press Ctrl-C to stop"
        );

        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for Ctrl-C")?;
        info!("shutdown requested");
        Ok::<(), anyhow::Error>(())
    }
    .await;

    if let Err(err) = &outcome {
        let message = format!("{err:#}");
        error!(error = %message, "daemon stopping after error");
    }

    StopMonitoring::new(controller.clone()).execute().await;
    controller.shutdown().await;

    if command_tx.send(PlatformCommand::Shutdown).await.is_err() {
        warn!("platform runtime already stopped");
    }
    if let Err(err) = runtime_task.await {
        warn!(error = %err, "platform runtime task failed");
    }

    outcome
}
