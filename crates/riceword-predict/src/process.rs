//! Engine process spawning and teardown

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::types::EngineConfig;

/// Bounded wait for the engine to exit after a kill
const EXIT_WAIT: Duration = Duration::from_secs(5);

/// Spawn the prediction engine with all three stdio streams piped
pub(crate) fn spawn_engine(config: &EngineConfig) -> Result<Child> {
    debug!(
        executable = %config.executable,
        limit = config.limit,
        "Spawning prediction engine"
    );

    let mut cmd = Command::new(&config.executable);
    cmd.arg("--limit")
        .arg(config.limit.to_string())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // no engine outlives its session
        .kill_on_drop(true);

    for (key, value) in &config.env {
        cmd.env(key, value);
    }

    let child = cmd.spawn()?;

    info!(
        pid = ?child.id(),
        executable = %config.executable,
        "Prediction engine spawned"
    );

    Ok(child)
}

/// Kill the engine and wait for it to exit
pub(crate) async fn terminate_engine(child: &mut Child) {
    if let Err(e) = child.kill().await {
        warn!(error = %e, "Failed to kill prediction engine");
    }

    match tokio::time::timeout(EXIT_WAIT, child.wait()).await {
        Ok(Ok(status)) => {
            debug!(code = ?status.code(), "Prediction engine shut down");
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Error waiting for prediction engine to exit");
        }
        Err(_) => {
            warn!("Timeout waiting for prediction engine to exit");
        }
    }
}
