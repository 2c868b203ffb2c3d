//! Error types for the prediction client

use std::io;
use thiserror::Error;

/// Prediction client errors
#[derive(Debug, Error)]
pub enum PredictError {
    /// Failed to spawn the engine process
    #[error("Failed to spawn prediction engine: {0}")]
    SpawnFailed(#[from] io::Error),

    /// Engine terminated while the session was live
    #[error("Prediction engine exited (code: {code:?})")]
    ProcessExited { code: Option<i32> },

    /// Engine exited non-zero, its data set is likely missing or invalid
    #[error("Prediction engine rejected its environment (exit code {code}); is MOCWORD_DATA set?")]
    MalformedEnvironment { code: i32 },

    /// start() called while a session is already live
    #[error("Prediction engine is already running")]
    AlreadyRunning,

    /// Session is terminated or was never started
    #[error("Prediction engine is not available")]
    Unavailable,

    /// No response within the configured bound
    #[error("Prediction timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Result type for prediction operations
pub type Result<T> = std::result::Result<T, PredictError>;
