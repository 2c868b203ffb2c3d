//! Core data structures for the prediction client

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default engine executable, resolved via the system PATH
pub const DEFAULT_ENGINE: &str = "mocword";

/// Default cap on ranked words per response line
pub const DEFAULT_LIMIT: u32 = 100;

/// Default bound on each response wait in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Configuration for spawning the prediction engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Executable path or name (resolved via $PATH)
    pub executable: String,
    /// Maximum number of ranked words the engine may return per query
    pub limit: u32,
    /// Environment variables added to the engine process
    pub env: HashMap<String, String>,
    /// Bound on each response wait in milliseconds
    pub timeout_ms: u64,
}

impl EngineConfig {
    /// Create a configuration for the given executable
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            limit: DEFAULT_LIMIT,
            env: HashMap::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the result-count cap passed to the engine
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Add an environment variable for the engine process
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the response-wait bound in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Resolve the configured executable through the system PATH
    pub fn executable_on_path(&self) -> Option<PathBuf> {
        which::which(&self.executable).ok()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

/// State of a prediction session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// start() has not been called
    Uninitialized,
    /// Spawning the engine process
    Starting,
    /// Engine running, accepting queries
    Ready,
    /// Engine exited, was killed, or failed to spawn; queries return empty
    Terminated,
}
