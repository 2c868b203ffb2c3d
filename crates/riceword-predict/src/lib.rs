//! # riceword-predict
//!
//! **Purpose**: Subprocess client for the mocword word-prediction engine
//!
//! Owns a long-lived engine process and exposes a strictly request/response
//! query interface over its stdio pipes: one query line in, one ranked-word
//! line out, always in submission order.
//!
//! ## Protocol
//!
//! - At most one query is outstanding at a time; concurrent callers are
//!   serialized through a bounded FIFO queue
//! - Responses are newline-delimited UTF-8 (`\n` or `\r\n`); a blank line is
//!   a valid "no predictions" answer, not an error
//! - A session whose process exits, is killed, or fails to spawn degrades to
//!   empty responses; it is never respawned automatically
//!
//! ## Usage
//!
//! ```rust,no_run
//! use riceword_predict::{EngineConfig, PredictionClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PredictionClient::new(EngineConfig::default());
//! client.start().await?;
//!
//! let line = client.query("camel Case Input").await;
//! for word in line.split_ascii_whitespace() {
//!     println!("{word}");
//! }
//!
//! client.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
mod process;
pub mod types;

pub use client::PredictionClient;
pub use error::{PredictError, Result};
pub use types::{ClientState, EngineConfig, DEFAULT_ENGINE, DEFAULT_LIMIT, DEFAULT_TIMEOUT_MS};
