//! Workspace-level integration tests for riceword
//!
//! The crates under test are re-exported so the tests in `tests/` can reach
//! both sides of the engine/completion boundary from one place.

pub use riceword_completion;
pub use riceword_predict;
