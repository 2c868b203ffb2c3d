//! Core data structures for word completion

use serde::{Deserialize, Serialize};

/// A single completion candidate presented to the editor
///
/// Built per request as literal prefix + predicted word; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Full replacement text for the in-progress identifier
    pub word: String,
}

impl Candidate {
    /// Create a candidate from a full replacement word
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}
