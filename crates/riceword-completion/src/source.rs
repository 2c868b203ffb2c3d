//! Word completion source
//!
//! Glues the tokenizer to the prediction engine for one completion request:
//! derive the query from the typed text, fetch one line of ranked words, and
//! rebuild full candidates by prepending the literal prefix the query left
//! out. The source owns no state beyond its predictor handle.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::tokenizer::{tokenize, Tokenization};
use crate::types::Candidate;

/// Seam to the external word-prediction engine
///
/// One query line in, one response line out. Implementations degrade to an
/// empty line when the engine is unavailable rather than surfacing an error.
#[async_trait]
pub trait WordPredictor: Send + Sync {
    /// Send one query line and return the engine's next response line
    async fn predict(&self, query: &str) -> String;
}

/// Completion source backed by a word-prediction engine
pub struct WordCompletionSource {
    predictor: Arc<dyn WordPredictor>,
}

impl WordCompletionSource {
    /// Create a source over the given predictor
    pub fn new(predictor: Arc<dyn WordPredictor>) -> Self {
        Self { predictor }
    }

    /// Produce completion candidates for the in-progress identifier
    ///
    /// `just_typed` is the partially-typed word under the cursor, used for
    /// case analysis; `line_context` is the whole line up to the cursor, used
    /// as the query when no fragment boundary can be derived from
    /// `just_typed`. Candidates keep the engine's ranking order verbatim; no
    /// re-sorting, no deduplication. All failure modes degrade to an empty
    /// list.
    pub async fn complete(&self, just_typed: &str, line_context: &str) -> Vec<Candidate> {
        let Tokenization { sentence, offset } = tokenize(just_typed);
        let query = if offset > 0 {
            sentence.as_str()
        } else {
            line_context
        };

        let line = self.predictor.predict(query).await;
        if line.is_empty() {
            debug!("Prediction engine returned no candidates");
            return Vec::new();
        }

        let preceding = &just_typed[..offset];
        line.split_ascii_whitespace()
            .map(|word| Candidate::new(format!("{preceding}{word}")))
            .collect()
    }
}
