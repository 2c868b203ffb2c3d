//! # riceword-completion
//!
//! **Purpose**: Word-completion source and case-style query tokenizer
//!
//! Turns an in-progress identifier into a word-prediction query, forwards it
//! to an external engine through the [`WordPredictor`] seam, and rebuilds the
//! engine's ranked words into full completion candidates.
//!
//! ## Pipeline
//!
//! 1. **Tokenize**: classify the typed text by case style (upper-snake, then
//!    camel/Pascal, then lowercase runs) and split it into fragments; the
//!    boundary before the final fragment separates literal prefix from the
//!    re-queried in-progress word
//! 2. **Query**: send the space-joined fragments to the predictor, or the
//!    full line context when nothing was extractable
//! 3. **Assemble**: prepend the literal prefix to every returned word,
//!    preserving the engine's ranking order
//!
//! ## Usage
//!
//! ```ignore
//! use riceword_completion::WordCompletionSource;
//! use std::sync::Arc;
//!
//! let source = WordCompletionSource::new(Arc::new(client));
//! let candidates = source
//!     .complete("camelCaseInput", "This is a camelCaseInput")
//!     .await;
//! ```

pub mod source;
pub mod tokenizer;
pub mod types;

pub use source::{WordCompletionSource, WordPredictor};
pub use tokenizer::{tokenize, Tokenization};
pub use types::Candidate;
