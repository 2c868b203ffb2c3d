//! Case-style query tokenizer
//!
//! Splits an in-progress identifier into word fragments by case-style
//! heuristics and decides where the literal prefix ends and the final
//! in-progress fragment begins. Pure text analysis, no external state.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of two or more consecutive uppercase letters (UPPER_SNAKE)
static UPPER_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][A-Z]+").expect("Invalid regex"));

/// camelCase / PascalCase fragments, including a lone trailing capital
static CAMEL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]?[a-z]+|[A-Z][a-z]*").expect("Invalid regex"));

/// Lowercase runs (snake_case, kebab-case, plain words)
static SNAKE_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z][a-z]*").expect("Invalid regex"));

/// Result of splitting the just-typed text into a query sentence and a
/// literal-prefix boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenization {
    /// Space-joined word fragments forming the engine query
    pub sentence: String,
    /// Byte offset into the typed text where the final fragment begins;
    /// 0 means no usable fragment was found and the caller should query
    /// with the full line context instead
    pub offset: usize,
}

/// Split the just-typed text into word fragments and a prefix boundary
///
/// Fragment patterns are tried in strict priority order (upper-snake, then
/// camel/Pascal, then lowercase runs) and the first pattern that matches
/// anything wins. When the text ends in a separator the whole of it becomes
/// literal prefix and the sentence gains a trailing space, so the engine
/// predicts a fresh next word rather than extending the last one.
///
/// # Examples
///
/// ```
/// use riceword_completion::tokenize;
///
/// let t = tokenize("camelCaseInput");
/// assert_eq!(t.sentence, "camel Case Input");
/// assert_eq!(t.offset, 9);
/// ```
pub fn tokenize(just_typed: &str) -> Tokenization {
    let fragments = fragments(just_typed);
    if fragments.is_empty() {
        return Tokenization {
            sentence: just_typed.to_owned(),
            offset: 0,
        };
    }

    let sentence = fragments.join(" ");

    // The user just typed a separator: nothing is mid-word, so the whole
    // typed text is literal prefix and the query asks for a next word.
    let ends_mid_word = just_typed
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphabetic());
    if !ends_mid_word {
        return Tokenization {
            sentence: sentence + " ",
            offset: just_typed.len(),
        };
    }

    // Everything before the final fragment is literal prefix; the fragment
    // itself is re-queried as part of the sentence so the engine extends it.
    let last = fragments[fragments.len() - 1];
    let offset = just_typed.rfind(last).unwrap_or(0);

    Tokenization { sentence, offset }
}

/// Extract word fragments using the first case-style pattern that matches
fn fragments(just_typed: &str) -> Vec<&str> {
    for pattern in [&*UPPER_CASE, &*CAMEL_CASE, &*SNAKE_CASE] {
        let found: Vec<&str> = pattern
            .find_iter(just_typed)
            .map(|m| m.as_str())
            .collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str, sentence: &str, offset: usize) {
        let t = tokenize(input);
        assert_eq!(t.sentence, sentence, "sentence for {input:?}");
        assert_eq!(t.offset, offset, "offset for {input:?}");
    }

    #[test]
    fn test_upper_snake_fragments() {
        check("UPPER_CASE_INPUT", "UPPER CASE INPUT", 11);
    }

    #[test]
    fn test_camel_case_fragments() {
        check("camelCaseInput", "camel Case Input", 9);
    }

    #[test]
    fn test_snake_case_fragments() {
        check("_snake_case_input", "snake case input", 12);
    }

    #[test]
    fn test_kebab_case_fragments() {
        check("kebab-case-input", "kebab case input", 11);
    }

    #[test]
    fn test_trailing_separator_consumes_whole_input() {
        check("_unfinished_input_", "unfinished input ", 18);
    }

    #[test]
    fn test_lone_trailing_capital() {
        check("unfinishedI", "unfinished I", 10);
    }

    #[test]
    fn test_leading_separator_single_letter() {
        check("_i", "i", 1);
    }

    #[test]
    fn test_single_word_offset_zero() {
        check("input", "input", 0);
    }

    #[test]
    fn test_empty_input() {
        check("", "", 0);
    }

    #[test]
    fn test_no_letters_passes_through() {
        check("1234", "1234", 0);
    }

    #[test]
    fn test_repeated_fragment_uses_last_occurrence() {
        // "in" appears inside "main" too; the offset must point at the
        // final in-progress fragment, not an earlier substring hit.
        check("main_in", "main in", 5);
    }

    #[test]
    fn test_digits_are_separators() {
        check("alpha2beta", "alpha beta", 6);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(tokenize("camelCaseInput"), tokenize("camelCaseInput"));
        assert_eq!(tokenize("_i"), tokenize("_i"));
    }
}
