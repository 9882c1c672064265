//! The shared tokenizer.
//!
//! Build and search must tokenize under identical rules to stay comparable
//! in one vector space, so this is the only tokenizer in the workspace.

/// Common English function words dropped from every token stream.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had",
    "her", "was", "one", "our", "out", "day", "get", "has", "him", "his",
    "how", "man", "new", "now", "old", "see", "two", "way", "who", "boy",
    "did", "its", "let", "put", "say", "she", "too", "use",
];

const MIN_TOKEN_LEN: usize = 3;
const MAX_TOKEN_LEN: usize = 19;

/// Normalize text into lowercase word tokens.
///
/// Lowercases, turns every character outside `[A-Za-z0-9_]` and whitespace
/// into a space, splits on whitespace runs, then drops tokens outside the
/// 3..=19 length band and tokens on the stop-word list. Duplicates are kept
/// so term frequency can be counted downstream.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .filter(|t| (MIN_TOKEN_LEN..=MAX_TOKEN_LEN).contains(&t.len()))
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}
