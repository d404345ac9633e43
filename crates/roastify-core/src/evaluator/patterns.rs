//! Shared text heuristics for the evaluators.
//!
//! Word counting splits on runs of whitespace without trimming first, so
//! leading whitespace yields an empty leading token and an empty string
//! counts as one word. Marker checks are case-insensitive substring tests,
//! not word-boundary matches ("as" matches "has").

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One or more whitespace characters.
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Substrings that signal a simile or metaphor.
pub const METAPHOR_MARKERS: &[&str] = &["like", "as"];

/// Broader creativity markers used by the top-p analysis.
pub const EXTENDED_METAPHOR_MARKERS: &[&str] = &["like", "as", "is a"];

/// Substrings that signal wordplay.
pub const WORDPLAY_MARKERS: &[&str] = &["pun", "play on words", "double meaning"];

/// Substrings that signal the intended tone.
pub const TONE_MARKERS: &[&str] = &["witty", "clever"];

/// Substrings that signal the roast persona was followed.
pub const ROLE_MARKERS: &[&str] = &["roast", "witty"];

/// Substrings that mark inappropriate content.
pub const UNSAFE_MARKERS: &[&str] = &["hate", "slur"];

/// Tokens produced by splitting on whitespace runs.
pub fn tokens(text: &str) -> Vec<&str> {
    WHITESPACE.split(text).collect()
}

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    WHITESPACE.split(text).count()
}

/// True if the lowercased text contains any of `markers`.
pub fn contains_any(text: &str, markers: &[&str]) -> bool {
    let lower = text.to_lowercase();
    markers.iter().any(|m| lower.contains(m))
}

/// Length in characters rather than bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
