//! Length-only sanity check for free-text responses.

use serde::{Deserialize, Serialize};

use super::patterns::char_len;

/// Minimum trimmed length, in characters, of a plausible response.
pub const MIN_RESPONSE_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectnessVerdict {
    pub is_likely_valid: bool,
    pub reason: String,
}

/// Classify a response by length alone.
///
/// Empty or whitespace-only text is "Empty response"; anything shorter than
/// [`MIN_RESPONSE_CHARS`] after trimming is "Too short".
pub fn basic_correctness_check(text: &str) -> CorrectnessVerdict {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return CorrectnessVerdict {
            is_likely_valid: false,
            reason: "Empty response".to_string(),
        };
    }

    let length_ok = char_len(trimmed) >= MIN_RESPONSE_CHARS;
    CorrectnessVerdict {
        is_likely_valid: length_ok,
        reason: if length_ok {
            "Non-empty natural language output".to_string()
        } else {
            "Too short".to_string()
        },
    }
}
