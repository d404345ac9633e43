//! Validation of JSON-shaped roast responses.
//!
//! Checks run in order and the first failure wins:
//! 1. the text parses as JSON and the `roast` value is a string
//! 2. all five required fields are present
//! 3. `wordCount` is a positive number
//! 4. the roast itself has at most [`MAX_ROAST_WORDS`] words
//!
//! The declared `wordCount` and the recounted roast length are independent;
//! a plausible declared count does not rescue an overlong roast.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RoastRecord;

use super::patterns::word_count;

/// Fields every structured roast must carry.
pub const REQUIRED_FIELDS: [&str; 5] = ["roast", "tone", "wordCount", "metaphor", "category"];

/// Longest roast accepted, in whitespace-separated words.
pub const MAX_ROAST_WORDS: usize = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredVerdict {
    pub is_valid: bool,
    pub reason: String,

    /// The parsed JSON, only when valid.
    pub parsed: Option<Value>,
}

impl StructuredVerdict {
    fn invalid(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(reason = %reason, "Structured output rejected");
        Self {
            is_valid: false,
            reason,
            parsed: None,
        }
    }

    /// The parsed value as a typed record, if it fits one.
    ///
    /// `None` when invalid, or when the fields have types the validator
    /// tolerates but [`RoastRecord`] does not (e.g. a fractional word count).
    pub fn record(&self) -> Option<RoastRecord> {
        self.parsed
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Validate a response that should be a five-field JSON roast.
pub fn validate_structured_output(text: &str) -> StructuredVerdict {
    let parsed: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return StructuredVerdict::invalid("Invalid JSON format"),
    };

    // Arrays carry no named fields; scalars cannot be inspected at all.
    let empty = serde_json::Map::new();
    let fields = match &parsed {
        Value::Object(map) => map,
        Value::Array(_) => &empty,
        _ => return StructuredVerdict::invalid("Invalid JSON format"),
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| !fields.contains_key(*f))
        .collect();
    if !missing.is_empty() {
        return StructuredVerdict::invalid(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ));
    }

    let declared_ok = fields
        .get("wordCount")
        .and_then(Value::as_f64)
        .map(|n| n > 0.0)
        .unwrap_or(false);
    if !declared_ok {
        return StructuredVerdict::invalid("Invalid word count");
    }

    let roast = match fields.get("roast").and_then(Value::as_str) {
        Some(r) => r,
        None => return StructuredVerdict::invalid("Invalid JSON format"),
    };
    let actual = word_count(roast);
    if actual > MAX_ROAST_WORDS {
        return StructuredVerdict::invalid(format!(
            "Roast too long: {} words (max {})",
            actual, MAX_ROAST_WORDS
        ));
    }

    StructuredVerdict {
        is_valid: true,
        reason: "Valid structured output".to_string(),
        parsed: Some(parsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_structured_output() {
        let verdict = validate_structured_output(
            r#"{"roast":"a b c","tone":"x","wordCount":3,"metaphor":"m","category":"c"}"#,
        );
        assert!(verdict.is_valid);
        assert_eq!(verdict.reason, "Valid structured output");
        let parsed = verdict.parsed.as_ref().unwrap();
        assert_eq!(parsed["wordCount"], 3);
        assert_eq!(verdict.record().unwrap().word_count, 3);
    }

    #[test]
    fn test_not_json() {
        let verdict = validate_structured_output("not json");
        assert!(!verdict.is_valid);
        assert_eq!(verdict.reason, "Invalid JSON format");
        assert!(verdict.parsed.is_none());
    }

    #[test]
    fn test_scalar_json_is_invalid_format() {
        assert_eq!(validate_structured_output("42").reason, "Invalid JSON format");
        assert_eq!(validate_structured_output("null").reason, "Invalid JSON format");
    }

    #[test]
    fn test_missing_fields_listed_in_order() {
        let verdict = validate_structured_output(r#"{"roast":"a","wordCount":1}"#);
        assert!(!verdict.is_valid);
        assert_eq!(
            verdict.reason,
            "Missing required fields: tone, metaphor, category"
        );

        let verdict = validate_structured_output("[]");
        assert_eq!(
            verdict.reason,
            "Missing required fields: roast, tone, wordCount, metaphor, category"
        );
    }

    #[test]
    fn test_word_count_must_be_positive_number() {
        for bad in [r#"0"#, r#"-2"#, r#""3""#, r#"null"#] {
            let text = format!(
                r#"{{"roast":"a b","tone":"t","wordCount":{bad},"metaphor":"m","category":"c"}}"#
            );
            let verdict = validate_structured_output(&text);
            assert!(!verdict.is_valid, "accepted wordCount {bad}");
            assert_eq!(verdict.reason, "Invalid word count");
        }
    }

    #[test]
    fn test_actual_word_count_overrides_declared() {
        let roast = vec!["word"; 26].join(" ");
        let text = format!(
            r#"{{"roast":"{roast}","tone":"t","wordCount":5,"metaphor":"m","category":"c"}}"#
        );
        let verdict = validate_structured_output(&text);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.reason, "Roast too long: 26 words (max 25)");
    }

    #[test]
    fn test_exactly_max_words_is_valid() {
        let roast = vec!["word"; 25].join(" ");
        let text = format!(
            r#"{{"roast":"{roast}","tone":"t","wordCount":25,"metaphor":"m","category":"c"}}"#
        );
        assert!(validate_structured_output(&text).is_valid);
    }

    #[test]
    fn test_non_string_roast() {
        let verdict = validate_structured_output(
            r#"{"roast":7,"tone":"t","wordCount":1,"metaphor":"m","category":"c"}"#,
        );
        assert_eq!(verdict.reason, "Invalid JSON format");
    }

    #[test]
    fn test_fractional_word_count_valid_but_untyped() {
        let verdict = validate_structured_output(
            r#"{"roast":"a b","tone":"t","wordCount":2.5,"metaphor":"m","category":"c"}"#,
        );
        assert!(verdict.is_valid);
        assert!(verdict.record().is_none());
    }
}
