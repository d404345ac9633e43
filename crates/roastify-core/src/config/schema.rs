//! JSON Schema validation for prompt configurations.
//!
//! Every document is checked against `schema/prompt_config.schema.json`
//! before it is deserialized. The schema has one branch per strategy, each
//! closed to keys that strategy does not read, so a key belonging to another
//! strategy is rejected rather than silently dropped.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded prompt-config schema (loaded at compile time).
const PROMPT_CONFIG_SCHEMA_JSON: &str = include_str!("../../schema/prompt_config.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

fn get_validator() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = serde_json::from_str(PROMPT_CONFIG_SCHEMA_JSON)
            .map_err(|e| format!("Invalid schema JSON: {}", e))?;

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result
        .as_ref()
        .map_err(|e| SchemaError::LoadError(e.clone()))
}

/// Validate a prompt-config JSON value against the schema.
///
/// Returns every violation found, each suffixed with its instance path.
pub fn validate_prompt_config_schema(config_json: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(config_json)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Boolean form of [`validate_prompt_config_schema`].
pub fn is_valid_prompt_config(config_json: &serde_json::Value) -> bool {
    get_validator()
        .map(|v| v.is_valid(config_json))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_config_passes() {
        assert!(validate_prompt_config_schema(&json!({"strategy": "dynamic"})).is_ok());
        assert!(is_valid_prompt_config(&json!({"strategy": "zero_shot"})));
    }

    #[test]
    fn test_missing_strategy_fails() {
        let result = validate_prompt_config_schema(&json!({"subject": "my cat"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_strategy_fails() {
        assert!(!is_valid_prompt_config(&json!({"strategy": "ten_shot"})));
    }

    #[test]
    fn test_additional_properties_fail() {
        let result = validate_prompt_config_schema(&json!({
            "strategy": "one_shot",
            "unknown_field": "should fail"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_keys_from_other_strategies_fail() {
        assert!(!is_valid_prompt_config(&json!({
            "strategy": "one_shot",
            "subject": "my cat",
            "temperature": 0.9
        })));
        assert!(!is_valid_prompt_config(&json!({
            "strategy": "one_shot",
            "examples": [{"input": "a", "output": "b"}]
        })));
        assert!(!is_valid_prompt_config(&json!({
            "strategy": "zero_shot",
            "subject": "my cat"
        })));
        assert!(!is_valid_prompt_config(&json!({
            "strategy": "system_user",
            "persona": "Someone else"
        })));
    }

    #[test]
    fn test_each_strategy_accepts_its_own_keys() {
        let configs = [
            json!({"strategy": "dynamic", "tone": "dry", "examples": []}),
            json!({"strategy": "one_shot", "example": {"input": "a", "output": "b"}}),
            json!({"strategy": "multi_shot", "shots": [{"input": "a", "output": "b"}]}),
            json!({"strategy": "stop_sequence", "stopSequences": ["END"]}),
            json!({"strategy": "system_user", "formatPreference": "detailed"}),
            json!({"strategy": "temperature", "temperature": 0.4, "styleHints": []}),
            json!({"strategy": "top_p", "topP": 0.4, "constraints": ["x"]}),
        ];
        for config in configs {
            assert!(validate_prompt_config_schema(&config).is_ok(), "{config}");
        }
    }

    #[test]
    fn test_wrong_types_fail() {
        assert!(!is_valid_prompt_config(&json!({
            "strategy": "temperature",
            "temperature": "hot"
        })));
        assert!(!is_valid_prompt_config(&json!({
            "strategy": "dynamic",
            "constraints": "not a list"
        })));
    }

    #[test]
    fn test_structured_example_output() {
        let valid = json!({
            "strategy": "structured_output",
            "example": {
                "input": "My cooking",
                "output": {
                    "roast": "r", "tone": "t", "wordCount": 1, "metaphor": "m", "category": "c"
                }
            }
        });
        assert!(is_valid_prompt_config(&valid));

        let invalid = json!({
            "strategy": "structured_output",
            "example": { "input": "My cooking", "output": { "roast": "r" } }
        });
        assert!(!is_valid_prompt_config(&invalid));
    }
}
