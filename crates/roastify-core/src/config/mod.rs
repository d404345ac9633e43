//! Prompt configuration loading and validation.

mod parser;
mod schema;

pub use parser::{ConfigError, PromptConfig};
pub use schema::{is_valid_prompt_config, validate_prompt_config_schema};
