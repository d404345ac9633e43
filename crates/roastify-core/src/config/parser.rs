//! Prompt configuration parsing from YAML/JSON.
//!
//! A document names its `strategy` and overrides any of that strategy's
//! options; everything left out keeps the strategy's default.
//!
//! ```yaml
//! strategy: temperature
//! subject: "my houseplants"
//! temperature: 0.9
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::schema::validate_prompt_config_schema;
use crate::templates::{
    DynamicPrompt, MultiShotPrompt, OneShotPrompt, PromptTemplate, StopSequencePrompt,
    StructuredOutputPrompt, SystemUserPrompt, TemperaturePrompt, TopPPrompt, ZeroShotPrompt,
};
use crate::types::{GenerationSettings, RenderedPrompt, Strategy};

/// Errors that can occur when loading prompt configurations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Schema validation failed: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// A prompt configuration for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PromptConfig {
    ZeroShot,
    Dynamic(DynamicPrompt),
    OneShot(OneShotPrompt),
    MultiShot(MultiShotPrompt),
    StopSequence(StopSequencePrompt),
    StructuredOutput(StructuredOutputPrompt),
    SystemUser(SystemUserPrompt),
    Temperature(TemperaturePrompt),
    TopP(TopPPrompt),
}

impl PromptConfig {
    /// Parse a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a config from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        validate_prompt_config_schema(&value).map_err(ConfigError::SchemaError)?;
        let config: PromptConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// The subject must be non-empty when a strategy takes one.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.subject() {
            Some(subject) if subject.trim().is_empty() => {
                Err(ConfigError::MissingField("subject".to_string()))
            }
            _ => Ok(()),
        }
    }

    /// The roast subject, for strategies that take one.
    pub fn subject(&self) -> Option<&str> {
        match self {
            PromptConfig::ZeroShot => None,
            PromptConfig::Dynamic(p) => Some(&p.subject),
            PromptConfig::OneShot(p) => Some(&p.subject),
            PromptConfig::MultiShot(p) => Some(&p.subject),
            PromptConfig::StopSequence(p) => Some(&p.subject),
            PromptConfig::StructuredOutput(p) => Some(&p.subject),
            PromptConfig::SystemUser(p) => Some(&p.subject),
            PromptConfig::Temperature(p) => Some(&p.subject),
            PromptConfig::TopP(p) => Some(&p.subject),
        }
    }

    /// The configured template as a trait object.
    pub fn template(&self) -> &dyn PromptTemplate {
        match self {
            PromptConfig::ZeroShot => &ZeroShotPrompt,
            PromptConfig::Dynamic(p) => p,
            PromptConfig::OneShot(p) => p,
            PromptConfig::MultiShot(p) => p,
            PromptConfig::StopSequence(p) => p,
            PromptConfig::StructuredOutput(p) => p,
            PromptConfig::SystemUser(p) => p,
            PromptConfig::Temperature(p) => p,
            PromptConfig::TopP(p) => p,
        }
    }
}

impl PromptTemplate for PromptConfig {
    fn strategy(&self) -> Strategy {
        self.template().strategy()
    }

    fn render(&self) -> RenderedPrompt {
        self.template().render()
    }

    fn generation_settings(&self) -> GenerationSettings {
        self.template().generation_settings()
    }
}
