//! Runtime configuration.
//!
//! ```yaml
//! provider:
//!   model: gemini-1.5-flash
//!   requestTimeout: 30s
//! demo:
//!   subject: "my sourdough starter"
//!   temperatures: [0.2, 0.8]
//! ```
//!
//! Every field has a default, so an empty document is a valid config.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use roastify_core::templates::DEFAULT_SUBJECT;
use roastify_core::{temperature_settings, top_p_settings};

/// Environment variable holding the path of a runtime config file.
pub const CONFIG_PATH_ENV: &str = "ROASTIFY_CONFIG";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Error, Debug)]
pub enum RuntimeConfigError {
    #[error("Failed to read runtime config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse runtime config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid runtime config: {0}")]
    Invalid(String),
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub provider: ProviderSettings,
    pub demo: DemoSettings,
}

impl RuntimeConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, RuntimeConfigError> {
        // An empty document deserializes to unit, not a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RuntimeConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RuntimeConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from the file named by `ROASTIFY_CONFIG`, or use defaults.
    pub fn from_env() -> Result<Self, RuntimeConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::debug!(path = %path, "Loading runtime config");
                Self::from_yaml_file(path)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), RuntimeConfigError> {
        let url = &self.provider.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(RuntimeConfigError::Invalid(
                "provider.baseUrl must start with http:// or https://".to_string(),
            ));
        }
        if self.provider.model.trim().is_empty() {
            return Err(RuntimeConfigError::Invalid(
                "provider.model must not be empty".to_string(),
            ));
        }
        if self.demo.subject.trim().is_empty() {
            return Err(RuntimeConfigError::Invalid(
                "demo.subject must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where and how to reach the model.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderSettings {
    pub model: String,
    pub base_url: String,

    /// Environment variable consulted when `api_key` is unset.
    pub api_key_env: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout, e.g. "30s". Unset means wait indefinitely.
    #[serde(with = "humantime_opt", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            request_timeout: None,
        }
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key_env", &self.api_key_env)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// What the demonstration run feeds to each template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoSettings {
    pub subject: String,
    pub temperatures: Vec<f64>,
    pub top_ps: Vec<f64>,
}

/// Sweeps default to the canonical sampling tables.
impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            temperatures: temperature_settings().iter().map(|p| p.value).collect(),
            top_ps: top_p_settings().iter().map(|p| p.value).collect(),
        }
    }
}

mod humantime_opt {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_str(&humantime::format_duration(*d).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
