//! # roastify-runtime
//!
//! The asynchronous half of Roastify: talking to the generative model,
//! timing each call and running the prompt-engineering demonstrations.
//!
//! Prompt rendering and response evaluation stay in `roastify-core`; this
//! crate wires them to a [`GenerativeModel`] one call at a time.
//!
//! ## Example
//!
//! ```rust,ignore
//! use roastify_runtime::{gemini_runner, RuntimeConfig};
//!
//! let config = RuntimeConfig::from_env()?;
//! let runner = gemini_runner(&config)?;
//! let run = runner.run_all().await;
//! println!("{} failed calls", run.failures());
//! ```

use thiserror::Error;

pub mod config;
pub mod demo;
pub mod metrics;
pub mod providers;

pub use config::{DemoSettings, ProviderSettings, RuntimeConfig, RuntimeConfigError};
pub use demo::{DemoReport, DemoRun, DemoRunner, Evaluation, SweepReport};
pub use metrics::{
    extract_usage_metadata, measure_async, OperationMetrics, OperationResult, UsageMetadata,
};
pub use providers::{
    ApiCredential, Content, CredentialSource, GenerateRequest, GenerateResponse,
    GenerativeModel, Part, ProviderError,
};

#[cfg(feature = "gemini")]
pub use providers::GeminiProvider;

/// Errors from setting up a run.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] RuntimeConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Build a runner backed by Gemini from runtime configuration.
#[cfg(feature = "gemini")]
pub fn gemini_runner(config: &RuntimeConfig) -> Result<DemoRunner, RuntimeError> {
    let provider = GeminiProvider::from_settings(&config.provider)?;
    tracing::debug!(provider = ?provider, "Gemini provider ready");
    Ok(DemoRunner::new(
        std::sync::Arc::new(provider),
        config.demo.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert() {
        let err: RuntimeError =
            ProviderError::NotConfigured("Gemini API key not set".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Provider error: Provider not configured: Gemini API key not set"
        );

        let err: RuntimeError = RuntimeConfigError::Invalid("bad".to_string()).into();
        assert!(matches!(err, RuntimeError::Config(_)));
    }

    #[cfg(feature = "gemini")]
    #[test]
    fn test_gemini_runner_from_config() {
        let config = RuntimeConfig::from_yaml(
            "provider:\n  apiKey: test-key\ndemo:\n  subject: my code\n",
        )
        .unwrap();
        let runner = gemini_runner(&config).unwrap();
        assert_eq!(runner.settings().subject, "my code");
    }
}
