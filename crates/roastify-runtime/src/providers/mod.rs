//! Generative-model provider abstractions.
//!
//! A [`GenerativeModel`] takes a [`GenerateRequest`] in the
//! generative-language wire shape and returns the generated text with its
//! usage metadata. The Gemini HTTP implementation sits behind the `gemini`
//! feature; tests substitute an in-memory model.
//!
//! ## Security
//!
//! Providers hold their API key as an [`ApiCredential`], which never shows
//! up in `Debug` or `Display` output.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use roastify_core::{GenerationSettings, RenderedPrompt};

pub use crate::metrics::UsageMetadata;

pub mod secrets;

#[cfg(feature = "gemini")]
mod gemini;

pub use secrets::{ApiCredential, CredentialSource};

#[cfg(feature = "gemini")]
pub use gemini::GeminiProvider;

/// Errors from generative-model providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("No candidates returned{}", block_suffix(.block_reason))]
    NoCandidates { block_reason: Option<String> },
}

fn block_suffix(block_reason: &Option<String>) -> String {
    match block_reason {
        Some(reason) => format!(" (blocked: {reason})"),
        None => String::new(),
    }
}

/// One text fragment of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"
    pub role: String,

    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn holding a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// A structured generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationSettings>,
}

impl GenerateRequest {
    /// Wrap a plain instruction as a single user turn.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            generation_config: None,
        }
    }

    /// Attach generation settings; empty settings leave the request bare.
    pub fn with_generation_config(mut self, settings: GenerationSettings) -> Self {
        self.generation_config = if settings.is_empty() {
            None
        } else {
            Some(settings)
        };
        self
    }

    /// The request's text, all parts of all turns concatenated.
    pub fn prompt_text(&self) -> String {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

impl From<RenderedPrompt> for GenerateRequest {
    fn from(prompt: RenderedPrompt) -> Self {
        Self::text(prompt.into_string())
    }
}

/// Text and accounting returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    pub model: String,
}

impl GenerateResponse {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Provider abstraction over the generative-language backend.
///
/// Calls are made one at a time by the demonstration runner; an
/// implementation never retries on its own.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a completion for `request`.
    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError>;

    /// Check that the provider has what it needs to make a call.
    async fn health_check(&self) -> bool {
        true
    }

    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}
