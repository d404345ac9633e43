//! Gemini generative-language provider.
//!
//! Posts to `{base_url}/models/{model}:generateContent` with the key in the
//! `x-goog-api-key` header. A 429 maps to [`ProviderError::RateLimited`],
//! any other non-2xx status to [`ProviderError::ApiError`]. Nothing is
//! retried.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use super::{
    secrets::{ApiCredential, CredentialSource},
    GenerateRequest, GenerateResponse, GenerativeModel, ProviderError, UsageMetadata,
};
use crate::config::{ProviderSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::metrics::extract_usage_metadata;

const CREDENTIAL_NAME: &str = "Gemini API key";

/// Gemini provider over HTTPS.
pub struct GeminiProvider {
    credential: ApiCredential,
    base_url: String,
    model: String,
    request_timeout: Option<Duration>,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_credential(ApiCredential::new(
            api_key,
            CredentialSource::Programmatic,
            CREDENTIAL_NAME,
        ))
    }

    /// Build from runtime settings, falling back to the configured key
    /// environment variable.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let credential = ApiCredential::from_config_or_env(
            settings.api_key.as_deref(),
            &settings.api_key_env,
            CREDENTIAL_NAME,
        )?;

        let mut provider = Self::with_credential(credential)
            .with_base_url(&settings.base_url)
            .with_model(&settings.model);
        provider.request_timeout = settings.request_timeout;
        Ok(provider)
    }

    fn with_credential(credential: ApiCredential) -> Self {
        Self {
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Gemini API response format. Usage is read separately from the raw body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// Split usage out of the raw body, then join the first candidate's text parts.
fn parse_body(raw: JsonValue, model: &str) -> Result<GenerateResponse, ProviderError> {
    let usage = extract_usage_metadata(&raw);
    let body: GeminiResponse =
        serde_json::from_value(raw).map_err(|e| ProviderError::ParseError(e.to_string()))?;
    into_response(body, usage, model)
}

fn into_response(
    body: GeminiResponse,
    usage: Option<UsageMetadata>,
    model: &str,
) -> Result<GenerateResponse, ProviderError> {
    let Some(candidate) = body.candidates.into_iter().next() else {
        return Err(ProviderError::NoCandidates {
            block_reason: body.prompt_feedback.and_then(|f| f.block_reason),
        });
    };

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        text,
        usage_metadata: usage,
        finish_reason: candidate.finish_reason,
        model: body.model_version.unwrap_or_else(|| model.to_string()),
    })
}

/// The API's error message, or the raw body when it is not the usual shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<GeminiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError> {
        if self.credential.is_empty() {
            return Err(ProviderError::AuthError(format!(
                "{} is empty",
                self.credential.name()
            )));
        }

        tracing::debug!(
            model = %self.model,
            has_generation_config = request.generation_config.is_some(),
            "Sending generateContent request"
        );

        let mut builder = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.credential.expose())
            .json(&request);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| match self.request_timeout {
            Some(timeout) if e.is_timeout() => ProviderError::Timeout(timeout),
            _ => ProviderError::HttpError(e.to_string()),
        })?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(ProviderError::RateLimited { retry_after });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ProviderError::HttpError(e.to_string()))?;
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let raw: JsonValue = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        parse_body(raw, &self.model)
    }

    async fn health_check(&self) -> bool {
        !self.credential.is_empty()
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<GenerateResponse, ProviderError> {
        parse_body(serde_json::from_str(json).unwrap(), "gemini-1.5-flash")
    }

    #[test]
    fn test_provider_defaults() {
        let provider = GeminiProvider::new("test-key");
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-1.5-flash");
        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = GeminiProvider::new("k")
            .with_base_url("http://localhost:8080/v1beta/")
            .with_model("gemini-1.5-pro");
        assert_eq!(
            provider.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = ProviderSettings {
            api_key: Some("config-key".to_string()),
            request_timeout: Some(Duration::from_secs(20)),
            ..Default::default()
        };
        let provider = GeminiProvider::from_settings(&settings).unwrap();
        assert_eq!(provider.credential.source(), CredentialSource::Config);
        assert_eq!(provider.request_timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_api_key_not_in_debug_output() {
        let secret = "AIza-super-secret-key-12345";
        let provider = GeminiProvider::new(secret);
        let debug = format!("{:?}", provider);
        assert!(!debug.contains(secret), "API key was exposed in Debug output!");
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_empty_key_fails_before_sending() {
        let provider = GeminiProvider::new("");
        assert!(!provider.health_check().await);
        let result = provider.generate_content(GenerateRequest::text("hi")).await;
        assert!(matches!(result, Err(ProviderError::AuthError(_))));
    }

    #[tokio::test]
    async fn test_runner_reports_unhealthy_provider() {
        let runner = crate::DemoRunner::new(
            std::sync::Arc::new(GeminiProvider::new("")),
            crate::DemoSettings::default(),
        );
        assert!(!runner.health_check().await);
    }

    #[test]
    fn test_parse_candidate_text_and_usage() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Your code "}, {"text": "compiles out of pity."}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 6, "totalTokenCount": 18},
                "modelVersion": "gemini-1.5-flash-002"
            }"#,
        )
        .unwrap();
        assert_eq!(response.text(), "Your code compiles out of pity.");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(response.model, "gemini-1.5-flash-002");
        assert_eq!(response.usage_metadata.unwrap().total_token_count, 18);
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let err = parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::NoCandidates { block_reason: Some(ref r) } if r == "SAFETY"
        ));
    }

    #[test]
    fn test_candidate_without_content_is_empty_text() {
        let response = parse(r#"{"candidates": [{"finishReason": "MAX_TOKENS"}]}"#).unwrap();
        assert_eq!(response.text(), "");
        assert_eq!(response.model, "gemini-1.5-flash");
        assert_eq!(response.usage_metadata, None);
    }

    #[test]
    fn test_malformed_usage_is_dropped_not_fatal() {
        let response = parse(
            r#"{
                "candidates": [{"content": {"parts": [{"text": "Nice try."}]}}],
                "usageMetadata": {"promptTokenCount": "twelve"}
            }"#,
        )
        .unwrap();
        assert_eq!(response.text(), "Nice try.");
        assert_eq!(response.usage_metadata, None);
    }

    #[test]
    fn test_non_object_body_is_parse_error() {
        let err = parse(r#""just text""#).unwrap_err();
        assert!(matches!(err, ProviderError::ParseError(_)));
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid.");
        assert_eq!(error_message("  upstream exploded \n"), "upstream exploded");
    }
}
