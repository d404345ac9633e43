//! Timing envelope for one asynchronous unit of work.
//!
//! [`measure_async`] runs an operation exactly once and packages whatever it
//! produced, success or error, together with its start time and elapsed
//! milliseconds. It never retries, never imposes a timeout and never
//! rewrites the error; the caller branches on [`OperationResult::outcome`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::future::Future;
use tokio::time::Instant;

/// Timing recorded for one measured operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetrics {
    pub operation_name: String,

    /// Wall-clock time, rounded to the nearest millisecond.
    pub duration_ms: u64,

    pub started_at: DateTime<Utc>,
}

/// What an operation produced plus how long it took.
#[derive(Debug)]
pub struct OperationResult<T, E> {
    pub outcome: Result<T, E>,
    pub metrics: OperationMetrics,
}

impl<T, E> OperationResult<T, E> {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn ok(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn err(&self) -> Option<&E> {
        self.outcome.as_ref().err()
    }

    /// Drop the metrics and keep the outcome.
    pub fn into_outcome(self) -> Result<T, E> {
        self.outcome
    }
}

/// Run `operation` once, recording its start time and duration.
pub async fn measure_async<T, E, F, Fut>(operation_name: &str, operation: F) -> OperationResult<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let started_at = Utc::now();
    let start = Instant::now();

    let outcome = operation().await;

    let duration_ms = (start.elapsed().as_secs_f64() * 1000.0).round() as u64;
    match &outcome {
        Ok(_) => tracing::info!(
            operation = operation_name,
            duration_ms,
            "Operation completed"
        ),
        Err(e) => tracing::warn!(
            operation = operation_name,
            duration_ms,
            error = %e,
            "Operation failed"
        ),
    }

    OperationResult {
        outcome,
        metrics: OperationMetrics {
            operation_name: operation_name.to_string(),
            duration_ms,
            started_at,
        },
    }
}

/// Token accounting reported by the generative-language API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,

    #[serde(default)]
    pub candidates_token_count: u32,

    #[serde(default)]
    pub total_token_count: u32,
}

/// Pull usage metadata out of a raw API response.
///
/// Looks under `response.usageMetadata` first, then a top-level
/// `usageMetadata`. Absent or malformed metadata yields `None`. The Gemini
/// provider runs every response body through this before decoding the rest.
pub fn extract_usage_metadata(response: &JsonValue) -> Option<UsageMetadata> {
    let usage = response
        .get("response")
        .and_then(|inner| inner.get("usageMetadata"))
        .or_else(|| response.get("usageMetadata"))?;

    serde_json::from_value(usage.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use thiserror::Error;

    #[derive(Error, Debug, PartialEq)]
    #[error("model unavailable: {0}")]
    struct Unavailable(String);

    #[tokio::test(start_paused = true)]
    async fn test_measures_simulated_delay() {
        let result = measure_async("slow_call", || async {
            tokio::time::sleep(Duration::from_millis(150)).await;
            Ok::<_, Unavailable>("roasted")
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(result.ok(), Some(&"roasted"));
        assert_eq!(result.metrics.operation_name, "slow_call");
        let drift = result.metrics.duration_ms.abs_diff(150);
        assert!(drift <= 20, "duration {} ms", result.metrics.duration_ms);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_is_passed_through_unchanged() {
        let result = measure_async("failing_call", || async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            Err::<(), _>(Unavailable("quota".to_string()))
        })
        .await;

        assert!(!result.is_ok());
        assert_eq!(result.err(), Some(&Unavailable("quota".to_string())));
        assert!(result.metrics.duration_ms.abs_diff(40) <= 20);
    }

    #[tokio::test]
    async fn test_operation_invoked_once() {
        let mut calls = 0;
        let result = measure_async("counted", || {
            calls += 1;
            async { Ok::<_, Unavailable>(()) }
        })
        .await;

        assert!(result.into_outcome().is_ok());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_started_at_precedes_completion() {
        let before = Utc::now();
        let result = measure_async("instant", || async { Ok::<_, Unavailable>(1) }).await;
        assert!(result.metrics.started_at >= before);
        assert!(result.metrics.started_at <= Utc::now());
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let metrics = OperationMetrics {
            operation_name: "zero_shot".to_string(),
            duration_ms: 12,
            started_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["operationName"], "zero_shot");
        assert_eq!(json["durationMs"], 12);
        assert_eq!(json["startedAt"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_extract_nested_usage() {
        let raw = serde_json::json!({
            "response": {
                "usageMetadata": {
                    "promptTokenCount": 42,
                    "candidatesTokenCount": 17,
                    "totalTokenCount": 59
                }
            }
        });
        let usage = extract_usage_metadata(&raw).unwrap();
        assert_eq!(usage.prompt_token_count, 42);
        assert_eq!(usage.candidates_token_count, 17);
        assert_eq!(usage.total_token_count, 59);
    }

    #[test]
    fn test_extract_top_level_usage() {
        let raw = serde_json::json!({
            "usageMetadata": {"promptTokenCount": 5, "totalTokenCount": 5}
        });
        let usage = extract_usage_metadata(&raw).unwrap();
        assert_eq!(usage.candidates_token_count, 0);
        assert_eq!(usage.total_token_count, 5);
    }

    #[test]
    fn test_extract_missing_or_malformed_usage() {
        assert_eq!(extract_usage_metadata(&serde_json::json!({})), None);
        assert_eq!(extract_usage_metadata(&serde_json::json!(null)), None);
        let malformed = serde_json::json!({"usageMetadata": {"promptTokenCount": "many"}});
        assert_eq!(extract_usage_metadata(&malformed), None);
    }
}
