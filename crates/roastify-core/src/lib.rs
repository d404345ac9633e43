//! # roastify-core
//!
//! Deterministic prompt construction and response evaluation for roast
//! generation.
//!
//! This crate covers the two pure halves of the pipeline:
//! - **Templates** render a prompt string from a strategy's options
//!   (zero-shot, dynamic, one-shot, multi-shot, stop-sequence, structured
//!   output, system/user, temperature, top-p)
//! - **Evaluators** classify the text that came back (length sanity,
//!   JSON-shape validation, RTFC compliance, sampling-sweep statistics)
//!
//! The model call itself lives in `roastify-runtime`.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same options always render the same prompt
//! 2. **No I/O**: nothing here talks to the network
//! 3. **Total evaluators**: malformed responses become invalid verdicts
//!
//! ## Example
//!
//! ```rust
//! use roastify_core::{validate_structured_output, PromptTemplate, StructuredOutputPrompt};
//!
//! let prompt = StructuredOutputPrompt::for_subject("my houseplants").render();
//! assert!(prompt.as_str().ends_with("RESPONSE (JSON only):"));
//!
//! let verdict = validate_structured_output("not json");
//! assert!(!verdict.is_valid);
//! assert_eq!(verdict.reason, "Invalid JSON format");
//! ```

pub mod config;
pub mod evaluator;
pub mod sampling;
pub mod templates;
pub mod types;

// Re-export main types at crate root
pub use config::{ConfigError, PromptConfig};
pub use evaluator::{
    analyze_temperature_impact, analyze_top_p_impact, basic_correctness_check,
    compare_top_p_vs_temperature, validate_rtfc_compliance, validate_structured_output,
    AnalysisError, ComplianceReport, CorrectnessVerdict, RtfcCheck, SamplingComparison,
    StructuredVerdict, TemperatureImpact, TopPImpact,
};
pub use sampling::{
    temperature_description, temperature_point, temperature_settings, top_p_description,
    top_p_point, top_p_settings, Sampling, SamplingPoint, SamplingTier,
};
pub use templates::{
    api_stop_sequences, numbered_list, DynamicPrompt, FormatPreference, MultiShotPrompt,
    OneShotPrompt, PromptTemplate, StopSequencePrompt, StructuredOutputPrompt, SystemUserPrompt,
    TemperaturePrompt, TopPPrompt, ZeroShotPrompt,
};
pub use types::{
    Example, ExampleOutput, GenerationSettings, RenderedPrompt, RoastRecord, Strategy,
};
