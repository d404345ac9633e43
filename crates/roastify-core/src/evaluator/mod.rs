//! Response evaluators.
//!
//! Every evaluator inspects text that has already been received; none of
//! them calls the model again. They are total over their inputs: malformed
//! or unsafe responses produce low-confidence verdicts, never errors. The
//! only fallible entry points are the batch analyses, which need at least
//! two responses.

mod compliance;
mod correctness;
mod impact;
pub mod patterns;
mod structured;

pub use compliance::{
    validate_rtfc_compliance, ComplianceReport, RtfcCheck, COMPLIANCE_THRESHOLD,
    MAX_FORMAT_CHARS, MAX_TASK_CHARS,
};
pub use correctness::{basic_correctness_check, CorrectnessVerdict, MIN_RESPONSE_CHARS};
pub use impact::{
    analyze_temperature_impact, analyze_top_p_impact, compare_top_p_vs_temperature,
    AnalysisError, SamplingComparison, TemperatureImpact, TopPImpact, MIN_RESPONSES,
};
pub use structured::{
    validate_structured_output, StructuredVerdict, MAX_ROAST_WORDS, REQUIRED_FIELDS,
};
