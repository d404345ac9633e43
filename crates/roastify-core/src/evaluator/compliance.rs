//! RTFC (Role, Task, Format, Context) compliance scoring.
//!
//! Four independent boolean checks, each worth 25 points; a response is
//! compliant at 75 or above.
//!
//! The format check accepts either a mention of the subject or a response of
//! at most 25 *characters*. The 25 matches the word limit given to the model,
//! but it is compared against character length. Kept as a known loose
//! heuristic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::patterns::{char_len, contains_any, ROLE_MARKERS, UNSAFE_MARKERS};

/// Responses at or above this length fail the task check.
pub const MAX_TASK_CHARS: usize = 200;

/// Responses at or below this length pass the format check.
pub const MAX_FORMAT_CHARS: usize = 25;

/// Minimum score for compliance.
pub const COMPLIANCE_THRESHOLD: f64 = 75.0;

/// One of the four RTFC checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RtfcCheck {
    RoleCompliance,
    TaskCompletion,
    FormatAdherence,
    ContextAppropriateness,
}

impl RtfcCheck {
    pub const ALL: [RtfcCheck; 4] = [
        RtfcCheck::RoleCompliance,
        RtfcCheck::TaskCompletion,
        RtfcCheck::FormatAdherence,
        RtfcCheck::ContextAppropriateness,
    ];

    fn passes(&self, response: &str, subject: &str) -> bool {
        match self {
            RtfcCheck::RoleCompliance => contains_any(response, ROLE_MARKERS),
            RtfcCheck::TaskCompletion => {
                let len = char_len(response);
                len > 0 && len < MAX_TASK_CHARS
            }
            RtfcCheck::FormatAdherence => {
                response.contains(subject) || char_len(response) <= MAX_FORMAT_CHARS
            }
            RtfcCheck::ContextAppropriateness => !contains_any(response, UNSAFE_MARKERS),
        }
    }
}

impl fmt::Display for RtfcCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RtfcCheck::RoleCompliance => "roleCompliance",
            RtfcCheck::TaskCompletion => "taskCompletion",
            RtfcCheck::FormatAdherence => "formatAdherence",
            RtfcCheck::ContextAppropriateness => "contextAppropriateness",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub is_compliant: bool,

    /// Percentage of checks passed, 0-100.
    pub score: f64,

    pub checks: BTreeMap<RtfcCheck, bool>,
    pub feedback: String,
}

impl ComplianceReport {
    pub fn passed(&self) -> usize {
        self.checks.values().filter(|passed| **passed).count()
    }
}

/// Score a response against the RTFC rubric for `subject`.
pub fn validate_rtfc_compliance(response: &str, subject: &str) -> ComplianceReport {
    let checks: BTreeMap<RtfcCheck, bool> = RtfcCheck::ALL
        .iter()
        .map(|check| (*check, check.passes(response, subject)))
        .collect();

    let passed = checks.values().filter(|p| **p).count();
    let total = checks.len();
    let score = passed as f64 / total as f64 * 100.0;

    ComplianceReport {
        is_compliant: score >= COMPLIANCE_THRESHOLD,
        score,
        feedback: format!(
            "RTFC Compliance: {}% ({}/{} criteria met)",
            score, passed, total
        ),
        checks,
    }
}
