//! Value objects shared by the template engine and the evaluators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The prompting strategy a template implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    ZeroShot,
    Dynamic,
    OneShot,
    MultiShot,
    StopSequence,
    StructuredOutput,
    SystemUser,
    Temperature,
    TopP,
}

impl Strategy {
    /// Every strategy, in demonstration order.
    pub const ALL: [Strategy; 9] = [
        Strategy::ZeroShot,
        Strategy::Dynamic,
        Strategy::OneShot,
        Strategy::MultiShot,
        Strategy::StopSequence,
        Strategy::StructuredOutput,
        Strategy::SystemUser,
        Strategy::Temperature,
        Strategy::TopP,
    ];

    /// Snake-case identifier, matching the serialized form.
    pub fn id(&self) -> &'static str {
        match self {
            Strategy::ZeroShot => "zero_shot",
            Strategy::Dynamic => "dynamic",
            Strategy::OneShot => "one_shot",
            Strategy::MultiShot => "multi_shot",
            Strategy::StopSequence => "stop_sequence",
            Strategy::StructuredOutput => "structured_output",
            Strategy::SystemUser => "system_user",
            Strategy::Temperature => "temperature",
            Strategy::TopP => "top_p",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::ZeroShot => "Zero-shot",
            Strategy::Dynamic => "Dynamic",
            Strategy::OneShot => "One-shot",
            Strategy::MultiShot => "Multi-shot",
            Strategy::StopSequence => "Stop sequence",
            Strategy::StructuredOutput => "Structured output",
            Strategy::SystemUser => "System/User (RTFC)",
            Strategy::Temperature => "Temperature",
            Strategy::TopP => "Top P",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully interpolated instruction, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderedPrompt(String);

impl RenderedPrompt {
    /// Wrap rendered text, trimming leading and trailing whitespace.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for RenderedPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five-field record a structured roast response carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastRecord {
    pub roast: String,
    pub tone: String,
    pub word_count: u32,
    pub metaphor: String,
    pub category: String,
}

/// Output side of a worked example: plain roast text or a structured record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExampleOutput {
    Text(String),
    Structured(RoastRecord),
}

impl fmt::Display for ExampleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExampleOutput::Text(text) => f.write_str(text),
            ExampleOutput::Structured(record) => {
                let json = serde_json::to_string(record).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<&str> for ExampleOutput {
    fn from(text: &str) -> Self {
        ExampleOutput::Text(text.to_string())
    }
}

impl From<String> for ExampleOutput {
    fn from(text: String) -> Self {
        ExampleOutput::Text(text)
    }
}

impl From<RoastRecord> for ExampleOutput {
    fn from(record: RoastRecord) -> Self {
        ExampleOutput::Structured(record)
    }
}

/// A worked input/output pair used for few-shot conditioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: ExampleOutput,
}

impl Example {
    pub fn new(input: impl Into<String>, output: impl Into<ExampleOutput>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Generation parameters sent out-of-band alongside a rendered prompt.
///
/// Temperature, top-p and stop sequences may also appear inside the prompt
/// text; the two copies are independent and are allowed to differ.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}

impl GenerationSettings {
    pub fn with_temperature(temperature: f64) -> Self {
        Self {
            temperature: Some(temperature),
            ..Default::default()
        }
    }

    pub fn with_top_p(top_p: f64) -> Self {
        Self {
            top_p: Some(top_p),
            ..Default::default()
        }
    }

    pub fn with_stop_sequences<I, S>(stop_sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stop_sequences: stop_sequences.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// True when no parameter would be sent.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.stop_sequences.is_empty()
    }
}
