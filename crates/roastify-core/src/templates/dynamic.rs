//! Dynamic prompt: every section is caller-supplied, examples optional.

use serde::{Deserialize, Serialize};

use crate::types::{Example, RenderedPrompt, Strategy};

use super::{
    example_blocks, join_sections, numbered_list, section, PromptTemplate, DEFAULT_PERSONA,
    DEFAULT_SUBJECT,
};

const CLOSING: &str =
    "Now produce ONE response. If the subject is unsafe or ambiguous, respond safely and keep it playful.";

/// Options for the dynamic template.
///
/// The "Few-shot Guidance" block is left out entirely when `examples` is
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DynamicPrompt {
    pub persona: String,
    pub task: String,
    pub subject: String,
    pub tone: String,
    pub constraints: Vec<String>,
    pub style_hints: Vec<String>,
    pub examples: Vec<Example>,
}

impl Default for DynamicPrompt {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            task: "Roast the provided subject in a single, clever sentence.".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            tone: "playful, clever, and PG-13".to_string(),
            constraints: vec![
                "Be concise (≤ 25 words)".to_string(),
                "No slurs, hate speech, or personal attacks on protected classes".to_string(),
                "Avoid explicit content".to_string(),
            ],
            style_hints: vec![
                "Use a metaphor or simile".to_string(),
                "Prefer wordplay over insults".to_string(),
            ],
            examples: vec![Example::new(
                "My procrastination",
                "Your to-do list thinks it's on a museum tour—lots of staring, zero touching.",
            )],
        }
    }
}

impl DynamicPrompt {
    /// Defaults with the given subject.
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }
}

impl PromptTemplate for DynamicPrompt {
    fn strategy(&self) -> Strategy {
        Strategy::Dynamic
    }

    fn render(&self) -> RenderedPrompt {
        let few_shot = if self.examples.is_empty() {
            String::new()
        } else {
            section(
                "Few-shot Guidance",
                &example_blocks(&self.examples, "Input", "Output"),
            )
        };

        join_sections([
            self.persona.clone(),
            section("Task", &self.task),
            section("Subject", &self.subject),
            section("Tone", &self.tone),
            section("Constraints", &numbered_list(&self.constraints)),
            section("Style Hints", &numbered_list(&self.style_hints)),
            few_shot,
            CLOSING.to_string(),
        ])
    }
}
