//! Structured-output prompt: asks for a JSON object with five fields.

use serde::{Deserialize, Serialize};

use crate::types::{Example, RenderedPrompt, RoastRecord, Strategy};

use super::{
    default_constraints, default_style_hints, join_sections, numbered_list, section,
    PromptTemplate, DEFAULT_PERSONA, DEFAULT_SUBJECT,
};

const FORMAT_INSTRUCTIONS: &str = "You must respond with a valid JSON object containing:
- roast: The main roast text (≤ 25 words)
- tone: The emotional tone used (playful, witty, clever, etc.)
- wordCount: Exact word count of the roast
- metaphor: The main metaphor or figure of speech used
- category: The category this roast falls into";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructuredOutputPrompt {
    pub persona: String,
    pub task: String,
    pub subject: String,
    pub constraints: Vec<String>,
    pub style_hints: Vec<String>,
    pub example: Example,
}

impl Default for StructuredOutputPrompt {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            task: "Given a SUBJECT, produce a structured roast response.".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            constraints: default_constraints(),
            style_hints: default_style_hints(),
            example: Example::new(
                "My cooking skills",
                RoastRecord {
                    roast: "Your kitchen is a crime scene—evidence of good intentions, but the results are always suspicious.".to_string(),
                    tone: "playful".to_string(),
                    word_count: 18,
                    metaphor: "crime scene".to_string(),
                    category: "domestic skills".to_string(),
                },
            ),
        }
    }
}

impl StructuredOutputPrompt {
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }
}

impl PromptTemplate for StructuredOutputPrompt {
    fn strategy(&self) -> Strategy {
        Strategy::StructuredOutput
    }

    fn render(&self) -> RenderedPrompt {
        let example_json = serde_json::to_string_pretty(&self.example.output)
            .unwrap_or_else(|_| self.example.output.to_string());

        join_sections([
            self.persona.clone(),
            section("Task", &self.task),
            section("Constraints", &numbered_list(&self.constraints)),
            section("Style Hints", &numbered_list(&self.style_hints)),
            section("Structured Output Format", FORMAT_INSTRUCTIONS),
            format!(
                "Example:\n- Input (SUBJECT): {}\n- Output (JSON): {}",
                self.example.input, example_json
            ),
            format!(
                "Now respond in the same structured format.\nSUBJECT: {}\nRESPONSE (JSON only):",
                self.subject
            ),
        ])
    }
}
