//! Temperature prompt.
//!
//! The temperature appears twice: in the prompt text, with its tier
//! description, and as the out-of-band generation parameter.

use serde::{Deserialize, Serialize};

use crate::sampling::Sampling;
use crate::types::{Example, GenerationSettings, RenderedPrompt, Strategy};

use super::{
    cooking_example, default_constraints, join_sections, numbered_list, section, PromptTemplate,
    DEFAULT_PERSONA, DEFAULT_SUBJECT,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemperaturePrompt {
    pub persona: String,
    pub task: String,
    pub subject: String,
    pub temperature: f64,
    pub constraints: Vec<String>,
    pub style_hints: Vec<String>,
    pub example: Example,
}

impl Default for TemperaturePrompt {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            task: "Given a SUBJECT, produce one clever, playful roast.".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            temperature: 0.7,
            constraints: default_constraints(),
            style_hints: vec![
                "Prefer wordplay and metaphors".to_string(),
                "Be concise (≤ 25 words)".to_string(),
            ],
            example: cooking_example(),
        }
    }
}

impl TemperaturePrompt {
    pub fn new(subject: impl Into<String>, temperature: f64) -> Self {
        Self {
            subject: subject.into(),
            temperature,
            ..Default::default()
        }
    }
}

impl PromptTemplate for TemperaturePrompt {
    fn strategy(&self) -> Strategy {
        Strategy::Temperature
    }

    fn render(&self) -> RenderedPrompt {
        let sampling = Sampling::Temperature(self.temperature);
        join_sections([
            self.persona.clone(),
            section("Task", &self.task),
            format!(
                "Temperature Setting: {} ({})",
                self.temperature,
                sampling.description()
            ),
            section("Constraints", &numbered_list(&self.constraints)),
            section("Style Hints", &numbered_list(&self.style_hints)),
            format!(
                "Example:\n- Input (SUBJECT): {}\n- Output (ROAST): {}",
                self.example.input, self.example.output
            ),
            format!(
                "Now respond in the same style with temperature {}.\nSUBJECT: {}\nROAST:",
                self.temperature, self.subject
            ),
        ])
    }

    fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings::with_temperature(self.temperature)
    }
}
