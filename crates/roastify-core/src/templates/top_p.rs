//! Top-p prompt. Same in-text plus out-of-band duplication as temperature.

use serde::{Deserialize, Serialize};

use crate::sampling::Sampling;
use crate::types::{Example, GenerationSettings, RenderedPrompt, Strategy};

use super::{
    cooking_example, default_constraints, join_sections, numbered_list, section, PromptTemplate,
    DEFAULT_PERSONA, DEFAULT_SUBJECT,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopPPrompt {
    pub persona: String,
    pub task: String,
    pub subject: String,
    pub top_p: f64,
    pub constraints: Vec<String>,
    pub style_hints: Vec<String>,
    pub example: Example,
}

impl Default for TopPPrompt {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            task: "Given a SUBJECT, produce one clever, playful roast.".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            top_p: 0.8,
            constraints: default_constraints(),
            style_hints: vec![
                "Prefer wordplay and metaphors".to_string(),
                "Be concise (≤ 25 words)".to_string(),
            ],
            example: cooking_example(),
        }
    }
}

impl TopPPrompt {
    pub fn new(subject: impl Into<String>, top_p: f64) -> Self {
        Self {
            subject: subject.into(),
            top_p,
            ..Default::default()
        }
    }
}

impl PromptTemplate for TopPPrompt {
    fn strategy(&self) -> Strategy {
        Strategy::TopP
    }

    fn render(&self) -> RenderedPrompt {
        let sampling = Sampling::TopP(self.top_p);
        join_sections([
            self.persona.clone(),
            section("Task", &self.task),
            format!("Top P Setting: {} ({})", self.top_p, sampling.description()),
            section("Constraints", &numbered_list(&self.constraints)),
            section("Style Hints", &numbered_list(&self.style_hints)),
            format!(
                "Example:\n- Input (SUBJECT): {}\n- Output (ROAST): {}",
                self.example.input, self.example.output
            ),
            format!(
                "Now respond in the same style with Top P {}.\nSUBJECT: {}\nROAST:",
                self.top_p, self.subject
            ),
        ])
    }

    fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings::with_top_p(self.top_p)
    }
}
