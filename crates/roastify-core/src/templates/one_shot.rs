//! One-shot prompt: exactly one worked example.

use serde::{Deserialize, Serialize};

use crate::types::{Example, RenderedPrompt, Strategy};

use super::{
    default_constraints, default_style_hints, join_sections, numbered_list, section,
    PromptTemplate, DEFAULT_PERSONA, DEFAULT_SUBJECT,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OneShotPrompt {
    pub persona: String,
    pub task: String,
    pub subject: String,
    pub constraints: Vec<String>,
    pub style_hints: Vec<String>,
    pub example: Example,
}

impl Default for OneShotPrompt {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            task: "Given a SUBJECT, produce one clever, playful roast in ≤ 22 words.".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            constraints: default_constraints(),
            style_hints: default_style_hints(),
            example: Example::new(
                "My wardrobe choices",
                "Your outfits are plot twists—everyone's surprised, and somehow the ending still doesn't make sense.",
            ),
        }
    }
}

impl OneShotPrompt {
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }
}

impl PromptTemplate for OneShotPrompt {
    fn strategy(&self) -> Strategy {
        Strategy::OneShot
    }

    fn render(&self) -> RenderedPrompt {
        join_sections([
            self.persona.clone(),
            section("Task", &self.task),
            section("Constraints", &numbered_list(&self.constraints)),
            section("Style Hints", &numbered_list(&self.style_hints)),
            format!(
                "One-shot Example:\n- Input (SUBJECT): {}\n- Output (ROAST): {}",
                self.example.input, self.example.output
            ),
            format!("Now respond in the same style.\nSUBJECT: {}\nROAST:", self.subject),
        ])
    }
}
