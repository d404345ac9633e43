//! Multi-shot prompt: several worked examples, rendered in order.

use serde::{Deserialize, Serialize};

use crate::types::{Example, RenderedPrompt, Strategy};

use super::{
    default_constraints, default_style_hints, example_blocks, join_sections, numbered_list,
    section, PromptTemplate, DEFAULT_PERSONA, DEFAULT_SUBJECT,
};

/// Options for the multi-shot template. No cap on the number of shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiShotPrompt {
    pub persona: String,
    pub task: String,
    pub subject: String,
    pub constraints: Vec<String>,
    pub style_hints: Vec<String>,
    pub shots: Vec<Example>,
}

impl Default for MultiShotPrompt {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            task: "Given a SUBJECT, produce one clever, playful roast in ≤ 25 words.".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            constraints: default_constraints(),
            style_hints: default_style_hints(),
            shots: vec![
                Example::new(
                    "My Wi-Fi speed",
                    "Your Wi-Fi moves like a mystery novel—lots of suspense, zero resolution.",
                ),
                Example::new(
                    "My morning routine",
                    "You hit snooze like it's a slot machine—pulling the lever and still losing time.",
                ),
                Example::new(
                    "My coding style",
                    "Your code reads like a haunted house—too many ghosts and nobody knows who called who.",
                ),
            ],
        }
    }
}

impl MultiShotPrompt {
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }
}

impl PromptTemplate for MultiShotPrompt {
    fn strategy(&self) -> Strategy {
        Strategy::MultiShot
    }

    fn render(&self) -> RenderedPrompt {
        join_sections([
            self.persona.clone(),
            section("Task", &self.task),
            section("Constraints", &numbered_list(&self.constraints)),
            section("Style Hints", &numbered_list(&self.style_hints)),
            section(
                "Few-shot Examples",
                &example_blocks(&self.shots, "Input (SUBJECT)", "Output (ROAST)"),
            ),
            format!("Now respond in the same style.\nSUBJECT: {}\nROAST:", self.subject),
        ])
    }
}
