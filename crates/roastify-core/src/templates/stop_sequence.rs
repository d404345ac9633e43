//! Stop-sequence prompt.
//!
//! The stop list embedded in the prompt text and the list sent as a
//! generation parameter are independent: the API list is always the fixed
//! five-token superset from [`api_stop_sequences`].

use serde::{Deserialize, Serialize};

use crate::types::{Example, GenerationSettings, RenderedPrompt, Strategy};

use super::{
    cooking_example, default_constraints, default_style_hints, join_sections, numbered_list,
    section, PromptTemplate, DEFAULT_PERSONA, DEFAULT_SUBJECT,
};

/// Stop tokens sent to the model API.
pub fn api_stop_sequences() -> Vec<String> {
    ["END", "STOP", "FINISH", "DONE", "COMPLETE"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StopSequencePrompt {
    pub persona: String,
    pub task: String,
    pub subject: String,
    pub constraints: Vec<String>,
    pub style_hints: Vec<String>,
    pub example: Example,
    pub stop_sequences: Vec<String>,
}

impl Default for StopSequencePrompt {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            task: "Given a SUBJECT, produce one clever, playful roast in ≤ 25 words.".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            constraints: default_constraints(),
            style_hints: default_style_hints(),
            example: cooking_example(),
            stop_sequences: vec!["END".to_string(), "STOP".to_string(), "FINISH".to_string()],
        }
    }
}

impl StopSequencePrompt {
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }
}

impl PromptTemplate for StopSequencePrompt {
    fn strategy(&self) -> Strategy {
        Strategy::StopSequence
    }

    fn render(&self) -> RenderedPrompt {
        join_sections([
            self.persona.clone(),
            section("Task", &self.task),
            section("Constraints", &numbered_list(&self.constraints)),
            section("Style Hints", &numbered_list(&self.style_hints)),
            section(
                "Stop Sequences (use these to end your response)",
                &numbered_list(&self.stop_sequences),
            ),
            format!(
                "One-shot Example:\n- Input (SUBJECT): {}\n- Output (ROAST): {}",
                self.example.input, self.example.output
            ),
            format!("Now respond in the same style.\nSUBJECT: {}\nROAST:", self.subject),
        ])
    }

    fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings::with_stop_sequences(api_stop_sequences())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_configured_stops() {
        let text = StopSequencePrompt::default().render().into_string();
        assert!(text.contains(
            "Stop Sequences (use these to end your response):\n1. END\n2. STOP\n3. FINISH"
        ));
        assert!(!text.contains("DONE"));
    }

    #[test]
    fn test_api_stops_are_independent_of_prompt() {
        let prompt = StopSequencePrompt {
            stop_sequences: vec!["###".to_string()],
            ..Default::default()
        };
        assert!(prompt.render().as_str().contains("1. ###"));
        assert_eq!(
            prompt.generation_settings().stop_sequences,
            vec!["END", "STOP", "FINISH", "DONE", "COMPLETE"]
        );
    }
}
