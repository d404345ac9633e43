//! System/User prompt built on the RTFC rubric (Role, Task, Format, Context).
//!
//! The system block is static; the user block is rendered per call. Both
//! are concatenated into a single outbound message since the model call has
//! no separate system channel.

use serde::{Deserialize, Serialize};

use crate::types::{RenderedPrompt, Strategy};

use super::{join_sections, PromptTemplate, DEFAULT_SUBJECT};

/// Static system persona and RTFC rules.
pub const SYSTEM_PROMPT: &str = r#"You are Roastify, an AI-powered roast comedy generator with the following characteristics:

ROLE (R):
- A witty, good-natured roast comic
- Expert in playful wordplay and clever metaphors
- Maintains a PG-13, non-offensive tone
- Specializes in light-hearted, creative roasts

TASK (T):
- Generate humorous roasts based on user-provided subjects
- Ensure content is playful, not hurtful
- Maintain consistent quality and style
- Adapt tone and approach based on context

FORMAT (F):
- Respond with concise, punchy roasts (≤ 25 words)
- Use creative metaphors and wordplay
- Structure responses clearly and engagingly
- Provide one main roast per request

CONTEXT (C):
- Target audience: General public seeking entertainment
- Content guidelines: No hate speech, slurs, or explicit content
- Style preference: Clever, witty, and memorable
- Safety: Always err on the side of playful rather than offensive"#;

/// Per-call user request; `{user_subject}` is replaced with the subject.
pub const USER_PROMPT: &str = r#"Based on the RTFC framework established in the system prompt, please roast the following subject:

SUBJECT: {user_subject}

Please provide:
1. A main roast (≤ 25 words)
2. The tone/style used
3. Any notable wordplay or metaphors

Remember to stay within the established role, task, format, and context parameters."#;

const CLOSING: &str = "Please respond according to the RTFC framework guidelines.";

/// Which of the two fixed format instructions to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreference {
    #[default]
    Standard,
    Detailed,
}

impl FormatPreference {
    pub fn instructions(&self) -> &'static str {
        match self {
            FormatPreference::Detailed => "Include tone analysis and metaphor breakdown",
            FormatPreference::Standard => "Focus on the main roast delivery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemUserPrompt {
    pub subject: String,
    pub specific_task: String,
    pub additional_context: String,
    pub format_preference: FormatPreference,
}

impl Default for SystemUserPrompt {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            specific_task: "Generate a roast".to_string(),
            additional_context: String::new(),
            format_preference: FormatPreference::Standard,
        }
    }
}

impl SystemUserPrompt {
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Default::default()
        }
    }

    /// The static system block.
    pub fn system_block(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// The per-call user block.
    pub fn user_block(&self) -> String {
        let request = USER_PROMPT.replacen("{user_subject}", &self.subject, 1);
        let mut block = format!(
            "USER REQUEST:\n{}\n\nSPECIFIC TASK: {}\nFORMAT PREFERENCE: {}",
            request,
            self.specific_task,
            self.format_preference.instructions()
        );
        if !self.additional_context.is_empty() {
            block.push_str("\nADDITIONAL CONTEXT: ");
            block.push_str(&self.additional_context);
        }
        block
    }
}

impl PromptTemplate for SystemUserPrompt {
    fn strategy(&self) -> Strategy {
        Strategy::SystemUser
    }

    fn render(&self) -> RenderedPrompt {
        join_sections([
            self.system_block().to_string(),
            self.user_block(),
            CLOSING.to_string(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_concatenated_in_order() {
        let prompt = SystemUserPrompt::for_subject("my playlist");
        let text = prompt.render().into_string();
        assert!(text.starts_with("You are Roastify, an AI-powered roast comedy generator"));
        let system_end = text.find("USER REQUEST:").unwrap();
        assert!(text[..system_end].contains("CONTEXT (C):"));
        assert!(text.contains("SUBJECT: my playlist"));
        assert!(!text.contains("{user_subject}"));
        assert!(text.ends_with(CLOSING));
    }

    #[test]
    fn test_format_preference_variants() {
        let standard = SystemUserPrompt::default().render().into_string();
        assert!(standard.contains("FORMAT PREFERENCE: Focus on the main roast delivery"));

        let detailed = SystemUserPrompt {
            format_preference: FormatPreference::Detailed,
            ..Default::default()
        }
        .render()
        .into_string();
        assert!(detailed
            .contains("FORMAT PREFERENCE: Include tone analysis and metaphor breakdown"));
    }

    #[test]
    fn test_additional_context_only_when_present() {
        let without = SystemUserPrompt::default().user_block();
        assert!(!without.contains("ADDITIONAL CONTEXT"));

        let with = SystemUserPrompt {
            additional_context: "It's a birthday party".to_string(),
            ..Default::default()
        }
        .user_block();
        assert!(with.ends_with("ADDITIONAL CONTEXT: It's a birthday party"));
    }

    #[test]
    fn test_format_preference_serde() {
        let prompt: SystemUserPrompt =
            serde_json::from_str(r#"{"formatPreference": "detailed"}"#).unwrap();
        assert_eq!(prompt.format_preference, FormatPreference::Detailed);
        assert_eq!(prompt.subject, DEFAULT_SUBJECT);
    }
}
