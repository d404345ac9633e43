//! Prompt templates.
//!
//! Each prompting strategy is a plain options struct whose `Default` carries
//! that strategy's stock persona, task, constraints and examples. Rendering
//! is pure: identical options always produce a byte-identical prompt.
//!
//! Shared layout rules:
//! - constraints, style hints and stop sequences render as `"<n>. <item>"`
//!   lines starting at 1; an empty list still renders its heading
//! - few-shot blocks are labelled `Example <n>` and separated by a blank line
//! - sections are separated by a blank line and the result is trimmed

use crate::types::{Example, GenerationSettings, RenderedPrompt, Strategy};

mod dynamic;
mod multi_shot;
mod one_shot;
mod stop_sequence;
mod structured;
mod system_user;
mod temperature;
mod top_p;
mod zero_shot;

pub use dynamic::DynamicPrompt;
pub use multi_shot::MultiShotPrompt;
pub use one_shot::OneShotPrompt;
pub use stop_sequence::{api_stop_sequences, StopSequencePrompt};
pub use structured::StructuredOutputPrompt;
pub use system_user::{FormatPreference, SystemUserPrompt, SYSTEM_PROMPT, USER_PROMPT};
pub use temperature::TemperaturePrompt;
pub use top_p::TopPPrompt;
pub use zero_shot::{ZeroShotPrompt, ZERO_SHOT_PROMPT};

/// Persona shared by every parameterized template.
pub const DEFAULT_PERSONA: &str = "You are Roastify, a witty, good-natured roast comic.";

/// Subject used when the caller supplies none.
pub const DEFAULT_SUBJECT: &str = "a generic user";

/// A renderable prompting strategy.
pub trait PromptTemplate {
    /// The strategy this template implements.
    fn strategy(&self) -> Strategy;

    /// Render the instruction text.
    fn render(&self) -> RenderedPrompt;

    /// Generation parameters to send alongside the prompt.
    ///
    /// Empty for strategies that only shape the prompt text.
    fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings::default()
    }
}

/// Render `items` as a 1-indexed numbered list, one item per line.
pub fn numbered_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render labelled few-shot examples, blank-line separated.
pub(crate) fn example_blocks(examples: &[Example], input_label: &str, output_label: &str) -> String {
    examples
        .iter()
        .enumerate()
        .map(|(i, ex)| {
            format!(
                "Example {}\n- {}: {}\n- {}: {}",
                i + 1,
                input_label,
                ex.input,
                output_label,
                ex.output
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Join non-empty sections with blank lines and trim the result.
pub(crate) fn join_sections<I, S>(sections: I) -> RenderedPrompt
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let body = sections
        .into_iter()
        .filter(|s| !s.as_ref().trim().is_empty())
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
    RenderedPrompt::new(body)
}

/// A `Heading:` line followed by its body.
pub(crate) fn section(heading: &str, body: &str) -> String {
    format!("{heading}:\n{body}")
}

pub(crate) fn default_constraints() -> Vec<String> {
    vec![
        "No hate speech or slurs".to_string(),
        "Avoid explicit content".to_string(),
        "Keep tone playful and non-abusive".to_string(),
    ]
}

pub(crate) fn default_style_hints() -> Vec<String> {
    vec![
        "Prefer wordplay and metaphors".to_string(),
        "Be concise".to_string(),
    ]
}

pub(crate) fn cooking_example() -> Example {
    Example::new(
        "My cooking skills",
        "Your kitchen is a crime scene—evidence of good intentions, but the results are always suspicious.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_numbered_list_format() {
        let items = vec!["first", "second", "third"];
        assert_eq!(numbered_list(&items), "1. first\n2. second\n3. third");
    }

    #[test]
    fn test_numbered_list_empty() {
        let items: Vec<String> = vec![];
        assert_eq!(numbered_list(&items), "");
    }

    #[test]
    fn test_example_blocks_separated_by_blank_line() {
        let examples = vec![Example::new("a", "b"), Example::new("c", "d")];
        let block = example_blocks(&examples, "Input", "Output");
        assert_eq!(
            block,
            "Example 1\n- Input: a\n- Output: b\n\nExample 2\n- Input: c\n- Output: d"
        );
    }

    #[test]
    fn test_join_sections_skips_blank() {
        let prompt = join_sections(["  one", "", "two  "]);
        assert_eq!(prompt.as_str(), "one\n\ntwo");
    }

    proptest! {
        #[test]
        fn prop_numbered_list_has_one_line_per_item(
            items in prop::collection::vec("[a-zA-Z ,]{1,30}", 1..12)
        ) {
            let rendered = numbered_list(&items);
            let lines: Vec<&str> = rendered.split('\n').collect();
            prop_assert_eq!(lines.len(), items.len());
            for (i, (line, item)) in lines.iter().zip(items.iter()).enumerate() {
                let expected = format!("{}. {}", i + 1, item);
                prop_assert_eq!(*line, expected.as_str());
            }
        }

        #[test]
        fn prop_rendering_is_deterministic(
            subject in "[a-zA-Z ]{1,40}",
            constraints in prop::collection::vec("[a-z ]{1,20}", 0..5),
            temperature in 0.0f64..1.0,
        ) {
            let dynamic = DynamicPrompt {
                subject: subject.clone(),
                constraints: constraints.clone(),
                ..Default::default()
            };
            prop_assert_eq!(dynamic.render(), dynamic.clone().render());

            let temp = TemperaturePrompt {
                subject,
                constraints,
                temperature,
                ..Default::default()
            };
            prop_assert_eq!(temp.render(), temp.clone().render());
        }
    }
}
