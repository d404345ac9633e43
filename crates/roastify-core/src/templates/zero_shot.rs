//! Zero-shot prompt: a fixed instruction with no examples.

use crate::types::{RenderedPrompt, Strategy};

use super::PromptTemplate;

/// The literal zero-shot instruction.
pub const ZERO_SHOT_PROMPT: &str = "Give me a funny roast about python snake in 1 line.";

/// Zero-shot template. Not parameterized at call time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroShotPrompt;

impl ZeroShotPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl PromptTemplate for ZeroShotPrompt {
    fn strategy(&self) -> Strategy {
        Strategy::ZeroShot
    }

    fn render(&self) -> RenderedPrompt {
        RenderedPrompt::new(ZERO_SHOT_PROMPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_shot_is_fixed() {
        let prompt = ZeroShotPrompt::new().render();
        assert_eq!(prompt.as_str(), ZERO_SHOT_PROMPT);
        assert!(!prompt.as_str().contains("Example"));
        assert!(ZeroShotPrompt::new().generation_settings().is_empty());
    }
}
