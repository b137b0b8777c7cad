use async_trait::async_trait;

use super::{AnswerGenerator, AnswerPrompt, LlmError};
use crate::models::AnswerSource;

/// Deterministic answers built straight from FAQ text. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Reply used when no FAQ matched at all.
    pub fn insufficient_information(support_contact: &str) -> String {
        format!(
            "I'm sorry, I don't have enough information to answer that question. \
             Please contact {support_contact} for assistance."
        )
    }

    /// Surface the top-ranked FAQ as-is.
    pub fn answer_from_prompt(prompt: &AnswerPrompt) -> String {
        match prompt.faqs.first() {
            Some(top) => format!(
                "I found some information that might be helpful:\n\n{}\n{}\n\n\
                 If this doesn't answer your question, please contact {}.",
                top.question.trim(),
                top.answer.trim(),
                prompt.support_contact
            ),
            None => Self::insufficient_information(&prompt.support_contact),
        }
    }
}

#[async_trait]
impl AnswerGenerator for FallbackGenerator {
    async fn complete(&self, prompt: &AnswerPrompt) -> Result<String, LlmError> {
        Ok(Self::answer_from_prompt(prompt))
    }

    fn source(&self) -> AnswerSource {
        AnswerSource::Fallback
    }
}
