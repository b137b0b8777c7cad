//! Answer generation strategies.
//!
//! [`AnswerGenerator`] is the seam between the search pipeline and whatever
//! produces answer text. [`chat::ChatCompletionGenerator`] asks an LLM;
//! [`fallback::FallbackGenerator`] assembles a deterministic answer from the
//! top-ranked FAQ and is what the composer degrades to when the LLM is off
//! or fails.

pub mod chat;
pub mod fallback;
pub mod prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AnswerSource, Faq};

/// Everything a generator needs to answer one question.
#[derive(Debug, Clone)]
pub struct AnswerPrompt {
    /// Sanitized, length-capped user question.
    pub query: String,
    pub system_prompt: String,
    /// Rendered FAQ context block.
    pub context: String,
    /// Matched FAQs, best first.
    pub faqs: Vec<Faq>,
    /// Who to point the customer at, e.g. "our support team at help@acme.test".
    pub support_contact: String,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM API key is not configured")]
    MissingCredentials,
    #[error("Unknown LLM provider: {0}")]
    UnknownProvider(String),
    #[error("LLM request timed out")]
    Timeout,
    #[error("LLM request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("LLM API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("LLM response was malformed: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Transport(e)
        }
    }
}

#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Produce answer text for the prompt. A single attempt, no retries.
    async fn complete(&self, prompt: &AnswerPrompt) -> Result<String, LlmError>;

    /// Where answers from this generator come from.
    fn source(&self) -> AnswerSource;
}
