//! Answer Composer and Response Assembler.

use std::sync::Arc;

use crate::config::LlmConfig;
use crate::llm::chat::ChatCompletionGenerator;
use crate::llm::fallback::FallbackGenerator;
use crate::llm::prompt::{build_context_block, build_system_prompt, prepare_query};
use crate::llm::{AnswerGenerator, AnswerPrompt};
use crate::models::{AiSearchData, AnswerResult, CompanySettings, Faq, RelatedFaq};
use crate::search::confidence;

/// Confidence reported for a fallback answer built from a matched FAQ.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

const DEFAULT_SUPPORT_CONTACT: &str = "our support team";

/// Turns matched FAQs into one answer. Tries the primary generator once and
/// degrades to the deterministic fallback on any failure.
pub struct AnswerComposer {
    primary: Option<Arc<dyn AnswerGenerator>>,
    fallback: Arc<dyn AnswerGenerator>,
}

impl AnswerComposer {
    pub fn new(primary: Option<Arc<dyn AnswerGenerator>>) -> Self {
        Self {
            primary,
            fallback: Arc::new(FallbackGenerator::new()),
        }
    }

    /// Replace the deterministic FAQ fallback with another generator.
    pub fn with_fallback(mut self, fallback: Arc<dyn AnswerGenerator>) -> Self {
        self.fallback = fallback;
        self
    }

    /// LLM-backed composer, or fallback-only when the LLM is switched off.
    pub fn from_config(client: reqwest::Client, config: &LlmConfig) -> Self {
        if !config.enabled {
            tracing::info!("LLM answers disabled; using FAQ fallback answers only");
            return Self::new(None);
        }
        Self::new(Some(Arc::new(ChatCompletionGenerator::new(
            client,
            config.clone(),
        ))))
    }

    pub async fn compose(
        &self,
        query: &str,
        matches: &[Faq],
        keywords: &[String],
        support_contact: &str,
    ) -> AnswerResult {
        let prompt = AnswerPrompt {
            query: prepare_query(query),
            system_prompt: build_system_prompt(support_contact),
            context: build_context_block(matches),
            faqs: matches.to_vec(),
            support_contact: support_contact.to_string(),
        };

        if matches.is_empty() {
            return self.fallback_answer(&prompt, 0.0).await;
        }

        if let Some(primary) = &self.primary {
            match primary.complete(&prompt).await {
                Ok(answer) => {
                    let confidence = confidence::round(confidence::score(matches, keywords));
                    tracing::debug!(confidence, "LLM answer generated");
                    return AnswerResult {
                        answer,
                        source: primary.source(),
                        confidence,
                    };
                }
                Err(e) => {
                    tracing::warn!(error = %e, "LLM answer failed; using FAQ fallback");
                }
            }
        }

        self.fallback_answer(&prompt, FALLBACK_CONFIDENCE).await
    }

    async fn fallback_answer(&self, prompt: &AnswerPrompt, confidence: f32) -> AnswerResult {
        let answer = match self.fallback.complete(prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = %e, "Fallback answer failed");
                FallbackGenerator::insufficient_information(&prompt.support_contact)
            }
        };
        AnswerResult {
            answer,
            source: self.fallback.source(),
            confidence,
        }
    }
}

/// Contact line appended to answers: the tenant's support address if set.
pub fn support_contact(settings: Option<&CompanySettings>) -> String {
    settings
        .and_then(|s| s.support_email.as_deref())
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|e| format!("our support team at {e}"))
        .unwrap_or_else(|| DEFAULT_SUPPORT_CONTACT.to_string())
}

/// Package the answer with the related FAQs, minus their answer text.
pub fn assemble(result: AnswerResult, matches: &[Faq]) -> AiSearchData {
    AiSearchData {
        answer: result.answer,
        source: result.source,
        confidence: result.confidence,
        related_faqs: matches.iter().map(RelatedFaq::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use crate::models::AnswerSource;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    fn faq(id: i64, question: &str, answer: &str) -> Faq {
        Faq {
            id,
            company_id: 1,
            question: question.into(),
            answer: answer.into(),
            category: "hours".into(),
            is_active: true,
            views: 3,
            helpful_count: 1,
            created_at: None,
            updated_at: None,
        }
    }

    /// Scripted generator that records the prompts it receives.
    struct Scripted {
        reply: Result<String, ()>,
        source: AnswerSource,
        seen: Mutex<Vec<AnswerPrompt>>,
    }

    impl Scripted {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                source: AnswerSource::Ai,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                source: AnswerSource::Ai,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn canned_fallback(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                source: AnswerSource::Fallback,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl AnswerGenerator for Scripted {
        async fn complete(&self, prompt: &AnswerPrompt) -> Result<String, LlmError> {
            self.seen.lock().push(prompt.clone());
            self.reply
                .clone()
                .map_err(|_| LlmError::Malformed("scripted failure".into()))
        }

        fn source(&self) -> AnswerSource {
            self.source
        }
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_matches_skip_llm() {
        let scripted = Scripted::ok("should not be used");
        let composer = AnswerComposer::new(Some(scripted.clone()));
        let result = composer
            .compose("hours?", &[], &keywords(&["hours"]), DEFAULT_SUPPORT_CONTACT)
            .await;
        assert_eq!(result.source, AnswerSource::Fallback);
        assert_eq!(result.confidence, 0.0);
        assert!(result.answer.contains("don't have enough information"));
        assert!(scripted.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_ai_success_uses_keyword_confidence() {
        let scripted = Scripted::ok("We're open Mon-Fri 9-6.");
        let composer = AnswerComposer::new(Some(scripted.clone()));
        let matches = [faq(1, "What are your business hours?", "Mon-Fri 9-6")];
        let result = composer
            .compose(
                "What are your business hours?",
                &matches,
                &keywords(&["business", "hours"]),
                DEFAULT_SUPPORT_CONTACT,
            )
            .await;
        assert_eq!(result.source, AnswerSource::Ai);
        assert_eq!(result.answer, "We're open Mon-Fri 9-6.");
        assert_eq!(result.confidence, 1.0);

        let seen = scripted.seen.lock();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].context.contains("Mon-Fri 9-6"));
        assert!(seen[0].system_prompt.contains(DEFAULT_SUPPORT_CONTACT));
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back_to_top_faq() {
        let composer = AnswerComposer::new(Some(Scripted::failing()));
        let matches = [
            faq(1, "What are your business hours?", "Mon-Fri 9-6"),
            faq(2, "Holiday hours?", "Closed on holidays"),
        ];
        let result = composer
            .compose("hours", &matches, &keywords(&["hours"]), DEFAULT_SUPPORT_CONTACT)
            .await;
        assert_eq!(result.source, AnswerSource::Fallback);
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
        assert!(result.answer.contains("Mon-Fri 9-6"));
        assert!(!result.answer.contains("Closed on holidays"));
    }

    #[tokio::test]
    async fn test_no_primary_uses_fallback() {
        let composer = AnswerComposer::from_config(
            reqwest::Client::new(),
            &LlmConfig {
                enabled: false,
                ..LlmConfig::default()
            },
        );
        let matches = [faq(1, "Q", "A")];
        let result = composer
            .compose("q", &matches, &keywords(&["q"]), DEFAULT_SUPPORT_CONTACT)
            .await;
        assert_eq!(result.source, AnswerSource::Fallback);
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_ai_with_no_keywords_has_zero_confidence() {
        let composer = AnswerComposer::new(Some(Scripted::ok("Here is what I know.")));
        let matches = [faq(1, "Q", "A")];
        let result = composer
            .compose("hi there please", &matches, &[], DEFAULT_SUPPORT_CONTACT)
            .await;
        assert_eq!(result.source, AnswerSource::Ai);
        assert_eq!(result.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_fallback_runs_through_generator_trait() {
        let fallback = Scripted::canned_fallback("Canned reply.");
        let composer =
            AnswerComposer::new(Some(Scripted::failing())).with_fallback(fallback.clone());
        let matches = [faq(1, "What are your business hours?", "Mon-Fri 9-6")];
        let result = composer
            .compose("hours", &matches, &keywords(&["hours"]), DEFAULT_SUPPORT_CONTACT)
            .await;
        assert_eq!(result.answer, "Canned reply.");
        assert_eq!(result.source, AnswerSource::Fallback);
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);

        let seen = fallback.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].faqs[0].id, 1);
    }

    #[tokio::test]
    async fn test_failing_fallback_degrades_to_insufficient_information() {
        let composer = AnswerComposer::new(None).with_fallback(Scripted::failing());
        let matches = [faq(1, "Q", "A")];
        let result = composer
            .compose("q", &matches, &keywords(&["q"]), DEFAULT_SUPPORT_CONTACT)
            .await;
        assert!(result.answer.contains("don't have enough information"));
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_support_contact_prefers_company_email() {
        let settings = CompanySettings {
            company_id: 1,
            ai_chatbot_enabled: true,
            support_email: Some("help@acme.test".into()),
        };
        assert_eq!(
            support_contact(Some(&settings)),
            "our support team at help@acme.test"
        );
        assert_eq!(support_contact(None), DEFAULT_SUPPORT_CONTACT);
    }

    #[test]
    fn test_assemble_projects_related_faqs() {
        let matches = [faq(7, "Q7", "long answer text")];
        let data = assemble(
            AnswerResult {
                answer: "A".into(),
                source: AnswerSource::Ai,
                confidence: 0.8,
            },
            &matches,
        );
        assert_eq!(data.related_faqs.len(), 1);
        assert_eq!(data.related_faqs[0].id, 7);
        assert_eq!(data.related_faqs[0].category, "hours");
        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("long answer text"));
    }
}
