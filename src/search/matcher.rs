use crate::models::Faq;
use crate::search::keywords::broad_terms;
use crate::search::{rank_faqs, MatchOutcome, MatchTier};
use crate::store::{FaqQuery, FaqStore, StoreError, TenantScope};

/// Tiered FAQ lookup. Runs progressively looser queries and stops at the
/// first tier that returns anything:
///
/// 1. keyword: extracted keywords against question/answer text
/// 2. broad word: raw query words minus greetings and filler
/// 3. general: the tenant's top FAQs, no text filter
/// 4. cross tenant: top FAQs across every tenant (when enabled)
///
/// Every tier is ranked by helpful count then views and capped at `limit`.
/// A store error aborts the whole lookup; an empty tier does not.
pub struct TieredMatcher<'a> {
    store: &'a dyn FaqStore,
    cross_tenant_fallback: bool,
}

impl<'a> TieredMatcher<'a> {
    pub fn new(store: &'a dyn FaqStore, cross_tenant_fallback: bool) -> Self {
        Self {
            store,
            cross_tenant_fallback,
        }
    }

    pub async fn find(
        &self,
        company_id: i64,
        keywords: &[String],
        query_text: &str,
        limit: usize,
    ) -> Result<MatchOutcome, StoreError> {
        let scope = TenantScope::Company(company_id);

        // ── Tier 1: keywords ─────────────────────────────────
        if !keywords.is_empty() {
            let faqs = self.lookup(scope, keywords.to_vec(), limit).await?;
            if !faqs.is_empty() {
                return Ok(self.found(company_id, MatchTier::Keyword, faqs));
            }
        }

        // ── Tier 2: broad words ──────────────────────────────
        let broad = broad_terms(query_text);
        if !broad.is_empty() && broad.as_slice() != keywords {
            let faqs = self.lookup(scope, broad, limit).await?;
            if !faqs.is_empty() {
                return Ok(self.found(company_id, MatchTier::BroadWord, faqs));
            }
        }

        // ── Tier 3: tenant's top FAQs ────────────────────────
        let faqs = self.lookup(scope, Vec::new(), limit).await?;
        if !faqs.is_empty() {
            return Ok(self.found(company_id, MatchTier::General, faqs));
        }

        // ── Tier 4: any tenant ───────────────────────────────
        if self.cross_tenant_fallback {
            let faqs = self.lookup(TenantScope::AllTenants, Vec::new(), limit).await?;
            if !faqs.is_empty() {
                tracing::warn!(
                    company_id,
                    hits = faqs.len(),
                    "Company has no active FAQs; answering from other tenants"
                );
                return Ok(self.found(company_id, MatchTier::CrossTenant, faqs));
            }
        }

        tracing::info!(company_id, "No FAQs matched in any tier");
        Ok(MatchOutcome::empty())
    }

    async fn lookup(
        &self,
        scope: TenantScope,
        terms: Vec<String>,
        limit: usize,
    ) -> Result<Vec<Faq>, StoreError> {
        let query = FaqQuery {
            scope,
            terms,
            limit,
        };
        let mut faqs = rank_faqs(self.store.search(&query).await?);
        faqs.truncate(limit);
        Ok(faqs)
    }

    fn found(&self, company_id: i64, tier: MatchTier, faqs: Vec<Faq>) -> MatchOutcome {
        tracing::debug!(company_id, %tier, hits = faqs.len(), "FAQ tier matched");
        MatchOutcome { tier, faqs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::keywords::extract_keywords;
    use crate::store::JsonStore;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    fn faq(id: i64, company_id: i64, question: &str, answer: &str, helpful: u64, views: u64) -> Faq {
        Faq {
            id,
            company_id,
            question: question.into(),
            answer: answer.into(),
            category: "general".into(),
            is_active: true,
            views,
            helpful_count: helpful,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample_store() -> JsonStore {
        JsonStore::in_memory(
            vec![
                faq(1, 1, "What are your business hours?", "Mon-Fri 9-6", 4, 10),
                faq(2, 1, "How do I reset my password?", "Use the Forgot Password link", 9, 2),
                faq(3, 1, "Do you ship abroad?", "Yes, to 30 countries", 1, 100),
                faq(4, 2, "Where is your office?", "Berlin", 50, 50),
            ],
            vec![],
        )
    }

    async fn run(store: &dyn FaqStore, company: i64, query: &str, cross: bool) -> MatchOutcome {
        let keywords = extract_keywords(query);
        TieredMatcher::new(store, cross)
            .find(company, &keywords, query, 5)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_keyword_tier_hits() {
        let store = sample_store();
        let outcome = run(&store, 1, "What are your business hours?", true).await;
        assert_eq!(outcome.tier, MatchTier::Keyword);
        assert_eq!(outcome.faqs.len(), 1);
        assert_eq!(outcome.faqs[0].id, 1);
    }

    #[tokio::test]
    async fn test_broad_tier_matches_question_words() {
        let store = sample_store();
        // The only keyword is the raw "how?" token, which matches nothing;
        // the trimmed "how" matches FAQ 2.
        let outcome = run(&store, 1, "how?", true).await;
        assert_eq!(outcome.tier, MatchTier::BroadWord);
        assert_eq!(outcome.faqs[0].id, 2);
    }

    #[tokio::test]
    async fn test_stop_words_only_falls_to_general() {
        let store = sample_store();
        let outcome = run(&store, 1, "hi there please", true).await;
        assert_eq!(outcome.tier, MatchTier::General);
        let ids: Vec<i64> = outcome.faqs.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_unmatched_query_falls_to_general() {
        let store = sample_store();
        let outcome = run(&store, 1, "cryptocurrency", true).await;
        assert_eq!(outcome.tier, MatchTier::General);
        assert_eq!(outcome.faqs.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_tenant_uses_cross_tenant() {
        let store = sample_store();
        let outcome = run(&store, 99, "business hours", true).await;
        assert_eq!(outcome.tier, MatchTier::CrossTenant);
        assert_eq!(outcome.faqs[0].id, 4);
        assert_eq!(outcome.faqs.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_tenant_without_cross_tenant_is_empty() {
        let store = sample_store();
        let outcome = run(&store, 99, "business hours", false).await;
        assert_eq!(outcome.tier, MatchTier::None);
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_empty_store_everywhere() {
        let store = JsonStore::in_memory(vec![], vec![]);
        let outcome = run(&store, 1, "refund", true).await;
        assert_eq!(outcome, MatchOutcome::empty());
    }

    #[tokio::test]
    async fn test_limit_applied_per_tier() {
        let faqs = (0..10)
            .map(|i| faq(i, 1, &format!("refund case {i}"), "answer", i as u64, 0))
            .collect();
        let store = JsonStore::in_memory(faqs, vec![]);
        let keywords = extract_keywords("refund");
        let outcome = TieredMatcher::new(&store, true)
            .find(1, &keywords, "refund", 3)
            .await
            .unwrap();
        let ids: Vec<i64> = outcome.faqs.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![9, 8, 7]);
    }

    /// Store that returns rows in the wrong order and records each query.
    struct UnorderedStore {
        rows: Vec<Faq>,
        calls: Mutex<Vec<FaqQuery>>,
    }

    #[async_trait]
    impl FaqStore for UnorderedStore {
        async fn search(&self, query: &FaqQuery) -> Result<Vec<Faq>, StoreError> {
            self.calls.lock().push(query.clone());
            if query.terms.is_empty() {
                let mut rows = self.rows.clone();
                rows.sort_by_key(|f| f.helpful_count);
                Ok(rows)
            } else {
                Ok(Vec::new())
            }
        }
    }

    #[tokio::test]
    async fn test_results_reranked_regardless_of_store_order() {
        let store = UnorderedStore {
            rows: vec![
                faq(1, 1, "a", "a", 0, 5),
                faq(2, 1, "b", "b", 2, 1),
                faq(3, 1, "c", "c", 2, 9),
                faq(4, 1, "d", "d", 0, 50),
            ],
            calls: Mutex::new(Vec::new()),
        };
        let outcome = run(&store, 1, "what matches", true).await;
        assert_eq!(outcome.tier, MatchTier::General);
        let ids: Vec<i64> = outcome.faqs.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);

        // keyword, broad word, general
        let calls = store.calls.lock();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].terms, vec!["matches"]);
        assert_eq!(calls[1].terms, vec!["what", "matches"]);
        assert!(calls[2].terms.is_empty());
    }

    struct DownStore;

    #[async_trait]
    impl FaqStore for DownStore {
        async fn search(&self, _query: &FaqQuery) -> Result<Vec<Faq>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let keywords = extract_keywords("refund");
        let result = TieredMatcher::new(&DownStore, true)
            .find(1, &keywords, "refund", 5)
            .await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
