pub mod confidence;
pub mod keywords;
pub mod matcher;

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::models::Faq;

/// Which lookup produced a [`MatchOutcome`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Extracted keywords matched question or answer text.
    Keyword,
    /// Raw query words, minus greetings and filler, matched.
    BroadWord,
    /// Top FAQs for the tenant, no text filter.
    General,
    /// Top FAQs across all tenants.
    CrossTenant,
    /// Nothing found anywhere.
    None,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchTier::Keyword => "keyword",
            MatchTier::BroadWord => "broad_word",
            MatchTier::General => "general",
            MatchTier::CrossTenant => "cross_tenant",
            MatchTier::None => "none",
        };
        f.write_str(name)
    }
}

/// Ranked FAQs plus the tier they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub tier: MatchTier,
    pub faqs: Vec<Faq>,
}

impl MatchOutcome {
    pub fn empty() -> Self {
        Self {
            tier: MatchTier::None,
            faqs: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.faqs.is_empty()
    }
}

/// Order by helpful count desc, then views desc. Ties fall back to id so the
/// order is stable across stores.
pub fn compare_faqs(a: &Faq, b: &Faq) -> Ordering {
    b.helpful_count
        .cmp(&a.helpful_count)
        .then_with(|| b.views.cmp(&a.views))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn rank_faqs(mut faqs: Vec<Faq>) -> Vec<Faq> {
    faqs.sort_by(compare_faqs);
    faqs
}
