use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored question/answer pair owned by a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: i64,
    pub company_id: i64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub helpful_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Per-company support settings consumed by the search pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    pub company_id: i64,
    #[serde(default)]
    pub ai_chatbot_enabled: bool,
    #[serde(default)]
    pub support_email: Option<String>,
}

/// Query string for the tenant-scoped endpoints. `limit` stays a string and
/// is parsed leniently; a bad value means "use the default".
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Query string for the widget-facing endpoints. `companyId` is kept as a
/// string so a malformed value surfaces as our own 400 instead of a
/// rejection from the extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicSearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, rename = "companyId")]
    pub company_id: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Ai,
    Fallback,
}

/// The resolved answer for one request. Serialized once, never stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnswerResult {
    pub answer: String,
    pub source: AnswerSource,
    pub confidence: f32,
}

/// Related FAQ as shown under an AI answer; the answer text is omitted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelatedFaq {
    pub id: i64,
    pub question: String,
    pub category: String,
    pub views: u64,
    pub helpful_count: u64,
}

impl From<&Faq> for RelatedFaq {
    fn from(faq: &Faq) -> Self {
        Self {
            id: faq.id,
            question: faq.question.clone(),
            category: faq.category.clone(),
            views: faq.views,
            helpful_count: faq.helpful_count,
        }
    }
}

/// Payload of `GET /api/search/ai` and its public counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct AiSearchData {
    pub answer: String,
    pub source: AnswerSource,
    pub confidence: f32,
    #[serde(rename = "relatedFAQs")]
    pub related_faqs: Vec<RelatedFaq>,
}

/// FAQ as returned by the plain search endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqHit {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub views: u64,
    pub helpful_count: u64,
}

impl From<&Faq> for FaqHit {
    fn from(faq: &Faq) -> Self {
        Self {
            id: faq.id,
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            category: faq.category.clone(),
            views: faq.views,
            helpful_count: faq.helpful_count,
        }
    }
}

/// Payload of `GET /api/search` and its public counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct FaqSearchData {
    pub query: String,
    pub tier: crate::search::MatchTier,
    pub total: usize,
    pub results: Vec<FaqHit>,
}

/// Success envelope shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
