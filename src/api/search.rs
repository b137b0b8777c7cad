use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::Json;

use crate::answer::{assemble, support_contact};
use crate::error::ApiError;
use crate::models::{
    AiSearchData, ApiResponse, FaqHit, FaqSearchData, PublicSearchParams, SearchParams,
};
use crate::search::keywords::extract_keywords;
use crate::search::matcher::TieredMatcher;
use crate::search::MatchOutcome;
use crate::state::AppState;

/// Header the upstream auth layer sets to the caller's company id.
pub const COMPANY_HEADER: &str = "x-company-id";

/// The authenticated caller's company. Taken from a request extension when
/// auth middleware inserted one, otherwise from [`COMPANY_HEADER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    pub company_id: i64,
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<TenantContext>() {
            return Ok(*ctx);
        }
        parts
            .headers
            .get(COMPANY_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_company_id)
            .map(|company_id| TenantContext { company_id })
            .ok_or(ApiError::Unauthenticated)
    }
}

/// GET /api/search/ai - AI answer for the caller's company
pub async fn ai_search(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<AiSearchData>>, ApiError> {
    let query = required_query(params.query.as_deref())?;
    let data = run_ai_search(&state, tenant.company_id, &query, params.limit.as_deref()).await?;
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/search/ai/public - AI answer for the embedded widget
pub async fn public_ai_search(
    State(state): State<AppState>,
    Query(params): Query<PublicSearchParams>,
) -> Result<Json<ApiResponse<AiSearchData>>, ApiError> {
    let query = required_query(params.query.as_deref())?;
    let company_id = required_company(params.company_id.as_deref())?;
    let data = run_ai_search(&state, company_id, &query, params.limit.as_deref()).await?;
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/search - ranked FAQs for the caller's company, no AI
pub async fn faq_search(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<FaqSearchData>>, ApiError> {
    let query = required_query(params.query.as_deref())?;
    let data = run_faq_search(&state, tenant.company_id, &query, params.limit.as_deref()).await?;
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/search/public - ranked FAQs for the embedded widget, no AI
pub async fn public_faq_search(
    State(state): State<AppState>,
    Query(params): Query<PublicSearchParams>,
) -> Result<Json<ApiResponse<FaqSearchData>>, ApiError> {
    let query = required_query(params.query.as_deref())?;
    let company_id = required_company(params.company_id.as_deref())?;
    let data = run_faq_search(&state, company_id, &query, params.limit.as_deref()).await?;
    Ok(Json(ApiResponse::ok(data)))
}

/// Full answer pipeline:
///   1. Tenant AI flag check (before any FAQ lookup)
///   2. Keyword extraction
///   3. Tiered FAQ match
///   4. LLM answer, or deterministic fallback
///   5. Response assembly
pub async fn run_ai_search(
    state: &AppState,
    company_id: i64,
    query: &str,
    limit: Option<&str>,
) -> Result<AiSearchData, ApiError> {
    // ── Step 1: Tenant settings ──────────────────────────
    let settings = state.settings.company_settings(company_id).await?;
    if !settings.as_ref().is_some_and(|s| s.ai_chatbot_enabled) {
        tracing::info!(company_id, "AI search rejected: chatbot disabled");
        return Err(ApiError::AiDisabled);
    }

    // ── Steps 2-3: Keywords and tiered match ─────────────
    let (keywords, outcome) = match_faqs(state, company_id, query, limit).await?;

    // ── Step 4: Compose answer ───────────────────────────
    let contact = support_contact(settings.as_ref());
    let result = state
        .composer
        .compose(query, &outcome.faqs, &keywords, &contact)
        .await;

    tracing::info!(
        company_id,
        tier = %outcome.tier,
        hits = outcome.faqs.len(),
        source = ?result.source,
        confidence = result.confidence,
        "AI search answered"
    );

    // ── Step 5: Assemble ─────────────────────────────────
    Ok(assemble(result, &outcome.faqs))
}

pub async fn run_faq_search(
    state: &AppState,
    company_id: i64,
    query: &str,
    limit: Option<&str>,
) -> Result<FaqSearchData, ApiError> {
    let (_, outcome) = match_faqs(state, company_id, query, limit).await?;
    Ok(FaqSearchData {
        query: query.to_string(),
        tier: outcome.tier,
        total: outcome.faqs.len(),
        results: outcome.faqs.iter().map(FaqHit::from).collect(),
    })
}

async fn match_faqs(
    state: &AppState,
    company_id: i64,
    query: &str,
    limit: Option<&str>,
) -> Result<(Vec<String>, MatchOutcome), ApiError> {
    let limit = state.config.effective_limit(parse_limit(limit));
    let keywords = extract_keywords(query);
    tracing::debug!(company_id, ?keywords, limit, "Extracted search keywords");

    let outcome = TieredMatcher::new(state.faqs.as_ref(), state.config.cross_tenant_fallback)
        .find(company_id, &keywords, query, limit)
        .await?;
    Ok((keywords, outcome))
}

fn required_query(query: Option<&str>) -> Result<String, ApiError> {
    let query = query.map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::MissingQuery);
    }
    Ok(query.to_string())
}

fn required_company(company_id: Option<&str>) -> Result<i64, ApiError> {
    company_id
        .and_then(parse_company_id)
        .ok_or(ApiError::MissingCompany)
}

fn parse_company_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|l| l.trim().parse::<usize>().ok())
}
