use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub llm: LlmStatus,
}

/// LLM settings with the API key redacted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmStatus {
    pub enabled: bool,
    pub provider: String,
    pub model: String,
    pub has_api_key: bool,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let llm = &state.config.llm;
    Json(ApiResponse::ok(HealthData {
        status: "ok",
        llm: LlmStatus {
            enabled: llm.enabled,
            provider: llm.provider.clone(),
            model: llm.chat_model.clone(),
            has_api_key: llm.api_key.is_some(),
        },
    }))
}
