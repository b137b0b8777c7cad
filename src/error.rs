use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced to HTTP callers. LLM failures never appear here; they are
/// absorbed into the fallback answer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Search query is required")]
    MissingQuery,

    #[error("A valid companyId is required")]
    MissingCompany,

    #[error("Company context is required")]
    Unauthenticated,

    #[error("AI chatbot is not enabled for this company")]
    AiDisabled,

    #[error("Failed to search FAQs")]
    Store(#[from] StoreError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery | ApiError::MissingCompany | ApiError::AiDisabled => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => tracing::error!(error = %e, "FAQ store failure"),
            ApiError::Internal(e) => tracing::error!("Unhandled search error: {e:#}"),
            _ => {}
        }

        // Display carries only the public message; inner errors stay in the log.
        let body = json!({ "success": false, "message": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
