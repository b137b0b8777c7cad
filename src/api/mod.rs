pub mod health;
pub mod search;

use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the HTTP router.
///
/// Only the widget-facing `/public` routes get CORS: they are called from
/// customer sites. The tenant routes sit behind the same-origin admin app.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/search/public", get(search::public_faq_search))
        .route("/api/search/ai/public", get(search::public_ai_search))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/search", get(search::faq_search))
        .route("/api/search/ai", get(search::ai_search))
        .merge(public)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    ApiError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
