use tracing_subscriber::EnvFilter;

use support_search::api;
use support_search::config::Config;
use support_search::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Data directory: {}", config.data_dir.display());
    if config.llm.enabled {
        tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.chat_model);
        if config.llm.provider == "openai" && config.llm.api_key.is_none() {
            tracing::warn!("LLM_API_KEY not set; answers will use the FAQ fallback");
        }
    }
    if config.cross_tenant_fallback {
        tracing::warn!("Cross-tenant FAQ fallback is enabled");
    }

    let state = AppState::new(config.clone())?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
