use anyhow::Context;
use std::sync::Arc;

use crate::answer::AnswerComposer;
use crate::config::Config;
use crate::store::{FaqStore, JsonStore, SettingsStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub faqs: Arc<dyn FaqStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub composer: Arc<AnswerComposer>,
}

impl AppState {
    /// Load the JSON store from the data directory and wire the LLM client.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("Failed to create data dir {}", config.data_dir.display())
        })?;

        let store = Arc::new(JsonStore::open(&config.faqs_path(), &config.settings_path())?);

        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(config.llm.timeout_secs.max(1)))
            .build()
            .context("Failed to build HTTP client")?;
        let composer = AnswerComposer::from_config(http_client, &config.llm);

        Ok(Self::from_parts(config, store.clone(), store, composer))
    }

    /// Assemble state from explicit parts. Used by tests and alternative stores.
    pub fn from_parts(
        config: Config,
        faqs: Arc<dyn FaqStore>,
        settings: Arc<dyn SettingsStore>,
        composer: AnswerComposer,
    ) -> Self {
        Self {
            config: Arc::new(config),
            faqs,
            settings,
            composer: Arc::new(composer),
        }
    }
}
