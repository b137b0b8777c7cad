use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the FAQ and company settings snapshots live
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// LLM provider configuration
    pub llm: LlmConfig,
    /// Result limit used when the caller does not pass one
    pub default_limit: usize,
    /// Upper bound for the caller-supplied limit
    pub max_limit: usize,
    /// Fall back to other tenants' FAQs when a company has none at all
    pub cross_tenant_fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// When false, answers always come from the deterministic fallback
    pub enabled: bool,
    /// "openai" or "ollama"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name for answer generation
    pub chat_model: String,
    /// API key (required for the openai provider)
    pub api_key: Option<String>,
    /// Maximum tokens the model may generate per answer
    pub max_tokens: u32,
    /// Sampling temperature, kept low so answers stay close to the FAQ text
    pub temperature: f32,
    /// Per-request timeout in seconds (capped at 60)
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:9000".to_string(),
            llm: LlmConfig::default(),
            default_limit: 5,
            max_limit: 20,
            cross_tenant_fallback: true,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: "openai".to_string(),
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            api_key: None,
            max_tokens: 300,
            temperature: 0.3,
            timeout_secs: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("SUPPORT_SEARCH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = lookup("SUPPORT_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(val) = lookup("SUPPORT_SEARCH_DEFAULT_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.default_limit = v.max(1);
            }
        }
        if let Some(val) = lookup("SUPPORT_SEARCH_MAX_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.max_limit = v.max(1);
            }
        }
        if let Some(val) = lookup("SUPPORT_SEARCH_CROSS_TENANT_FALLBACK") {
            if let Some(v) = parse_bool(&val) {
                config.cross_tenant_fallback = v;
            }
        }

        // LLM config
        if let Some(val) = lookup("LLM_ENABLED") {
            if let Some(v) = parse_bool(&val) {
                config.llm.enabled = v;
            }
        }
        if let Some(provider) = lookup("LLM_PROVIDER") {
            config.llm.provider = provider.to_lowercase();
        }
        if let Some(url) = lookup("LLM_BASE_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Some(key) = lookup("LLM_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            if !key.trim().is_empty() {
                config.llm.api_key = Some(key);
            }
        }
        if let Some(val) = lookup("LLM_MAX_TOKENS") {
            if let Ok(v) = val.parse() {
                config.llm.max_tokens = v;
            }
        }
        if let Some(val) = lookup("LLM_TEMPERATURE") {
            if let Ok(v) = val.parse::<f32>() {
                config.llm.temperature = v.clamp(0.0, 2.0);
            }
        }
        if let Some(val) = lookup("LLM_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.llm.timeout_secs = v.min(60); // Cap at 60s
            }
        }

        config
    }

    pub fn faqs_path(&self) -> PathBuf {
        self.data_dir.join("faqs.json")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    /// Clamp a caller-supplied limit into `1..=max_limit`.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
