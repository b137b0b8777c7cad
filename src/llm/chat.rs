use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::prompt::build_user_message;
use super::{AnswerGenerator, AnswerPrompt, LlmError};
use crate::config::LlmConfig;
use crate::models::AnswerSource;

/// Answers through a chat-completion API (OpenAI-compatible or Ollama).
pub struct ChatCompletionGenerator {
    client: reqwest::Client,
    config: LlmConfig,
}

impl ChatCompletionGenerator {
    pub fn new(client: reqwest::Client, config: LlmConfig) -> Self {
        Self { client, config }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs.clamp(1, 60))
    }
}

#[async_trait]
impl AnswerGenerator for ChatCompletionGenerator {
    async fn complete(&self, prompt: &AnswerPrompt) -> Result<String, LlmError> {
        let messages = vec![
            Message {
                role: "system".to_string(),
                content: prompt.system_prompt.clone(),
            },
            Message {
                role: "user".to_string(),
                content: build_user_message(&prompt.context, &prompt.query),
            },
        ];

        let content = match self.config.provider.as_str() {
            "openai" => call_openai(&self.client, &self.config, messages, self.timeout()).await?,
            "ollama" => call_ollama(&self.client, &self.config, messages, self.timeout()).await?,
            other => return Err(LlmError::UnknownProvider(other.to_string())),
        };

        let content = content.trim();
        if content.is_empty() {
            return Err(LlmError::Malformed("empty completion".to_string()));
        }
        Ok(content.to_string())
    }

    fn source(&self) -> AnswerSource {
        AnswerSource::Ai
    }
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

/// Read the body and decode it ourselves so a bad payload maps to
/// `Malformed` rather than a transport error.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, LlmError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(LlmError::Status {
            status: status.as_u16(),
            body: body.chars().take(500).collect(),
        });
    }
    serde_json::from_str(&body).map_err(|e| LlmError::Malformed(e.to_string()))
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

async fn call_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    messages: Vec<Message>,
    timeout: Duration,
) -> Result<String, LlmError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(LlmError::MissingCredentials)?;

    let url = format!("{}/v1/chat/completions", config.base_url.trim_end_matches('/'));

    let req = OpenAiChatRequest {
        model: config.chat_model.clone(),
        messages,
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    let resp = client
        .post(&url)
        .timeout(timeout)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await?;

    let body: OpenAiChatResponse = read_json(resp).await?;
    body.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| LlmError::Malformed("no choices in completion".to_string()))
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Message,
}

async fn call_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    messages: Vec<Message>,
    timeout: Duration,
) -> Result<String, LlmError> {
    let url = format!("{}/api/chat", config.base_url.trim_end_matches('/'));

    let req = OllamaChatRequest {
        model: config.chat_model.clone(),
        messages,
        stream: false,
        options: OllamaOptions {
            temperature: config.temperature,
            num_predict: config.max_tokens,
        },
    };

    let resp = client
        .post(&url)
        .timeout(timeout)
        .json(&req)
        .send()
        .await?;

    let body: OllamaChatResponse = read_json(resp).await?;
    Ok(body.message.content)
}
