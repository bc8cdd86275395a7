use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use visita_core::config::{LlmConfig, LlmProvider};

/// Seam for the language model behind the runtime loop.
///
/// `transcript` is the rendered conversation so far, newest turn last; the
/// implementation returns the next assistant turn as raw text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, transcript: &str) -> Result<String>;
}

/// Chat-completion client over an OpenAI-compatible endpoint.
///
/// Ollama, Mistral and OpenAI all speak this shape; the config picks the
/// base URL and credentials. One request per turn, no streaming.
pub struct ChatCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f64,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl ChatCompletionClient {
    pub fn from_config(config: &LlmConfig) -> Self {
        let default_base = match config.provider {
            LlmProvider::Ollama => "http://localhost:11434/v1",
            LlmProvider::OpenAi => "https://api.openai.com/v1",
            LlmProvider::Mistral => "https://api.mistral.ai/v1",
        };
        let base = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base.to_string());

        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: format!("{}/chat/completions", base.trim_end_matches('/')),
            api_key: config.api_key.as_ref().map(|key| key.expose_secret().to_string()),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl LlmClient for ChatCompletionClient {
    async fn complete(&self, system_prompt: &str, transcript: &str) -> Result<String> {
        let mut request = self.http.post(&self.endpoint).json(&json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": transcript },
            ],
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.context("llm request failed")?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("llm endpoint returned HTTP {}", status.as_u16());
        }

        let completion: CompletionResponse =
            response.json().await.context("malformed llm response")?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .context("llm response had no choices")
    }
}

/// Deterministic test double: replays a fixed sequence of turns.
#[derive(Default)]
pub struct ScriptedLlm {
    turns: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(turns: Vec<&str>) -> Self {
        // Stored reversed so each call pops the next turn off the end.
        let mut turns: Vec<String> = turns.into_iter().map(String::from).collect();
        turns.reverse();
        Self { turns: Mutex::new(turns) }
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, _system_prompt: &str, _transcript: &str) -> Result<String> {
        let mut turns = match self.turns.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(turns.pop().unwrap_or_else(|| "I have nothing further to add.".to_string()))
    }
}
