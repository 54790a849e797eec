//! Chat-completion backend
//!
//! Single-turn, non-streaming client for OpenAI-compatible chat APIs.
//! Classification prompts are short and the reply is a small JSON object,
//! so there is no streaming or retry machinery here; transient failures
//! surface to the classifier, which degrades to its keyword fallback.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use finia_config::{is_local_endpoint, LlmSettings};

use crate::prompt::Message;
use crate::LlmError;

/// Backend configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible endpoint (e.g. https://api.openai.com/v1)
    pub endpoint: String,
    /// API key; may be empty for local endpoints
    pub api_key: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout: Duration,
}

impl From<&LlmSettings> for LlmConfig {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

/// A chat model that can complete a prompt
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Run one completion and return the assistant's raw text reply.
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}

/// OpenAI-compatible chat backend
pub struct OpenAiBackend {
    config: LlmConfig,
    client: Client,
}

impl OpenAiBackend {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        // Same rule as Settings::validate, so a config that loads also builds.
        if config.api_key.is_empty() && !is_local_endpoint(&config.endpoint) {
            return Err(LlmError::Configuration(
                "API key required for remote endpoints".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: messages
                .iter()
                .map(|m| ChatMessage { role: m.role.to_string(), content: m.content.clone() })
                .collect(),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        };

        let mut builder = self.client.post(self.chat_url()).json(&request);
        if !self.config.api_key.is_empty() {
            builder = builder.bearer_auth(&self.config.api_key);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        Ok(choice.message.content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LlmConfig {
        LlmConfig::from(&LlmSettings::default())
    }

    #[test]
    fn test_config_from_settings() {
        let config = config();
        assert_eq!(config.endpoint, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_backend_requires_key_for_remote_endpoint() {
        assert!(OpenAiBackend::new(config()).is_err());

        let mut with_key = config();
        with_key.api_key = "sk-test".into();
        assert!(OpenAiBackend::new(with_key).is_ok());

        let mut local = config();
        local.endpoint = "http://localhost:11434/v1".into();
        assert!(OpenAiBackend::new(local).is_ok());

        // Loopback addresses count as local too.
        let mut loopback = config();
        loopback.endpoint = "http://127.0.0.1:11434/v1".into();
        assert!(OpenAiBackend::new(loopback).is_ok());
    }

    #[test]
    fn test_chat_url() {
        let mut config = config();
        config.api_key = "sk-test".into();
        config.endpoint = "https://api.openai.com/v1/".into();
        let backend = OpenAiBackend::new(config).unwrap();
        assert_eq!(backend.chat_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Almoço R$ 50".to_string(),
            }],
            max_tokens: Some(256),
            temperature: Some(0.2),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("gpt-4o-mini"));
        assert!(json.contains("max_tokens"));
    }
}
