//! Chat completion client for OpenAI-compatible endpoints
//!
//! - Endpoint: POST {base_url}/chat/completions
//! - Health probe: GET {base_url}/models
//! - Bearer auth from an environment variable

use crate::cli::config::ApiConfig;
use crate::errors::{AssistantError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Anything that can turn a system prompt and user message into a reply
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Produce a single completion
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Whether the backend is reachable
    async fn health_check(&self) -> bool;

    /// Model identifier
    fn model(&self) -> &str;
}

/// HTTP chat completion client
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    api_key: String,
}

impl ChatClient {
    /// Create a client, reading the key from `config.api_key_env`
    pub fn from_env(config: &ApiConfig) -> Result<Self> {
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(AssistantError::MissingApiKey {
                    var: config.api_key_env.clone(),
                })
            }
        };
        Self::with_key(config, api_key)
    }

    /// Create a client with an explicit key
    pub fn with_key(config: &ApiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AssistantError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: system,
                },
                RequestMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionBackend for ChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(system, user))
            .send()
            .await
            .map_err(|e| AssistantError::ApiError(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AssistantError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::ApiError(format!("Failed to parse response: {}", e)))?;

        extract_content(body)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/models", self.base_url);

        match self.client.get(&url).bearer_auth(&self.api_key).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn extract_content(body: ChatResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(AssistantError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ChatClient {
        ChatClient::with_key(&ApiConfig::default(), "test-key".to_string()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.model(), "llama3-8b-8192");
        assert_eq!(client.base_url(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..Default::default()
        };
        let client = ChatClient::with_key(&config, "k".to_string()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_missing_key() {
        let config = ApiConfig {
            api_key_env: "HEALTHBUDDY_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ChatClient::from_env(&config),
            Err(AssistantError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn test_request_serialization() {
        let client = client();
        let body = serde_json::to_value(client.request_body("sys", "hello")).unwrap();
        assert_eq!(body["model"], "llama3-8b-8192");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["max_tokens"], 1024);
    }

    #[test]
    fn test_extract_content() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Rest well."}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(body).unwrap(), "Rest well.");
    }

    #[test]
    fn test_extract_content_empty() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_content(body), Err(AssistantError::EmptyResponse)));

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(matches!(extract_content(body), Err(AssistantError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = ChatClient::with_key(&config, "k".to_string()).unwrap();
        assert!(!client.health_check().await);
    }
}
