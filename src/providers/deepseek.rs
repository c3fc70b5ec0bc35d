//! DeepSeek provider implementation for EmprendoBot
//!
//! This module implements the Provider trait for a DeepSeek-compatible
//! chat-completions endpoint. Requests are bearer-token authenticated,
//! non-streaming, and carry the session's sampling parameters. Failures
//! are classified into [`CompletionError`] variants so the session can
//! substitute the matching localized apology.

use crate::config::DeepSeekConfig;
use crate::error::{EmprendoBotError, Result};
use crate::providers::{CompletionError, GenerationParams, Message, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// DeepSeek chat-completions provider
///
/// Connects to the configured endpoint (`https://api.deepseek.com/v1/chat/completions`
/// by default, or any OpenAI-compatible URL for tests and local mocks).
///
/// # Examples
///
/// ```no_run
/// use emprendobot::config::DeepSeekConfig;
/// use emprendobot::providers::{DeepSeekProvider, GenerationParams, Message, Provider};
///
/// # async fn example() -> emprendobot::error::Result<()> {
/// let config = DeepSeekConfig::default();
/// let provider = DeepSeekProvider::new(&config, "sk-test".to_string())?;
/// let window = vec![Message::system("persona"), Message::user("Hola")];
/// let text = provider.complete(&window, &GenerationParams::default()).await;
/// # Ok(())
/// # }
/// ```
pub struct DeepSeekProvider {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
}

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

/// Response payload from the chat-completions endpoint
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// One candidate completion
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

/// The message carried by a candidate
#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl DeepSeekProvider {
    /// Create a new DeepSeek provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, model, and timeout settings
    /// * `api_key` - Bearer credential resolved at session start
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &DeepSeekConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("emprendobot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                EmprendoBotError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized DeepSeek provider: url={}, model={}, timeout={}s",
            config.api_url,
            config.model,
            config.timeout_seconds
        );

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The configured endpoint URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Extract the first candidate's text from a parsed response body.
///
/// Returns `NoChoices` when the candidate list is empty or the first
/// candidate carries no content.
fn extract_completion(response: ChatResponse) -> std::result::Result<String, CompletionError> {
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::NoChoices)?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CompletionError::NoChoices);
    }
    Ok(trimmed.to_string())
}

/// Classify a reqwest send error into the completion taxonomy.
fn classify_send_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else if err.is_connect() || err.is_request() || err.is_redirect() {
        CompletionError::Transport(err.to_string())
    } else {
        CompletionError::Unexpected(err.to_string())
    }
}

#[async_trait]
impl Provider for DeepSeekProvider {
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> std::result::Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        tracing::debug!(
            "Sending completion request: {} messages, max_tokens={}, temperature={}",
            messages.len(),
            params.max_tokens,
            params.temperature
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Completion request failed: {}", e);
                classify_send_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Completion service returned {}: {}", status, body);
            return Err(CompletionError::Status {
                code: status.as_u16(),
            });
        }

        // Read the body as text first so a parse failure can be classified
        // separately from a transport failure.
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read completion response body: {}", e);
            CompletionError::Transport(e.to_string())
        })?;

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse completion response: {}", e);
            CompletionError::Malformed(e.to_string())
        })?;

        let text = extract_completion(parsed)?;
        tracing::debug!("Received completion: {} chars", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeepSeekConfig;

    fn test_config() -> DeepSeekConfig {
        DeepSeekConfig {
            api_url: "http://localhost:9/v1/chat/completions".to_string(),
            model: "deepseek-chat".to_string(),
            timeout_seconds: 5,
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
        }
    }

    #[test]
    fn test_provider_creation() {
        let provider = DeepSeekProvider::new(&test_config(), "sk-test".to_string());
        assert!(provider.is_ok());
    }

    #[test]
    fn test_provider_accessors() {
        let provider = DeepSeekProvider::new(&test_config(), "sk-test".to_string()).unwrap();
        assert_eq!(provider.model(), "deepseek-chat");
        assert_eq!(provider.api_url(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("persona"), Message::user("Hola")];
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: &messages,
            max_tokens: 1500,
            temperature: 0.7,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"deepseek-chat\""));
        assert!(json.contains("\"max_tokens\":1500"));
        assert!(json.contains("\"temperature\":0.7"));
        assert!(json.contains("\"role\":\"system\""));
    }

    #[test]
    fn test_extract_completion_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[
                {"message":{"role":"assistant","content":"  Primera  "}},
                {"message":{"role":"assistant","content":"Segunda"}}
            ]}"#,
        )
        .unwrap();
        let text = extract_completion(response).unwrap();
        assert_eq!(text, "Primera");
    }

    #[test]
    fn test_extract_completion_empty_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            extract_completion(response),
            Err(CompletionError::NoChoices)
        ));
    }

    #[test]
    fn test_extract_completion_missing_choices_field() {
        let response: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(matches!(
            extract_completion(response),
            Err(CompletionError::NoChoices)
        ));
    }

    #[test]
    fn test_extract_completion_null_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(
            extract_completion(response),
            Err(CompletionError::NoChoices)
        ));
    }

    #[test]
    fn test_extract_completion_blank_content() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        assert!(matches!(
            extract_completion(response),
            Err(CompletionError::NoChoices)
        ));
    }

    #[test]
    fn test_malformed_body_is_classified() {
        let parse_result = serde_json::from_str::<ChatResponse>("{not json");
        assert!(parse_result.is_err());
        let error = CompletionError::Malformed(parse_result.unwrap_err().to_string());
        assert!(error.fallback_text().contains("malformada"));
    }
}
