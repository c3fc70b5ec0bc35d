//! Base provider trait and common types for EmprendoBot
//!
//! This module defines the Provider trait the completion backend implements,
//! along with the message type shared with the session transcript, the
//! generation parameters, and the classified completion failure taxonomy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message structure for conversation
///
/// Represents a message in the conversation with the completion service.
/// Messages are from the user, the assistant, or the system persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use emprendobot::providers::Message;
    ///
    /// let msg = Message::user("Hola, EmprendoBot");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Whether this message is part of the user/assistant exchange
    /// (as opposed to the pinned system persona).
    pub fn is_exchange(&self) -> bool {
        self.role == "user" || self.role == "assistant"
    }
}

/// Sampling parameters sent with every completion request
///
/// Session-scoped configuration, mutated only by explicit user action
/// through the settings commands and read at request-construction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on the length of the generated answer, in tokens
    pub max_tokens: u32,
    /// Sampling temperature (higher values produce more creative answers)
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1500,
            temperature: 0.7,
        }
    }
}

impl GenerationParams {
    /// Lowest accepted `max_tokens` value.
    pub const MIN_TOKENS: u32 = 200;
    /// Highest accepted `max_tokens` value.
    pub const MAX_TOKENS: u32 = 4000;
    /// Lowest accepted temperature.
    pub const MIN_TEMPERATURE: f32 = 0.1;
    /// Highest accepted temperature.
    pub const MAX_TEMPERATURE: f32 = 1.0;

    /// Validate that both parameters sit inside their accepted ranges.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_tokens < Self::MIN_TOKENS || self.max_tokens > Self::MAX_TOKENS {
            return Err(format!(
                "max_tokens must be between {} and {}, got {}",
                Self::MIN_TOKENS,
                Self::MAX_TOKENS,
                self.max_tokens
            ));
        }
        if self.temperature < Self::MIN_TEMPERATURE || self.temperature > Self::MAX_TEMPERATURE {
            return Err(format!(
                "temperature must be between {} and {}, got {}",
                Self::MIN_TEMPERATURE,
                Self::MAX_TEMPERATURE,
                self.temperature
            ));
        }
        Ok(())
    }
}

/// Classified completion failure
///
/// Every way a completion request can fail maps to one of these variants,
/// and every variant maps to a fixed Spanish apology through
/// [`CompletionError::fallback_text`]. The session stores that apology as
/// the assistant's turn output, so a failure never aborts the conversation.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// No usable credential was resolved at session start; the request was
    /// short-circuited without a network call.
    #[error("no API credential configured")]
    MissingCredentials,

    /// The completion call exceeded its deadline.
    #[error("completion request timed out")]
    Timeout,

    /// Network/connection-level failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("service returned status {code}")]
    Status {
        /// HTTP status code returned by the service
        code: u16,
    },

    /// The response payload could not be parsed.
    #[error("malformed response payload: {0}")]
    Malformed(String),

    /// The payload parsed but contained no usable candidate completion.
    #[error("response contained no completion candidates")]
    NoChoices,

    /// Catch-all for failures outside the classified kinds.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl CompletionError {
    /// The localized apology shown (and stored) in place of a completion.
    ///
    /// # Examples
    ///
    /// ```
    /// use emprendobot::providers::CompletionError;
    ///
    /// let text = CompletionError::Timeout.fallback_text();
    /// assert!(text.contains("tardó demasiado"));
    /// ```
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Self::MissingCredentials => {
                "Lo siento, EmprendoBot no está configurado: falta la clave de API."
            }
            Self::Timeout => {
                "Lo siento, la respuesta tardó demasiado. ¿Podrías reformular tu pregunta?"
            }
            Self::Transport(_) | Self::Status { .. } => {
                "Lo siento, hubo un problema de conexión con EmprendoBot."
            }
            Self::Malformed(_) => "Lo siento, recibí una respuesta malformada de EmprendoBot.",
            Self::NoChoices => "Lo siento, no pude obtener una respuesta válida de EmprendoBot.",
            Self::Unexpected(_) => "Lo siento, ocurrió un error inesperado.",
        }
    }
}

/// Provider trait for completion backends
///
/// The completion service (DeepSeek-compatible HTTP endpoint) implements
/// this trait; tests substitute scripted fakes. The returned string is the
/// first candidate's text, already trimmed.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation window with the given sampling parameters.
    ///
    /// # Arguments
    ///
    /// * `messages` - The bounded request window (system message first)
    /// * `params` - Sampling parameters for this request
    ///
    /// # Errors
    ///
    /// Returns a classified [`CompletionError`] on any failure; the caller
    /// converts it to a localized assistant message rather than propagating.
    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> std::result::Result<String, CompletionError>;
}
