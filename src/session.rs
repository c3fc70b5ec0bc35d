//! Conversation management: transcript, request window, and turn cycle
//!
//! This module owns the ordered message log, applies the bounded-window
//! policy when constructing outbound requests and when trimming the
//! persisted log, and orchestrates the request/response cycle. The window
//! construction is a pure function ([`build_window`]) so it is testable
//! without any network or terminal dependency.

use crate::providers::{CompletionError, GenerationParams, Message, Provider};

/// Per-turn state of a session
///
/// `AwaitingCompletion` is entered on submit and exited on receipt of a
/// completion or a classified failure; `Rendering` lasts until the caller
/// finishes the typing effect. There is no terminal error state: every
/// failure resolves back to `Idle` with a visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Waiting for user input
    Idle,
    /// A completion request is in flight
    AwaitingCompletion,
    /// The answer is being revealed in the terminal
    Rendering,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "inactivo"),
            Self::AwaitingCompletion => write!(f, "esperando respuesta"),
            Self::Rendering => write!(f, "mostrando respuesta"),
        }
    }
}

/// The ordered conversation log
///
/// Invariant: when non-empty, index 0 is the system persona message. The
/// log grows by one user message then one assistant message per turn and
/// is truncated to a retention ceiling by dropping the oldest exchange
/// messages while keeping the system message pinned at index 0.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    persona: String,
}

impl Transcript {
    /// Create a transcript holding only the system persona message.
    pub fn new(persona: impl Into<String>) -> Self {
        let persona = persona.into();
        Self {
            messages: vec![Message::system(persona.clone())],
            persona,
        }
    }

    /// Replace the log with a single re-synthesized system message.
    pub fn reset(&mut self) {
        self.messages = vec![Message::system(self.persona.clone())];
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// All messages in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages, system message included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log holds only the system message.
    pub fn is_empty(&self) -> bool {
        self.messages.len() <= 1
    }

    /// Drop the oldest exchange messages until `limit` is met, keeping the
    /// system message fixed at index 0. A no-op when the log is within the
    /// ceiling.
    pub fn trim(&mut self, limit: usize) {
        if self.messages.len() <= limit {
            return;
        }
        let keep_exchange = limit.saturating_sub(1);
        let split = self.messages.len() - keep_exchange;
        let mut kept = Vec::with_capacity(limit);
        kept.push(Message::system(self.persona.clone()));
        kept.extend_from_slice(&self.messages[split..]);
        self.messages = kept;
        tracing::debug!("Transcript trimmed to {} messages", self.messages.len());
    }
}

/// Build the bounded request window from the live log
///
/// The window starts with the system message — taken from index 0 when
/// present, synthesized from `persona` otherwise — followed by the most
/// recent user/assistant messages in chronological order. The result never
/// holds more than `n` entries.
pub fn build_window(log: &[Message], n: usize, persona: &str) -> Vec<Message> {
    let system = log
        .first()
        .filter(|m| m.role == "system")
        .cloned()
        .unwrap_or_else(|| Message::system(persona));

    let exchange: Vec<&Message> = log.iter().filter(|m| m.is_exchange()).collect();
    let take = n.saturating_sub(1).min(exchange.len());
    let start = exchange.len() - take;

    let mut window = Vec::with_capacity(take + 1);
    window.push(system);
    window.extend(exchange[start..].iter().map(|m| (*m).clone()));
    window
}

/// The session's answer for one completed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    /// The completion text, or the localized apology when the turn failed
    pub text: String,
    /// Whether `text` is a fallback apology rather than a real completion
    pub is_fallback: bool,
}

/// A chat session: transcript, provider, and settings
///
/// The session is single-writer: `submit` takes `&mut self`, so no two
/// submits for the same session can interleave. When no credential was
/// resolved at startup the provider is absent and every submit
/// short-circuits to the configuration-missing apology without a network
/// call.
pub struct Session {
    transcript: Transcript,
    provider: Option<Box<dyn Provider>>,
    params: GenerationParams,
    window_size: usize,
    history_limit: usize,
    voice_autoplay: bool,
    state: TurnState,
}

impl Session {
    /// Create a session around an optional provider.
    ///
    /// # Arguments
    ///
    /// * `persona` - The system prompt, pinned at transcript index 0
    /// * `provider` - The completion backend, or `None` when no credential
    ///   is available
    /// * `params` - Initial sampling parameters
    /// * `window_size` - Maximum messages per outbound request
    /// * `history_limit` - Retention ceiling for the transcript
    pub fn new(
        persona: impl Into<String>,
        provider: Option<Box<dyn Provider>>,
        params: GenerationParams,
        window_size: usize,
        history_limit: usize,
    ) -> Self {
        Self {
            transcript: Transcript::new(persona),
            provider,
            params,
            window_size,
            history_limit,
            voice_autoplay: true,
            state: TurnState::Idle,
        }
    }

    /// Submit raw user text and run one full turn.
    ///
    /// Empty or whitespace-only input is a no-op: nothing is appended, no
    /// outbound call is made, and `None` is returned. Otherwise the user
    /// message is appended, the bounded window is sent to the provider, the
    /// answer (or localized failure text) is appended as the assistant's
    /// turn, and the transcript is trimmed to the retention ceiling. The
    /// session is left in `Rendering` state; callers invoke
    /// [`Session::finish_rendering`] once the typing effect completes.
    pub async fn submit(&mut self, user_text: &str) -> Option<TurnReply> {
        let trimmed = user_text.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.transcript.push_user(trimmed);
        let window = build_window(
            self.transcript.messages(),
            self.window_size,
            persona_of(&self.transcript),
        );

        self.state = TurnState::AwaitingCompletion;
        let result = match &self.provider {
            Some(provider) => provider.complete(&window, &self.params).await,
            None => Err(CompletionError::MissingCredentials),
        };

        let reply = match result {
            Ok(text) => TurnReply {
                text,
                is_fallback: false,
            },
            Err(e) => {
                tracing::warn!("Completion failed ({}), using fallback text", e);
                TurnReply {
                    text: e.fallback_text().to_string(),
                    is_fallback: true,
                }
            }
        };

        self.transcript.push_assistant(reply.text.clone());
        self.transcript.trim(self.history_limit);
        self.state = TurnState::Rendering;
        Some(reply)
    }

    /// Mark the typing effect as finished, returning the session to idle.
    pub fn finish_rendering(&mut self) {
        self.state = TurnState::Idle;
    }

    /// Reset the transcript to its initial single-message state.
    ///
    /// Callers that own a voice surface also request cancellation of any
    /// in-flight speech when resetting.
    pub fn reset(&mut self) {
        self.transcript.reset();
        self.state = TurnState::Idle;
    }

    /// The live transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Current turn state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Whether a completion backend is available.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Current sampling parameters.
    pub fn params(&self) -> GenerationParams {
        self.params
    }

    /// Replace the sampling parameters after validating them.
    pub fn set_params(&mut self, params: GenerationParams) -> std::result::Result<(), String> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Whether answers are spoken automatically.
    pub fn voice_autoplay(&self) -> bool {
        self.voice_autoplay
    }

    /// Toggle automatic speech for answers.
    pub fn set_voice_autoplay(&mut self, enabled: bool) {
        self.voice_autoplay = enabled;
    }
}

fn persona_of(transcript: &Transcript) -> &str {
    &transcript.persona
}
