//! Optional voice output/input surface
//!
//! Speech is a host-provided, environment-dependent capability: it may be
//! missing entirely, so "unsupported" is a valid state and never an
//! assumption failure. The bundled backend speaks through a Coqui-style
//! HTTP TTS endpoint, driving each utterance from a single detached task;
//! starting new speech requests cancellation of the previous task and
//! waits a bounded interval before proceeding. Voice failures are surfaced
//! to the user but never disturb the conversation state.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How long to wait for a previous utterance to stop before giving up.
const STOP_WAIT: Duration = Duration::from_secs(1);

/// Voice surface failure
#[derive(Error, Debug)]
pub enum VoiceError {
    /// The capability is not available in this environment
    #[error("voice capability not available")]
    Unsupported,

    /// A previous utterance could not be stopped in time
    #[error("previous speech is still playing")]
    Busy,

    /// The synthesis request failed
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

/// Host-provided speech capability
///
/// `speak` voices text aloud, best effort; `listen` transcribes a single
/// utterance and returns the transcript, which callers feed back into the
/// conversation as if typed. Both default to unsupported.
#[async_trait]
pub trait VoiceSurface: Send {
    /// Speak `text` aloud, cancelling any utterance still in flight.
    async fn speak(&mut self, text: &str) -> Result<(), VoiceError>;

    /// Transcribe one spoken utterance.
    async fn listen(&mut self) -> Result<String, VoiceError> {
        Err(VoiceError::Unsupported)
    }

    /// Request cancellation of any in-flight speech.
    async fn stop(&mut self);
}

/// Voice surface for environments with no speech capability at all.
pub struct NullVoice;

#[async_trait]
impl VoiceSurface for NullVoice {
    async fn speak(&mut self, _text: &str) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }

    async fn stop(&mut self) {}
}

/// Speech output through an HTTP TTS service
///
/// Sends each utterance to `{base}/api/tts` and lets the service host
/// handle audio playback. At most one synthesis task is active at a time;
/// `speak` cancels the previous task and waits up to [`STOP_WAIT`] for it
/// to finish. If it does not stop in time the new utterance is skipped so
/// two voices never overlap.
///
/// `listen` stays unsupported in this backend: microphone capture is
/// delegated to the host and not reachable from the terminal process.
pub struct HttpTtsVoice {
    client: Client,
    base_url: String,
    language: String,
    task: Option<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl HttpTtsVoice {
    /// Create a voice surface around a TTS service base URL.
    pub fn new(base_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
            task: None,
            cancel: CancellationToken::new(),
        }
    }

    /// The synthesis endpoint for a given utterance.
    fn synth_url(&self, text: &str) -> String {
        format!(
            "{}/api/tts?text={}&language_id={}",
            self.base_url,
            urlencoding::encode(text),
            self.language
        )
    }

    /// Cancel the previous utterance and wait a bounded interval for it.
    ///
    /// Returns false when the prior task is still alive after the wait.
    async fn stop_previous(&mut self) -> bool {
        self.cancel.cancel();
        if let Some(handle) = self.task.take() {
            match tokio::time::timeout(STOP_WAIT, handle).await {
                Ok(_) => {}
                Err(_) => {
                    tracing::warn!("Previous speech did not stop within {:?}", STOP_WAIT);
                    return false;
                }
            }
        }
        self.cancel = CancellationToken::new();
        true
    }
}

#[async_trait]
impl VoiceSurface for HttpTtsVoice {
    async fn speak(&mut self, text: &str) -> Result<(), VoiceError> {
        if text.trim().is_empty() {
            return Ok(());
        }

        if !self.stop_previous().await {
            // Never start a second voice over one that refuses to stop.
            return Err(VoiceError::Busy);
        }

        let url = self.synth_url(text);
        let client = self.client.clone();
        let token = self.cancel.clone();

        self.task = Some(tokio::spawn(async move {
            let request = async {
                match client.get(&url).send().await {
                    Ok(response) => {
                        if let Err(e) = response.error_for_status() {
                            tracing::warn!("TTS synthesis failed: {}", e);
                        } else {
                            tracing::debug!("TTS utterance delivered");
                        }
                    }
                    Err(e) => tracing::warn!("TTS request failed: {}", e),
                }
            };
            tokio::select! {
                _ = request => {}
                _ = token.cancelled() => {
                    tracing::debug!("TTS utterance cancelled");
                }
            }
        }));

        Ok(())
    }

    async fn stop(&mut self) {
        self.stop_previous().await;
    }
}

/// Build the voice surface for the configured environment.
///
/// Returns the HTTP backend when a TTS URL is configured and the null
/// surface otherwise.
pub fn from_config(config: &crate::config::VoiceConfig) -> Box<dyn VoiceSurface> {
    match &config.tts_url {
        Some(url) => Box::new(HttpTtsVoice::new(url.clone(), config.language.clone())),
        None => Box::new(NullVoice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_null_voice_is_unsupported() {
        let mut voice = NullVoice;
        assert!(matches!(voice.speak("hola").await, Err(VoiceError::Unsupported)));
        assert!(matches!(voice.listen().await, Err(VoiceError::Unsupported)));
    }

    #[tokio::test]
    async fn test_http_voice_listen_is_unsupported() {
        let mut voice = HttpTtsVoice::new("http://localhost:5002", "es");
        assert!(matches!(voice.listen().await, Err(VoiceError::Unsupported)));
    }

    #[test]
    fn test_synth_url_encodes_text() {
        let voice = HttpTtsVoice::new("http://localhost:5002/", "es");
        let url = voice.synth_url("hola mundo");
        assert_eq!(
            url,
            "http://localhost:5002/api/tts?text=hola%20mundo&language_id=es"
        );
    }

    #[tokio::test]
    async fn test_speak_hits_tts_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tts"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut voice = HttpTtsVoice::new(server.uri(), "es");
        voice.speak("hola").await.unwrap();
        // Wait for the synthesis task itself so the mock expectation holds.
        voice.task.take().unwrap().await.unwrap();
    }

    #[tokio::test]
    async fn test_speak_replaces_previous_utterance() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tts"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut voice = HttpTtsVoice::new(server.uri(), "es");
        voice.speak("primera frase").await.unwrap();
        voice.speak("segunda frase").await.unwrap();
        voice.stop().await;
    }

    #[tokio::test]
    async fn test_speak_empty_text_is_noop() {
        let mut voice = HttpTtsVoice::new("http://localhost:9", "es");
        assert!(voice.speak("   ").await.is_ok());
        assert!(voice.task.is_none());
    }

    #[tokio::test]
    async fn test_stop_without_speech_is_noop() {
        let mut voice = HttpTtsVoice::new("http://localhost:9", "es");
        voice.stop().await;
    }

    #[test]
    fn test_from_config_selects_backend() {
        let config = crate::config::VoiceConfig {
            enabled: true,
            tts_url: None,
            language: "es".to_string(),
        };
        // A null surface is returned when no endpoint is configured.
        let _voice = from_config(&config);

        let config = crate::config::VoiceConfig {
            enabled: true,
            tts_url: Some("http://localhost:5002".to_string()),
            language: "es".to_string(),
        };
        let _voice = from_config(&config);
    }
}
