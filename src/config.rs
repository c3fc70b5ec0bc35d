//! Configuration management for EmprendoBot
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//! The API credential itself is resolved separately at session start,
//! from the OS keyring or an environment variable; see [`Config::resolve_api_key`].

use crate::error::{EmprendoBotError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Keyring service name under which the API key may be stored.
const KEYRING_SERVICE: &str = "emprendobot";
/// Keyring entry name for the completion-service credential.
const KEYRING_USER: &str = "api-key";

/// Main configuration structure for EmprendoBot
///
/// Holds the completion endpoint settings, the conversation window and
/// retention policy, and the voice output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completion service configuration
    #[serde(default)]
    pub provider: DeepSeekConfig,

    /// Conversation and sampling configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Voice output configuration
    #[serde(default)]
    pub voice: VoiceConfig,
}

/// DeepSeek-compatible completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepSeekConfig {
    /// Chat-completions endpoint URL
    ///
    /// Points at the DeepSeek API by default; any OpenAI-compatible URL
    /// works, which allows tests to point the provider at a mock server.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u64,

    /// Environment variable consulted for the API key when the keyring
    /// holds no entry
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_url() -> String {
    "https://api.deepseek.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_request_timeout() -> u64 {
    90
}

fn default_api_key_env() -> String {
    "DEEPSEEK_API_KEY".to_string()
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            timeout_seconds: default_request_timeout(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Conversation window, retention, and sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum number of messages kept in the transcript (system message
    /// included) before the oldest exchanges are dropped
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Maximum number of messages sent with each request (system message
    /// included)
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Default upper bound on answer length, in tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Default sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_history_limit() -> usize {
    40
}

fn default_window_size() -> usize {
    15
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            window_size: default_window_size(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Voice output configuration
///
/// Speech synthesis is delegated to an HTTP TTS service; when no endpoint
/// is configured the voice surface reports itself unsupported and the chat
/// continues silently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Whether answers are spoken automatically
    #[serde(default = "default_voice_enabled")]
    pub enabled: bool,

    /// Base URL of the TTS service (e.g. `http://localhost:5002`)
    #[serde(default)]
    pub tts_url: Option<String>,

    /// Synthesis language identifier
    #[serde(default = "default_voice_language")]
    pub language: String,
}

fn default_voice_enabled() -> bool {
    true
}

fn default_voice_language() -> String {
    "es".to_string()
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: default_voice_enabled(),
            tts_url: None,
            language: default_voice_language(),
        }
    }
}

impl Config {
    /// Load configuration from a file with environment overrides applied
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EmprendoBotError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| EmprendoBotError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_url) = std::env::var("EMPRENDOBOT_API_URL") {
            self.provider.api_url = api_url;
        }

        if let Ok(model) = std::env::var("EMPRENDOBOT_MODEL") {
            self.provider.model = model;
        }

        if let Ok(timeout) = std::env::var("EMPRENDOBOT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid EMPRENDOBOT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(tts_url) = std::env::var("EMPRENDOBOT_TTS_URL") {
            self.voice.tts_url = Some(tts_url);
        }
    }

    /// Validate the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns error when a value is out of range or structurally invalid.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.provider.api_url).map_err(|e| {
            EmprendoBotError::Config(format!(
                "Invalid api_url '{}': {}",
                self.provider.api_url, e
            ))
        })?;

        if self.provider.model.is_empty() {
            return Err(EmprendoBotError::Config("model cannot be empty".to_string()).into());
        }

        if self.provider.timeout_seconds == 0 {
            return Err(EmprendoBotError::Config(
                "timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        // The window needs room for the system message plus at least one
        // exchange message; the transcript must hold at least one full turn.
        if self.chat.window_size < 2 {
            return Err(
                EmprendoBotError::Config("window_size must be at least 2".to_string()).into(),
            );
        }

        if self.chat.history_limit < 3 {
            return Err(
                EmprendoBotError::Config("history_limit must be at least 3".to_string()).into(),
            );
        }

        if self.chat.history_limit < self.chat.window_size {
            return Err(EmprendoBotError::Config(
                "history_limit must not be smaller than window_size".to_string(),
            )
            .into());
        }

        if let Some(tts_url) = &self.voice.tts_url {
            Url::parse(tts_url).map_err(|e| {
                EmprendoBotError::Config(format!("Invalid tts_url '{}': {}", tts_url, e))
            })?;
        }

        Ok(())
    }

    /// Resolve the completion-service credential
    ///
    /// Looks in the OS keyring first (`emprendobot` / `api-key`), then in
    /// the configured environment variable. Returns `None` when neither
    /// yields a non-empty value; the caller disables the completion call
    /// path and surfaces a persistent configuration warning instead of
    /// failing.
    pub fn resolve_api_key(&self) -> Option<String> {
        match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
            Ok(entry) => match entry.get_password() {
                Ok(key) if !key.trim().is_empty() => {
                    tracing::debug!("API key resolved from keyring");
                    return Some(key);
                }
                Ok(_) => tracing::debug!("Keyring entry present but empty"),
                Err(keyring::Error::NoEntry) => {
                    tracing::debug!("No keyring entry for API key");
                }
                Err(e) => tracing::warn!("Keyring lookup failed: {}", e),
            },
            Err(e) => tracing::warn!("Keyring unavailable: {}", e),
        }

        match std::env::var(&self.provider.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                tracing::debug!("API key resolved from {}", self.provider.api_key_env);
                Some(key)
            }
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: DeepSeekConfig::default(),
            chat: ChatConfig::default(),
            voice: VoiceConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chat.history_limit, 40);
        assert_eq!(config.chat.window_size, 15);
        assert_eq!(config.provider.timeout_seconds, 90);
        assert_eq!(config.provider.model, "deepseek-chat");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/config.yaml").unwrap();
        assert_eq!(config.chat.window_size, 15);
        assert!(config.voice.enabled);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "provider:\n  model: deepseek-reasoner\n  timeout_seconds: 30\nchat:\n  history_limit: 20\n  window_size: 7\nvoice:\n  enabled: false"
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.provider.model, "deepseek-reasoner");
        assert_eq!(config.provider.timeout_seconds, 30);
        assert_eq!(config.chat.history_limit, 20);
        assert_eq!(config.chat.window_size, 7);
        assert!(!config.voice.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chat:\n  max_tokens: 2000").unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.chat.max_tokens, 2000);
        assert_eq!(config.chat.history_limit, 40);
        assert_eq!(config.provider.api_url, default_api_url());
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "provider: [not, a, map").unwrap();
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_api_url() {
        let mut config = Config::default();
        config.provider.api_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let mut config = Config::default();
        config.provider.model = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.provider.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tiny_window() {
        let mut config = Config::default();
        config.chat.window_size = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_history_smaller_than_window() {
        let mut config = Config::default();
        config.chat.history_limit = 10;
        config.chat.window_size = 15;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_tts_url() {
        let mut config = Config::default();
        config.voice.tts_url = Some("::bad::".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_tts_url() {
        let mut config = Config::default();
        config.voice.tts_url = Some("http://localhost:5002".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.chat.history_limit, config.chat.history_limit);
        assert_eq!(parsed.provider.api_url, config.provider.api_url);
    }
}
