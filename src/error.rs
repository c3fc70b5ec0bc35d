//! Error types for EmprendoBot
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling. Completion failures
//! (the classified taxonomy that maps to localized fallback messages)
//! live in [`crate::providers::CompletionError`]; this enum covers
//! everything else.

use thiserror::Error;

/// Main error type for EmprendoBot operations
///
/// This enum encompasses errors that can occur during configuration
/// loading, provider setup, voice playback, and the interactive loop.
#[derive(Error, Debug)]
pub enum EmprendoBotError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider construction or setup errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for the completion service
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Voice surface errors (TTS endpoint, playback)
    #[error("Voice error: {0}")]
    Voice(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for EmprendoBot operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
