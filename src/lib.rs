//! EmprendoBot - IoT entrepreneurship chat assistant library
//!
//! This library provides the core functionality for the EmprendoBot terminal
//! assistant, including conversation management, the completion provider
//! abstraction, display pacing, voice output, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Transcript, bounded request window, and turn cycle
//! - `providers`: Completion service abstraction and the DeepSeek client
//! - `display`: Word-by-word typing effect for the terminal
//! - `voice`: Voice output surface (HTTP text-to-speech)
//! - `commands`: Interactive chat loop and one-shot question handler
//! - `config`: Configuration management and validation
//! - `prompts`: The assistant persona and usage hints
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use emprendobot::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     // Session usage would go here
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod voice;

// Re-export commonly used types
pub use config::Config;
pub use error::{EmprendoBotError, Result};
pub use providers::{CompletionError, GenerationParams, Message, Provider};
pub use session::{Session, Transcript, TurnReply, TurnState};
