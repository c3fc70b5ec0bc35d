//! Completion provider abstraction and implementations
//!
//! The base module defines the shared message type, sampling parameters,
//! the classified failure taxonomy, and the `Provider` trait; `deepseek`
//! implements the trait against a DeepSeek-compatible HTTP endpoint.

pub mod base;
pub mod deepseek;

pub use base::{CompletionError, GenerationParams, Message, Provider};
pub use deepseek::DeepSeekProvider;
