//! Command-line interface definition for EmprendoBot
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat and one-shot questions.

use clap::{Parser, Subcommand};

/// EmprendoBot - IoT entrepreneurship chat assistant
///
/// Converse with an AI mentor specialized in IoT business ideas,
/// revenue models, and pitches for entrepreneurship courses.
#[derive(Parser, Debug, Clone)]
#[command(name = "emprendobot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for EmprendoBot
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Disable automatic voice playback for this session
        #[arg(long)]
        no_voice: bool,
    },

    /// Answer a single question and exit
    Ask {
        /// The question to answer
        prompt: String,

        /// Print the answer at once, without the typing effect
        #[arg(long)]
        plain: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat { no_voice: false },
        }
    }
}
