//! EmprendoBot - IoT entrepreneurship chat assistant
//!
#![doc = "EmprendoBot - IoT entrepreneurship chat assistant"]
#![doc = "Main entry point for the EmprendoBot terminal application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use emprendobot::cli::{Cli, Commands};
use emprendobot::commands;
use emprendobot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { no_voice } => {
            if no_voice {
                tracing::debug!("Voice playback disabled from CLI");
            }
            commands::chat::run_chat(config, no_voice).await?;
            Ok(())
        }
        Commands::Ask { prompt, plain } => {
            tracing::info!("Answering single question");
            commands::ask::run_ask(config, prompt, plain).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "emprendobot=debug"
    } else {
        "emprendobot=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
