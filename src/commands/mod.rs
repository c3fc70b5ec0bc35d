/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat` — Interactive chat session
- `ask`  — Answer a single question and exit

Both handlers build a [`Session`] from configuration and drive the
display sink and voice surface with its replies.
*/

use crate::config::Config;
use crate::error::Result;
use crate::providers::{DeepSeekProvider, GenerationParams, Provider};
use crate::prompts::SYSTEM_PROMPT;
use crate::session::Session;
use crate::voice::{VoiceError, VoiceSurface};

// Special commands parser for session control
pub mod special_commands;

/// Fixed warning shown when no API credential could be resolved.
pub const CREDENTIAL_WARNING: &str =
    "Advertencia: no se encontró la clave de API. EmprendoBot responderá con un aviso de configuración.";

/// Build a session from configuration, resolving the API credential.
///
/// When no credential is available the session is created without a
/// provider: every submit short-circuits to the configuration-missing
/// apology and the caller prints a persistent warning instead of failing.
pub fn build_session(config: &Config) -> Result<Session> {
    let provider: Option<Box<dyn Provider>> = match config.resolve_api_key() {
        Some(key) => Some(Box::new(DeepSeekProvider::new(&config.provider, key)?)),
        None => {
            tracing::warn!(
                "No API key in keyring or {}; completion calls disabled",
                config.provider.api_key_env
            );
            None
        }
    };

    let params = GenerationParams {
        max_tokens: config.chat.max_tokens,
        temperature: config.chat.temperature,
    };

    let mut session = Session::new(
        SYSTEM_PROMPT,
        provider,
        params,
        config.chat.window_size,
        config.chat.history_limit,
    );
    session.set_voice_autoplay(config.voice.enabled);
    Ok(session)
}

/// Run one full turn: submit, reveal the answer, speak it if enabled.
///
/// Returns true when the input produced a turn (false for empty input).
async fn run_turn(
    session: &mut Session,
    voice: &mut Box<dyn VoiceSurface>,
    user_text: &str,
    paced: bool,
) -> Result<bool> {
    let reply = match session.submit(user_text).await {
        Some(reply) => reply,
        None => return Ok(false),
    };

    let mut stdout = std::io::stdout();
    crate::display::type_out(&reply.text, &mut stdout, paced).await?;
    session.finish_rendering();

    if session.voice_autoplay() {
        match voice.speak(&reply.text).await {
            Ok(()) => {}
            Err(VoiceError::Unsupported) => {
                tracing::debug!("Voice surface unsupported, skipping playback");
            }
            Err(e) => {
                use colored::Colorize;
                eprintln!("{}", format!("Voz no disponible: {}", e).yellow());
            }
        }
    }

    Ok(true)
}

// Chat command handler
pub mod chat {
    //! Interactive chat session handler.
    //!
    //! Builds the session and voice surface, then runs a readline-based
    //! loop that routes special commands to session state changes and
    //! everything else to the assistant.

    use super::*;
    use crate::commands::special_commands::{
        parse_special_command, print_examples, print_help, SpecialCommand,
    };
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start the interactive chat session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `no_voice` - Disable automatic voice playback for this session
    pub async fn run_chat(config: Config, no_voice: bool) -> Result<()> {
        tracing::info!("Starting interactive chat session");

        let mut session = build_session(&config)?;
        if no_voice {
            session.set_voice_autoplay(false);
        }
        let mut voice = crate::voice::from_config(&config.voice);

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&session);
        if !session.has_provider() {
            eprintln!("{}", CREDENTIAL_WARNING.yellow());
        }

        loop {
            match rl.readline("tú> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Clear) => {
                            voice.stop().await;
                            session.reset();
                            println!("{}", "Historial de chat limpiado.".green());
                            continue;
                        }
                        Ok(SpecialCommand::Voice(enabled)) => {
                            if !enabled {
                                voice.stop().await;
                            }
                            session.set_voice_autoplay(enabled);
                            let state = if enabled { "activada" } else { "desactivada" };
                            println!("Voz {}.\n", state);
                            continue;
                        }
                        Ok(SpecialCommand::SetMaxTokens(value)) => {
                            let mut params = session.params();
                            params.max_tokens = value;
                            match session.set_params(params) {
                                Ok(()) => println!("Máximo de tokens: {}\n", value),
                                Err(e) => eprintln!("{}\n", e.red()),
                            }
                            continue;
                        }
                        Ok(SpecialCommand::SetTemperature(value)) => {
                            let mut params = session.params();
                            params.temperature = value;
                            match session.set_params(params) {
                                Ok(()) => println!("Temperatura: {}\n", value),
                                Err(e) => eprintln!("{}\n", e.red()),
                            }
                            continue;
                        }
                        Ok(SpecialCommand::Listen) => {
                            match voice.listen().await {
                                Ok(transcript) => {
                                    println!("{}", format!("Has dicho: {}", transcript).green());
                                    rl.add_history_entry(&transcript)?;
                                    // Dictated text enters the turn cycle as if typed.
                                    run_turn(&mut session, &mut voice, &transcript, true).await?;
                                }
                                Err(VoiceError::Unsupported) => {
                                    println!("{}", "Voz no disponible en este entorno.".yellow());
                                }
                                Err(e) => {
                                    eprintln!("{}", format!("Error de voz: {}", e).red());
                                }
                            }
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            print_status(&session);
                            continue;
                        }
                        Ok(SpecialCommand::Examples) => {
                            print_examples();
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    println!("{}", "EmprendoBot está generando ideas... 💡".cyan());
                    run_turn(&mut session, &mut voice, trimmed, true).await?;
                    println!();
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        voice.stop().await;
        println!("¡Hasta pronto!");
        Ok(())
    }

    /// Display the welcome banner with usage hints.
    fn print_welcome_banner(session: &Session) {
        println!("{}", "🚀 EmprendoBot IoT Assistant".bold());
        println!(
            "{}",
            "Tu copiloto para ideas de negocio IoT y planes de emprendimiento.".dimmed()
        );
        print_examples();
        let voice_state = if session.voice_autoplay() {
            "activada"
        } else {
            "desactivada"
        };
        println!(
            "{}",
            format!("Voz {} — escribe /ayuda para ver los comandos.", voice_state).dimmed()
        );
        println!();
    }

    /// Display current session status.
    fn print_status(session: &Session) {
        let params = session.params();
        println!("\n{}", "Estado de la sesión:".bold());
        println!("  Estado: {}", session.state());
        println!(
            "  Mensajes en historial: {} (sistema incluido)",
            session.transcript().len()
        );
        println!("  Máximo de tokens: {}", params.max_tokens);
        println!("  Temperatura: {}", params.temperature);
        println!(
            "  Voz automática: {}",
            if session.voice_autoplay() { "sí" } else { "no" }
        );
        println!(
            "  Servicio configurado: {}",
            if session.has_provider() { "sí" } else { "no" }
        );
        println!();
    }
}

// One-shot ask command handler
pub mod ask {
    //! Single-question handler: submits one prompt through the same
    //! session machinery and exits.

    use super::*;
    use colored::Colorize;

    /// Answer a single question and exit.
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `prompt` - The question to answer
    /// * `plain` - Skip the typing-effect pacing (useful for scripts)
    pub async fn run_ask(config: Config, prompt: String, plain: bool) -> Result<()> {
        let mut session = build_session(&config)?;
        // One-shot output is meant for pipelines; keep it silent.
        session.set_voice_autoplay(false);
        let mut voice = crate::voice::from_config(&config.voice);

        if !session.has_provider() {
            eprintln!("{}", CREDENTIAL_WARNING.yellow());
        }

        let produced = run_turn(&mut session, &mut voice, &prompt, !plain).await?;
        if !produced {
            tracing::debug!("Empty prompt, nothing to do");
        }
        Ok(())
    }
}
