//! Special commands parser for interactive chat mode
//!
//! This module parses the session-control commands that can be entered
//! during a chat session. Special commands modify session state or print
//! information rather than being sent to the assistant:
//! - Clear the conversation history
//! - Toggle automatic voice playback
//! - Adjust the sampling parameters (answer length, temperature)
//! - View session status, example prompts, and help
//! - Dictate a question through the voice surface
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Comando desconocido: {0}\n\nEscribe '/ayuda' para ver los comandos disponibles")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Argumento no válido para {command}: {arg}\n\nEscribe '/ayuda' para ver el uso")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("El comando {command} necesita un argumento\n\nUso: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq)]
pub enum SpecialCommand {
    /// Reset the transcript to just the persona message
    Clear,

    /// Enable or disable automatic voice playback of answers
    Voice(bool),

    /// Set the answer-length cap in tokens
    SetMaxTokens(u32),

    /// Set the sampling temperature
    SetTemperature(f32),

    /// Dictate a question through the voice surface
    Listen,

    /// Display session status (turn state, settings, history length)
    ShowStatus,

    /// Display the example prompts
    Examples,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the input to the assistant
    None,
}

/// Parse a user input string into a special command
///
/// Commands are case-insensitive. Input that does not start with `/`
/// (apart from the bare exit words) is treated as a regular question.
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` when input starts with "/" but
/// matches no command, and argument errors when a command's argument is
/// missing or out of range.
///
/// # Examples
///
/// ```
/// use emprendobot::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/limpiar").unwrap();
/// assert_eq!(cmd, SpecialCommand::Clear);
///
/// let cmd = parse_special_command("/voz off").unwrap();
/// assert_eq!(cmd, SpecialCommand::Voice(false));
///
/// let cmd = parse_special_command("dame ideas de IoT").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "salir" && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/limpiar" | "/clear" => Ok(SpecialCommand::Clear),

        // Voice playback toggle
        "/voz on" | "/voz si" | "/voz sí" => Ok(SpecialCommand::Voice(true)),
        "/voz off" | "/voz no" => Ok(SpecialCommand::Voice(false)),
        "/voz" => Err(CommandError::MissingArgument {
            command: "/voz".to_string(),
            usage: "/voz <on|off>".to_string(),
        }),
        input if input.starts_with("/voz ") => {
            let arg = input[5..].trim();
            Err(CommandError::UnsupportedArgument {
                command: "/voz".to_string(),
                arg: arg.to_string(),
            })
        }

        // Sampling parameter adjustments
        "/tokens" => Err(CommandError::MissingArgument {
            command: "/tokens".to_string(),
            usage: "/tokens <200-4000>".to_string(),
        }),
        input if input.starts_with("/tokens ") => {
            let arg = input[8..].trim();
            match arg.parse::<u32>() {
                Ok(value) => Ok(SpecialCommand::SetMaxTokens(value)),
                Err(_) => Err(CommandError::UnsupportedArgument {
                    command: "/tokens".to_string(),
                    arg: arg.to_string(),
                }),
            }
        }

        "/temp" => Err(CommandError::MissingArgument {
            command: "/temp".to_string(),
            usage: "/temp <0.1-1.0>".to_string(),
        }),
        input if input.starts_with("/temp ") => {
            let arg = input[6..].trim();
            match arg.parse::<f32>() {
                Ok(value) => Ok(SpecialCommand::SetTemperature(value)),
                Err(_) => Err(CommandError::UnsupportedArgument {
                    command: "/temp".to_string(),
                    arg: arg.to_string(),
                }),
            }
        }

        "/escuchar" | "/listen" => Ok(SpecialCommand::Listen),

        "/estado" | "/status" => Ok(SpecialCommand::ShowStatus),
        "/ejemplos" => Ok(SpecialCommand::Examples),
        "/ayuda" | "/help" | "/?" => Ok(SpecialCommand::Help),
        "/salir" | "salir" | "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for all special commands.
pub fn print_help() {
    use colored::Colorize;

    println!("\n{}", "Comandos disponibles:".bold());
    println!("  {}  Limpia el historial de chat", "/limpiar".cyan());
    println!("  {}  Activa o desactiva la voz (ej. /voz off)", "/voz <on|off>".cyan());
    println!("  {}  Ajusta la longitud de respuesta (200-4000)", "/tokens <n>".cyan());
    println!("  {}  Ajusta la creatividad (0.1-1.0)", "/temp <x>".cyan());
    println!("  {}  Dicta tu pregunta por voz", "/escuchar".cyan());
    println!("  {}  Muestra el estado de la sesión", "/estado".cyan());
    println!("  {}  Muestra ejemplos de uso", "/ejemplos".cyan());
    println!("  {}  Muestra esta ayuda", "/ayuda".cyan());
    println!("  {}  Cierra la sesión", "/salir".cyan());
    println!();
}

/// Print the example prompts from the persona's usage hints.
pub fn print_examples() {
    use colored::Colorize;

    println!("\n{}", "¿Cómo usar EmprendoBot?".bold());
    for hint in crate::prompts::USAGE_HINTS {
        println!("  - {}", hint.cyan());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clear() {
        assert_eq!(
            parse_special_command("/limpiar").unwrap(),
            SpecialCommand::Clear
        );
        assert_eq!(
            parse_special_command("/CLEAR").unwrap(),
            SpecialCommand::Clear
        );
    }

    #[test]
    fn test_parse_voice_on_off() {
        assert_eq!(
            parse_special_command("/voz on").unwrap(),
            SpecialCommand::Voice(true)
        );
        assert_eq!(
            parse_special_command("/voz off").unwrap(),
            SpecialCommand::Voice(false)
        );
    }

    #[test]
    fn test_parse_voice_missing_argument() {
        assert!(matches!(
            parse_special_command("/voz"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_voice_bad_argument() {
        assert!(matches!(
            parse_special_command("/voz maybe"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(
            parse_special_command("/tokens 2000").unwrap(),
            SpecialCommand::SetMaxTokens(2000)
        );
    }

    #[test]
    fn test_parse_tokens_non_numeric() {
        assert!(matches!(
            parse_special_command("/tokens muchos"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(
            parse_special_command("/temp 0.5").unwrap(),
            SpecialCommand::SetTemperature(0.5)
        );
    }

    #[test]
    fn test_parse_temperature_missing() {
        assert!(matches!(
            parse_special_command("/temp"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_status_examples_help() {
        assert_eq!(
            parse_special_command("/estado").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(
            parse_special_command("/ejemplos").unwrap(),
            SpecialCommand::Examples
        );
        assert_eq!(
            parse_special_command("/ayuda").unwrap(),
            SpecialCommand::Help
        );
    }

    #[test]
    fn test_parse_listen() {
        assert_eq!(
            parse_special_command("/escuchar").unwrap(),
            SpecialCommand::Listen
        );
    }

    #[test]
    fn test_parse_exit_aliases() {
        for alias in ["/salir", "salir", "exit", "quit", "/exit"] {
            assert_eq!(
                parse_special_command(alias).unwrap(),
                SpecialCommand::Exit,
                "alias {} should exit",
                alias
            );
        }
    }

    #[test]
    fn test_plain_question_is_not_a_command() {
        assert_eq!(
            parse_special_command("dame ideas de negocio IoT").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_unknown_slash_command_errors() {
        assert!(matches!(
            parse_special_command("/foo"),
            Err(CommandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_error_messages_are_spanish() {
        let err = parse_special_command("/foo").unwrap_err();
        assert!(err.to_string().contains("Comando desconocido"));

        let err = parse_special_command("/voz").unwrap_err();
        assert!(err.to_string().contains("necesita un argumento"));
    }
}
