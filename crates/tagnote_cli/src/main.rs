//! CLI driver for the tagnote core.
//!
//! # Responsibility
//! - Open the configured notes document and run one tool call.
//! - Print the JSON result to stdout, or the structured error to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tagnote_core::config::CoreConfig;
use tagnote_core::{call_tool, core_version, tool_descriptors, ToolError};

#[derive(Debug, Parser)]
#[command(name = "tagnote", version, about = "Tagged personal notes over one JSON document")]
struct Cli {
    /// Path to the notes document (created with the default schema if absent).
    /// Overrides `TAGNOTE_NOTES_FILE`.
    #[arg(long)]
    notes_file: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error. Overrides `TAGNOTE_LOG_LEVEL`.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Overrides `TAGNOTE_LOG_DIR`.
    /// No file logs when neither is set.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print tool descriptors as JSON.
    Tools,
    /// Run one tool call.
    Call {
        /// Tool name, e.g. `create_note`.
        tool: String,
        /// JSON argument record. Defaults to `{}`.
        arguments: Option<String>,
    },
    /// Print the core version.
    Version,
}

impl Cli {
    /// Layers command-line flags over `base`.
    fn config(&self, base: CoreConfig) -> CoreConfig {
        CoreConfig {
            notes_file: self.notes_file.clone().unwrap_or(base.notes_file),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_dir: self.log_dir.clone().or(base.log_dir),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config(CoreConfig::from_env());

    if let Err(err) = config.init_logging() {
        eprintln!("tagnote: logging disabled: {err}");
    }

    match cli.command {
        Command::Version => {
            println!("tagnote_core version={}", core_version());
            ExitCode::SUCCESS
        }
        Command::Tools => match serde_json::to_value(tool_descriptors()) {
            Ok(value) => print_json(&value),
            Err(err) => {
                eprintln!("tagnote: failed to encode tool descriptors: {err}");
                ExitCode::FAILURE
            }
        },
        Command::Call { tool, arguments } => match run_call(&config, &tool, arguments) {
            Ok(value) => print_json(&value),
            Err(err) => {
                log::warn!(
                    "event=tool_call module=cli status=error tool={tool} kind={}",
                    err.kind
                );
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
                );
                ExitCode::FAILURE
            }
        },
    }
}

fn run_call(
    config: &CoreConfig,
    tool: &str,
    arguments: Option<String>,
) -> Result<serde_json::Value, ToolError> {
    let arguments = match arguments.as_deref() {
        None => serde_json::Value::Null,
        Some(raw) => serde_json::from_str(raw).map_err(|err| ToolError {
            kind: "validation_error",
            message: format!("arguments are not valid JSON: {err}"),
        })?,
    };
    let mut service = config.open_service()?;
    call_tool(&mut service, tool, arguments)
}

fn print_json(value: &serde_json::Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("tagnote: failed to encode output: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::PathBuf;
    use tagnote_core::config::CoreConfig;

    fn env_config() -> CoreConfig {
        CoreConfig {
            notes_file: PathBuf::from("/env/notes.json"),
            log_level: "debug".to_string(),
            log_dir: Some(PathBuf::from("/env/logs")),
        }
    }

    #[test]
    fn flags_override_environment_values() {
        let cli = Cli::try_parse_from([
            "tagnote",
            "--notes-file",
            "/flag/notes.json",
            "--log-level",
            "warn",
            "tools",
        ])
        .unwrap();
        let config = cli.config(env_config());
        assert_eq!(config.notes_file, PathBuf::from("/flag/notes.json"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/env/logs")));
    }

    #[test]
    fn environment_values_apply_without_flags() {
        let cli = Cli::try_parse_from(["tagnote", "version"]).unwrap();
        assert_eq!(cli.config(env_config()), env_config());
    }
}
