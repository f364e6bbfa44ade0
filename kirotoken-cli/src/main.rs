// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `KiroToken` CLI - import pasted Kiro credentials from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Import from an argument
//! kirotoken '{"refreshToken":"aor...","clientId":"...","clientSecret":"..."}'
//!
//! # Import from a file, pretty JSON
//! kirotoken import --input creds.txt --pretty
//!
//! # Import from stdin, human-readable
//! pbpaste | kirotoken --format text
//!
//! # Show effective configuration
//! kirotoken config
//! ```

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use kirotoken_core::ImportError;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config as config_cmd, import};
use output::{JsonFormatter, TextFormatter};

// ============================================================================
// CLI Definition
// ============================================================================

/// `KiroToken` CLI - Kiro credential import.
#[derive(Parser)]
#[command(name = "kirotoken")]
#[command(about = "Import pasted Kiro credentials into a portable token record")]
#[command(long_about = r#"
Reads pasted Kiro account credentials, refreshes the access token and
reports the account's usage quota.

Accepted input:
  • a bare refresh token (aor...:...)
  • a JSON object with refreshToken
  • 账号：{...} and 登录token：{...} blocks
  • two JSON objects joined by |

Examples:
  kirotoken '<pasted text>'          # From an argument
  kirotoken --input creds.txt        # From a file
  pbpaste | kirotoken --format text  # From stdin
"#)]
#[command(version)]
#[command(author = "KiroToken Contributors")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'import' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Import arguments when no subcommand is given.
    #[command(flatten)]
    pub import: import::ImportArgs,

    /// Output format (json or text).
    #[arg(long, short = 'f', default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Config file (defaults to the user config directory).
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Region used when the input names none.
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging, no error text).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Import pasted credentials (default if no command specified).
    #[command(visible_alias = "i")]
    Import(import::ImportArgs),

    /// Show configuration.
    Config(config_cmd::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// JSON output for scripting.
    #[default]
    Json,
    /// Human-readable text with colors.
    Text,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// Upstream, transport or local failure.
    Error = 1,
    /// The pasted input cannot be imported.
    InvalidInput = 2,
}

impl ExitCode {
    /// Maps a command error to an exit code.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<ImportError>() {
            Some(e) if e.is_user_error() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("kirotoken=debug,info")
    } else {
        EnvFilter::new("kirotoken=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Import(args)) => import::run(args, &cli).await,
        Some(Commands::Config(args)) => config_cmd::run(args, &cli).await,
        None => import::run(&cli.import, &cli).await,
    };

    if let Err(e) = result {
        report_error(&e, &cli);
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

/// Prints a failed command's error in the selected format.
fn report_error(error: &anyhow::Error, cli: &Cli) {
    let message = format!("{error:#}");
    match cli.format {
        OutputFormat::Json => match JsonFormatter::new(cli.pretty).format_error(&message) {
            Ok(body) => println!("{body}"),
            Err(_) => println!(r#"{{"error":"internal error"}}"#),
        },
        OutputFormat::Text if !cli.quiet => {
            eprintln!("{}", TextFormatter::new(!cli.no_color).format_error(&message));
        }
        OutputFormat::Text => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        let user = anyhow::Error::new(ImportError::InputFormat);
        assert_eq!(ExitCode::for_error(&user), ExitCode::InvalidInput);

        let upstream = anyhow::Error::new(ImportError::UpstreamExchange {
            status: 400,
            message: "invalid_grant".to_string(),
        });
        assert_eq!(ExitCode::for_error(&upstream), ExitCode::Error);

        let other = anyhow::anyhow!("disk on fire");
        assert_eq!(ExitCode::for_error(&other), ExitCode::Error);
        assert_eq!(ExitCode::Success as i32, 0);
    }

    #[test]
    fn test_context_keeps_exit_code() {
        let err = anyhow::Error::new(ImportError::EmptyInput).context("import failed");
        assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidInput);
    }

    #[test]
    fn test_parse_default_import() {
        let cli = Cli::try_parse_from(["kirotoken", "aorTOKEN", "--pretty"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.import.text.as_deref(), Some("aorTOKEN"));
        assert!(cli.pretty);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_import_subcommand() {
        let cli = Cli::try_parse_from([
            "kirotoken",
            "import",
            "--input",
            "creds.txt",
            "--format",
            "text",
            "--region",
            "eu-west-1",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Import(args)) => {
                assert_eq!(args.input, Some(PathBuf::from("creds.txt")));
                assert!(args.text.is_none());
            }
            _ => panic!("expected import"),
        }
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_text_and_input_conflict() {
        assert!(Cli::try_parse_from(["kirotoken", "aorTOKEN", "--input", "creds.txt"]).is_err());
    }

    #[test]
    fn test_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["kirotoken", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config(_))));
    }
}
