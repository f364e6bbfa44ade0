//! Config command - inspect configuration.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::load_config;
use crate::config::default_config_dir;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands.
#[derive(Subcommand, Clone, Copy)]
pub enum ConfigAction {
    /// Show effective configuration (default).
    Show,

    /// Show configuration paths.
    Path,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let (path, config) = load_config(cli).await?;

    match cli.format {
        OutputFormat::Text => {
            let endpoints = &config.fetch.endpoints;
            println!("KiroToken Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("File:            {}", path.display());
            println!(
                "Default region:  {}",
                config.region.as_deref().unwrap_or(kirotoken_core::DEFAULT_REGION)
            );
            println!("Timeout:         {}s", config.fetch.timeout_secs);
            println!("User agent:      {}", config.fetch.user_agent);
            println!();
            println!("Endpoints:");
            println!("  BuilderId token: {}", endpoints.builder_id_token);
            println!("  Social refresh:  {}", endpoints.social_refresh);
            println!("  Usage limits:    {}", endpoints.usage_limits);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_config(&path, &config)?);
        }
    }

    Ok(())
}

async fn show_paths(cli: &Cli) -> Result<()> {
    let (path, _) = load_config(cli).await?;
    let config_dir = default_config_dir();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:  {}", config_dir.display());
            println!("Config file: {}", path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "configDir": config_dir.display().to_string(),
                "configFile": path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}
