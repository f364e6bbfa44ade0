//! Import command - turn pasted credentials into a token record.

use anyhow::{Context, Result};
use clap::Args;
use kirotoken_fetch::FetchContext;
use kirotoken_import::ImportPipeline;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use super::load_config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the import command.
#[derive(Args, Default, Clone)]
pub struct ImportArgs {
    /// Pasted credential text. Reads stdin when omitted or `-`.
    #[arg(conflicts_with = "input")]
    pub text: Option<String>,

    /// Read the pasted text from a file.
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}

/// Runs the import command.
pub async fn run(args: &ImportArgs, cli: &Cli) -> Result<()> {
    let (_, config) = load_config(cli).await?;
    let raw = read_input(args).await?;

    let ctx = FetchContext::with_settings(config.fetch.clone())
        .context("Failed to build HTTP client")?;
    let mut pipeline = ImportPipeline::from_context(ctx);
    if let Some(region) = &config.region {
        pipeline = pipeline.with_default_region(region);
    }

    info!(len = raw.len(), "Running import");
    let result = pipeline.run(&raw).await?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&result)?);
        }
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_result(&result));
        }
    }

    Ok(())
}

/// Reads the pasted text from the argument, a file or stdin.
async fn read_input(args: &ImportArgs) -> Result<String> {
    if let Some(text) = args.text.as_deref().filter(|t| *t != "-") {
        debug!("Reading input from argument");
        return Ok(text.to_string());
    }

    if let Some(path) = &args.input {
        debug!(path = %path.display(), "Reading input from file");
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    debug!("Reading input from stdin");
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("Failed to read stdin")?;
    Ok(buf)
}
