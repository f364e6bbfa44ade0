//! CLI command implementations.

pub mod config;
pub mod import;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{default_config_path, CliConfig};
use crate::Cli;

/// Loads the config file named on the command line (or the default one)
/// and applies flag overrides.
pub(crate) async fn load_config(cli: &Cli) -> Result<(PathBuf, CliConfig)> {
    let path = cli.config_file.clone().unwrap_or_else(default_config_path);
    let config = CliConfig::load(&path)
        .await?
        .with_overrides(cli.timeout, cli.region.as_deref());
    Ok((path, config))
}
