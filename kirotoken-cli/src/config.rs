//! CLI configuration file.
//!
//! An optional JSON file holding a default region and the fetch settings.
//! A missing file means defaults; a malformed one is an error.

use kirotoken_fetch::FetchSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/kirotoken`
/// - Linux: `~/.config/kirotoken`
/// - Windows: `%APPDATA%\kirotoken`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("kirotoken"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

// ============================================================================
// Errors
// ============================================================================

/// Errors loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// File is not valid config JSON.
    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

// ============================================================================
// Config
// ============================================================================

/// Contents of `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    /// Region used when the pasted credential names none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Outbound request settings.
    #[serde(flatten)]
    pub fetch: FetchSettings,
}

impl CliConfig {
    /// Loads the config at `path`, or defaults when the file is absent.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, timeout_secs: Option<u64>, region: Option<&str>) -> Self {
        if let Some(secs) = timeout_secs {
            self.fetch.timeout_secs = secs;
        }
        if let Some(region) = region {
            self.region = Some(region.to_string());
        }
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
