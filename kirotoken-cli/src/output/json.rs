//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Body printed when a command fails in JSON mode.
#[derive(Debug, Serialize)]
pub struct ErrorOutput<'a> {
    pub error: &'a str,
}

/// Effective configuration with its source path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput<'a, T: Serialize> {
    pub path: String,
    pub exists: bool,
    pub config: &'a T,
}

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats an error as `{"error": "..."}`.
    pub fn format_error(&self, error: &str) -> Result<String> {
        self.format(&ErrorOutput { error })
    }

    /// Formats a config together with where it was loaded from.
    pub fn format_config<T: Serialize>(&self, path: &Path, config: &T) -> Result<String> {
        self.format(&ConfigOutput {
            path: path.display().to_string(),
            exists: path.exists(),
            config,
        })
    }
}
