//! The combined pipeline result.

use serde::{Deserialize, Serialize};

use super::token::{CanonicalTokenRecord, ClientSecretArtifact};
use super::usage::UsageSnapshot;

/// Everything the import pipeline hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Usage snapshot, possibly a placeholder.
    pub usage: UsageSnapshot,
    /// Canonical token record.
    pub kiro_token: CanonicalTokenRecord,
    /// True when the `BuilderId` flow was used.
    pub is_builder_id_type: bool,
    /// Client-secret artifact, `BuilderId` only.
    pub client_id_hash_file: Option<ClientSecretArtifact>,
}
