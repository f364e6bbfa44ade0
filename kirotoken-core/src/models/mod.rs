//! Domain models for `KiroToken`.
//!
//! ## Submodules
//!
//! - [`credential`] - Parsed input and flow selection types
//! - [`token`] - Exchange results, canonical token record, client-secret artifact
//! - [`usage`] - Normalized usage snapshot
//! - [`result`] - The combined result handed back to the caller

mod credential;
mod result;
mod token;
mod usage;

// Re-export everything at the models level
pub use credential::{AuthFlow, FlowSelection, ParsedCredential, DEFAULT_REGION, REFRESH_TOKEN_PREFIX};
pub use result::ImportResult;
pub use token::{
    CanonicalTokenRecord, ClientSecretArtifact, ClientSecretContent, TokenExchangeResult,
    DEFAULT_PROVIDER,
};
pub use usage::{UsageAmount, UsageSnapshot, PLACEHOLDER_MARKER, PLACEHOLDER_NOTE};
#[cfg(test)]
mod serde_tests;
