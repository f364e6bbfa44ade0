// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `KiroToken` Core
//!
//! Core types and errors for the `KiroToken` import pipeline.
//!
//! This crate provides the foundational types used across all other
//! `KiroToken` crates:
//!
//! - Credential models (what was pasted, which flow it needs)
//! - Token models (exchange results, the canonical token record,
//!   the client-secret artifact)
//! - Usage models (normalized quota snapshot, placeholder amounts)
//! - The [`ImportError`] taxonomy
//!
//! ## Key Types
//!
//! ### Credential Types
//! - [`ParsedCredential`] - Normalized view of the pasted credential text
//! - [`AuthFlow`] - `BuilderId` or Social authentication variant
//!
//! ### Token Types
//! - [`TokenExchangeResult`] - What a token exchange produced
//! - [`CanonicalTokenRecord`] - Portable `kiro-auth-token.json` record
//! - [`ClientSecretArtifact`] - Content-addressed client id/secret file
//!
//! ### Usage Types
//! - [`UsageSnapshot`] - Plan + trial quota summary
//! - [`UsageAmount`] - Numeric amount or the `"-"` placeholder
//!
//! ### Result
//! - [`ImportResult`] - Everything returned to the caller

pub mod error;
pub mod models;

// Re-export error types
pub use error::ImportError;

// Re-export all model types
pub use models::{
    // Credential types
    AuthFlow,
    FlowSelection,
    ParsedCredential,
    DEFAULT_REGION,
    REFRESH_TOKEN_PREFIX,
    // Token types
    CanonicalTokenRecord,
    ClientSecretArtifact,
    ClientSecretContent,
    TokenExchangeResult,
    DEFAULT_PROVIDER,
    // Usage types
    UsageAmount,
    UsageSnapshot,
    PLACEHOLDER_MARKER,
    PLACEHOLDER_NOTE,
    // Result
    ImportResult,
};
