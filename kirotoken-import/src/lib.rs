// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `KiroToken` Import
//!
//! Turns pasted Kiro credentials into a portable token record plus a usage
//! snapshot.
//!
//! ## Stages
//!
//! | Stage | Type | Failure mode |
//! |-------|------|--------------|
//! | Parse pasted text | [`InputParser`] | `EmptyInput` / `InputFormat` |
//! | Pick auth flow | [`select_flow`] | `MissingCredential` |
//! | `BuilderId` refresh | [`BuilderIdTokenExchanger`] | `UpstreamExchange` / `Http` |
//! | Social refresh | [`SocialTokenExchanger`] | never, falls back |
//! | Token record | [`TokenRecordAssembler`] | `ExchangeFailure` |
//! | Client secret file | [`ClientSecretArtifactBuilder`] | never |
//! | Usage | [`UsageFetcher`] + [`normalize_usage`] | never, placeholder |
//!
//! [`ImportPipeline`] runs them in order.
//!
//! ## Usage
//!
//! ```ignore
//! use kirotoken_fetch::FetchContext;
//! use kirotoken_import::ImportPipeline;
//!
//! let pipeline = ImportPipeline::from_context(FetchContext::new()?);
//! let result = pipeline.run(pasted_text).await?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod artifact;
pub mod flow;
pub mod input;
pub mod kiro;
pub mod pipeline;
pub mod record;

pub use artifact::{client_id_hash, ClientSecretArtifactBuilder};
pub use flow::{classify, select_flow};
pub use input::{
    parse_input, BareTokenStrategy, InputParser, JsonStrategy, LabeledBlocksStrategy,
    ParseOutcome, ParseStrategy, PipePairStrategy,
};
pub use kiro::{
    normalize_usage, BuilderIdTokenExchanger, KiroHttpApi, OidcTokenApi, RawResponse,
    RefreshGrant, SocialAuthApi, SocialRefreshRequest, SocialTokenExchanger, UsageFetcher,
    UsageLimitsApi,
};
pub use pipeline::ImportPipeline;
pub use record::{TokenRecordAssembler, DEFAULT_TOKEN_LIFETIME_SECS};
