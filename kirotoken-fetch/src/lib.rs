// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # KiroToken Fetch
//!
//! HTTP plumbing for the `KiroToken` import pipeline.
//!
//! This crate provides the infrastructure the endpoint adapters are built on:
//!
//! - [`http::HttpClient`] - HTTP client with tracing and domain allowlist
//! - [`context::FetchSettings`] - Timeout, user agents, endpoint templates
//! - [`context::Endpoints`] - The three upstream URLs, region-aware
//! - [`context::FetchContext`] - Shared client plus settings
//!
//! ## Example
//!
//! ```ignore
//! use kirotoken_fetch::{Endpoints, FetchContext};
//!
//! let ctx = FetchContext::builder()
//!     .endpoints(Endpoints::default())
//!     .build()?;
//!
//! let url = ctx.endpoints().usage_limits_url("us-east-1")?;
//! let response = ctx.http.get_with_bearer(&url, token, HeaderMap::new()).await?;
//! ```

pub mod context;
pub mod error;
pub mod http;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, HttpError};

// HTTP
pub use http::{HttpClient, DEFAULT_TIMEOUT_SECS, USER_AGENT};

// Context
pub use context::{Endpoints, FetchContext, FetchContextBuilder, FetchSettings};
