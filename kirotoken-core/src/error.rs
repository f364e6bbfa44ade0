//! Core error types for `KiroToken`.

use thiserror::Error;

/// Error type for the credential import pipeline.
///
/// Every variant is terminal: the pipeline aborts and nothing is retried.
/// Usage lookup failures are absent on purpose, they degrade into a
/// placeholder snapshot instead of an error.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The pasted text was empty after trimming.
    #[error("Empty input")]
    EmptyInput,

    /// No input grammar matched the pasted text.
    #[error("No refreshToken recognized, check the pasted content format")]
    InputFormat,

    /// `BuilderId` flow selected but the client id or secret is missing.
    #[error("BuilderId account is missing clientId / clientSecret")]
    MissingCredential,

    /// No access credential could be obtained.
    #[error("Failed to obtain accessToken (refreshToken may be invalid or expired)")]
    ExchangeFailure,

    /// The `BuilderId` token endpoint answered with a non-success status.
    #[error("BuilderId refresh failed: HTTP {status} {message}")]
    UpstreamExchange {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Best available message from the response body.
        message: String,
    },

    /// Transport failure while talking to the `BuilderId` token endpoint.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl ImportError {
    /// Returns true if the error stems from what the user pasted.
    ///
    /// Upstream exchange failures are reported as server-class errors even
    /// though they usually mean an expired refresh token.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ImportError::EmptyInput
                | ImportError::InputFormat
                | ImportError::MissingCredential
                | ImportError::ExchangeFailure
        )
    }
}
