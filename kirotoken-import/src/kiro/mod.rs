//! Kiro and AWS upstream integration.
//!
//! - `BuilderId` accounts refresh through the regional AWS OIDC endpoint.
//! - Social accounts refresh through the Kiro desktop auth service.
//! - Usage comes from the regional `getUsageLimits` endpoint.

mod api;
mod builder_id;
mod fetcher;
mod json;
pub(crate) mod parser;
mod social;

pub use api::{
    KiroHttpApi, OidcTokenApi, RawResponse, RefreshGrant, SocialAuthApi, SocialRefreshRequest,
    UsageLimitsApi, REFRESH_GRANT_TYPE,
};
pub use builder_id::BuilderIdTokenExchanger;
pub use fetcher::UsageFetcher;
pub use parser::normalize_usage;
pub use social::SocialTokenExchanger;
