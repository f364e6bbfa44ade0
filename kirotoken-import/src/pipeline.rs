//! End-to-end import pipeline.
//!
//! ```text
//! raw text ─▶ InputParser ─▶ select_flow ─┬─▶ BuilderIdTokenExchanger ─┐
//!                                         └─▶ SocialTokenExchanger ────┤
//!                                                                      ▼
//!              ImportResult ◀── UsageFetcher ◀── TokenRecordAssembler
//!                                                + ClientSecretArtifactBuilder
//! ```
//!
//! Steps run strictly in order and each upstream call is made at most once.
//! The pipeline holds no mutable state, so one instance can serve many
//! concurrent imports.

use kirotoken_core::{AuthFlow, ImportError, ImportResult, UsageSnapshot};
use kirotoken_fetch::FetchContext;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::artifact::ClientSecretArtifactBuilder;
use crate::flow::select_flow;
use crate::input::InputParser;
use crate::kiro::{
    BuilderIdTokenExchanger, KiroHttpApi, OidcTokenApi, SocialAuthApi, SocialTokenExchanger,
    UsageFetcher, UsageLimitsApi,
};
use crate::record::TokenRecordAssembler;

/// Turns pasted credential text into an [`ImportResult`].
pub struct ImportPipeline {
    parser: InputParser,
    builder_id: BuilderIdTokenExchanger,
    social: SocialTokenExchanger,
    usage: UsageFetcher,
    assembler: TokenRecordAssembler,
    default_region: Option<String>,
}

impl ImportPipeline {
    /// Creates a pipeline over the given upstream endpoints.
    pub fn new(
        oidc: Arc<dyn OidcTokenApi>,
        social: Arc<dyn SocialAuthApi>,
        usage: Arc<dyn UsageLimitsApi>,
    ) -> Self {
        Self {
            parser: InputParser::new(),
            builder_id: BuilderIdTokenExchanger::new(oidc),
            social: SocialTokenExchanger::new(social),
            usage: UsageFetcher::new(usage),
            assembler: TokenRecordAssembler::new(),
            default_region: None,
        }
    }

    /// Creates a pipeline talking to the live endpoints of `ctx`.
    pub fn from_context(ctx: FetchContext) -> Self {
        let api = Arc::new(KiroHttpApi::new(ctx));
        Self::new(api.clone(), api.clone(), api)
    }

    /// Replaces the input parser.
    #[must_use]
    pub fn with_parser(mut self, parser: InputParser) -> Self {
        self.parser = parser;
        self
    }

    /// Replaces the record assembler.
    #[must_use]
    pub fn with_assembler(mut self, assembler: TokenRecordAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Region used when the input names none.
    #[must_use]
    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = Some(region.into()).filter(|r: &String| !r.is_empty());
        self
    }

    /// Runs the import.
    ///
    /// # Errors
    ///
    /// Input, flow and exchange failures are returned as [`ImportError`].
    /// Usage failures are not: they degrade to a placeholder snapshot.
    #[instrument(skip_all)]
    pub async fn run(&self, raw: &str) -> Result<ImportResult, ImportError> {
        let outcome = self.parser.parse(raw)?;
        let mut creds = outcome.credential;
        if creds.region.is_none() {
            creds.region.clone_from(&self.default_region);
        }

        let selection = select_flow(&creds)?;
        info!(
            strategy = outcome.strategy_id,
            flow = %selection.flow,
            region = %selection.region,
            "Importing credential"
        );

        let exchange = match selection.flow {
            AuthFlow::BuilderId => self.builder_id.exchange(&creds, &selection.region).await?,
            AuthFlow::Social => self.social.exchange(&creds).await,
        };

        let kiro_token = self.assembler.assemble(&creds, selection.flow, &exchange)?;
        let client_id_hash_file = ClientSecretArtifactBuilder::build(
            selection.flow,
            &creds,
            &exchange,
            &selection.region,
        );

        let usage = match self
            .usage
            .fetch_usage(&kiro_token.access_token, &selection.region)
            .await
        {
            Some(mut usage) => {
                if usage.email.is_none() {
                    debug!("Usage carried no email, using the pasted one");
                    usage.email.clone_from(&creds.email);
                }
                usage
            }
            None => {
                warn!("Usage unavailable, returning placeholder");
                UsageSnapshot::placeholder(creds.email.clone())
            }
        };

        info!(
            has_artifact = client_id_hash_file.is_some(),
            usage_placeholder = usage.is_placeholder(),
            "Import complete"
        );

        Ok(ImportResult {
            usage,
            kiro_token,
            is_builder_id_type: selection.flow.is_builder_id(),
            client_id_hash_file,
        })
    }
}
