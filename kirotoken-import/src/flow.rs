//! Authentication flow selection.

use kirotoken_core::{AuthFlow, FlowSelection, ImportError, ParsedCredential};
use tracing::debug;

/// Chooses between the `BuilderId` and Social flows.
///
/// `BuilderId` wins when the provider field says so (any case) or when both
/// client credentials are present. Everything else is Social.
pub fn classify(creds: &ParsedCredential) -> AuthFlow {
    if creds.names_builder_id() || creds.has_client_credentials() {
        AuthFlow::BuilderId
    } else {
        AuthFlow::Social
    }
}

/// Classifies the credential and resolves the region.
///
/// A credential that names `BuilderId` without both client credentials is
/// rejected here, before any network call.
pub fn select_flow(creds: &ParsedCredential) -> Result<FlowSelection, ImportError> {
    let flow = classify(creds);
    if flow.is_builder_id() && !creds.has_client_credentials() {
        return Err(ImportError::MissingCredential);
    }

    let region = creds.region_or_default().to_ascii_lowercase();
    debug!(flow = %flow, region = %region, "Flow selected");
    Ok(FlowSelection { flow, region })
}
