//! Content-addressed client secret file for `BuilderId` accounts.

use kirotoken_core::{
    AuthFlow, ClientSecretArtifact, ClientSecretContent, ParsedCredential, TokenExchangeResult,
};
use sha1::{Digest, Sha1};

use crate::record::pick;

/// Builds the `<sha1(clientId)>.json` artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientSecretArtifactBuilder;

impl ClientSecretArtifactBuilder {
    /// Returns the artifact for a `BuilderId` flow with a known client id.
    pub fn build(
        flow: AuthFlow,
        creds: &ParsedCredential,
        exchange: &TokenExchangeResult,
        region: &str,
    ) -> Option<ClientSecretArtifact> {
        if !flow.is_builder_id() {
            return None;
        }
        let client_id = pick(creds.client_id.as_ref(), exchange.client_id.as_ref())?;
        let client_secret = pick(creds.client_secret.as_ref(), exchange.client_secret.as_ref());

        Some(ClientSecretArtifact {
            filename: format!("{}.json", client_id_hash(&client_id)),
            content: ClientSecretContent {
                client_id,
                client_secret,
                region: region.to_string(),
            },
        })
    }
}

/// Lowercase hex SHA-1 of the client id.
pub fn client_id_hash(client_id: &str) -> String {
    hex::encode(Sha1::digest(client_id.as_bytes()))
}
