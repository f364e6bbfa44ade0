//! Canonical token record assembly.

use chrono::{DateTime, Duration, Utc};
use kirotoken_core::{
    AuthFlow, CanonicalTokenRecord, ImportError, ParsedCredential, TokenExchangeResult,
    DEFAULT_PROVIDER,
};

/// Lifetime assumed when the exchange reported none.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Merges the parsed credential and an exchange result into a
/// [`CanonicalTokenRecord`].
#[derive(Debug, Clone, Copy)]
pub struct TokenRecordAssembler {
    clock: fn() -> DateTime<Utc>,
}

impl Default for TokenRecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenRecordAssembler {
    /// Creates an assembler on the system clock.
    pub fn new() -> Self {
        Self { clock: Utc::now }
    }

    /// Creates an assembler on a custom clock.
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self { clock }
    }

    /// Builds the record.
    ///
    /// `expiresAt` is the exchange's own value, else now + `expiresIn`, else
    /// one hour from now. Client credentials prefer the parsed input over
    /// the exchange echo.
    ///
    /// # Errors
    ///
    /// [`ImportError::ExchangeFailure`] when the exchange produced no usable
    /// access token.
    pub fn assemble(
        &self,
        creds: &ParsedCredential,
        flow: AuthFlow,
        exchange: &TokenExchangeResult,
    ) -> Result<CanonicalTokenRecord, ImportError> {
        let access_token = exchange
            .usable_access_token()
            .ok_or(ImportError::ExchangeFailure)?;

        Ok(CanonicalTokenRecord {
            access_token: access_token.to_string(),
            refresh_token: creds.refresh_token.clone(),
            auth_method: flow,
            provider: creds
                .provider
                .clone()
                .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
            expires_at: self.resolve_expiry(exchange),
            client_id: pick(creds.client_id.as_ref(), exchange.client_id.as_ref()),
            client_secret: pick(creds.client_secret.as_ref(), exchange.client_secret.as_ref()),
            profile_arn: pick(creds.profile_arn.as_ref(), None),
        })
    }

    fn resolve_expiry(&self, exchange: &TokenExchangeResult) -> DateTime<Utc> {
        if let Some(expires_at) = exchange.expires_at {
            return expires_at;
        }
        let secs = exchange
            .expires_in
            .filter(|secs| *secs != 0)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        (self.clock)() + Duration::seconds(secs)
    }
}

/// First non-empty value.
pub(crate) fn pick(primary: Option<&String>, fallback: Option<&String>) -> Option<String> {
    primary
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.filter(|s| !s.is_empty()))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn assembler() -> TokenRecordAssembler {
        TokenRecordAssembler::with_clock(fixed_now)
    }

    fn creds() -> ParsedCredential {
        ParsedCredential::from_refresh_token("aorRT")
    }

    #[test]
    fn test_defaults() {
        let record = assembler()
            .assemble(&creds(), AuthFlow::Social, &TokenExchangeResult::with_access_token("AT"))
            .unwrap();

        assert_eq!(record.access_token, "AT");
        assert_eq!(record.refresh_token, "aorRT");
        assert_eq!(record.auth_method, AuthFlow::Social);
        assert_eq!(record.provider, "Google");
        assert_eq!(record.expires_at, fixed_now() + Duration::hours(1));
        assert_eq!(record.client_id, None);
        assert_eq!(record.client_secret, None);
        assert_eq!(record.profile_arn, None);
    }

    #[test]
    fn test_expiry_precedence() {
        let explicit = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let mut exchange = TokenExchangeResult::with_access_token("AT");
        exchange.expires_at = Some(explicit);
        exchange.expires_in = Some(60);
        let record = assembler().assemble(&creds(), AuthFlow::Social, &exchange).unwrap();
        assert_eq!(record.expires_at, explicit);

        exchange.expires_at = None;
        let record = assembler().assemble(&creds(), AuthFlow::Social, &exchange).unwrap();
        assert_eq!(record.expires_at, fixed_now() + Duration::seconds(60));
    }

    #[test]
    fn test_parsed_fields_win_over_exchange_echo() {
        let mut creds = creds();
        creds.client_id = Some("parsed-id".to_string());
        creds.profile_arn = Some("arn:x".to_string());
        creds.provider = Some("Github".to_string());

        let mut exchange = TokenExchangeResult::with_access_token("AT");
        exchange.client_id = Some("echo-id".to_string());
        exchange.client_secret = Some("echo-secret".to_string());

        let record = assembler()
            .assemble(&creds, AuthFlow::BuilderId, &exchange)
            .unwrap();
        assert_eq!(record.client_id.as_deref(), Some("parsed-id"));
        assert_eq!(record.client_secret.as_deref(), Some("echo-secret"));
        assert_eq!(record.profile_arn.as_deref(), Some("arn:x"));
        assert_eq!(record.provider, "Github");
    }

    #[test]
    fn test_missing_access_token_is_exchange_failure() {
        let err = assembler()
            .assemble(&creds(), AuthFlow::BuilderId, &TokenExchangeResult::default())
            .unwrap_err();
        assert!(matches!(err, ImportError::ExchangeFailure));

        let err = assembler()
            .assemble(&creds(), AuthFlow::Social, &TokenExchangeResult::with_access_token(""))
            .unwrap_err();
        assert!(matches!(err, ImportError::ExchangeFailure));
    }

    #[test]
    fn test_pick() {
        let a = "a".to_string();
        let empty = String::new();
        assert_eq!(pick(Some(&a), None), Some("a".to_string()));
        assert_eq!(pick(Some(&empty), Some(&a)), Some("a".to_string()));
        assert_eq!(pick(None, Some(&empty)), None);
    }
}
