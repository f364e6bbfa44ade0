//! Pasted credential text parsing.
//!
//! Users paste credentials in whatever shape their export tool produced.
//! The parser tries a fixed list of strategies in order and stops at the
//! first one that yields a refresh token:
//!
//! 1. **Bare token**: `aor<base64url>:<base64>`
//! 2. **JSON**: a single object with `refreshToken`
//! 3. **Labeled blocks**: `账号：{...}` followed somewhere by `登录token：{...}`
//! 4. **Pipe pair**: `{...}|{...}`
//!
//! A strategy that does not match returns `None`; it never errors.

use kirotoken_core::{ImportError, ParsedCredential};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, instrument};

// ============================================================================
// Patterns
// ============================================================================

static BARE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^aor[A-Za-z0-9_+-]{50,}:[A-Za-z0-9+/=]{50,}$").expect("valid regex")
});

static ACCOUNT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"账号：\s*(\{[^}]+\})").expect("valid regex"));

static TOKEN_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"登录token：\s*(\{[^}]+\})").expect("valid regex"));

// ============================================================================
// Strategy Trait
// ============================================================================

/// One way of reading credentials out of pasted text.
pub trait ParseStrategy: Send + Sync {
    /// Stable identifier, used in logs.
    fn id(&self) -> &'static str;

    /// Attempts to parse the (already trimmed) input.
    fn parse(&self, input: &str) -> Option<ParsedCredential>;
}

/// `aor...:...` refresh token on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct BareTokenStrategy;

impl ParseStrategy for BareTokenStrategy {
    fn id(&self) -> &'static str {
        "bare_token"
    }

    fn parse(&self, input: &str) -> Option<ParsedCredential> {
        BARE_TOKEN_RE
            .is_match(input)
            .then(|| ParsedCredential::from_refresh_token(input))
    }
}

/// The whole input is one JSON object.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStrategy;

impl ParseStrategy for JsonStrategy {
    fn id(&self) -> &'static str {
        "json"
    }

    fn parse(&self, input: &str) -> Option<ParsedCredential> {
        ParsedCredential::from_json_object(&parse_object(input)?)
    }
}

/// Account block and login-token block embedded in free text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabeledBlocksStrategy;

impl ParseStrategy for LabeledBlocksStrategy {
    fn id(&self) -> &'static str {
        "labeled_blocks"
    }

    fn parse(&self, input: &str) -> Option<ParsedCredential> {
        let account = ACCOUNT_BLOCK_RE.captures(input)?.get(1)?.as_str();
        let token = TOKEN_BLOCK_RE.captures(input)?.get(1)?.as_str();

        let merged = merge(parse_object(account)?, parse_object(token)?);
        ParsedCredential::from_json_object(&merged)
    }
}

/// Two JSON objects joined by `|`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipePairStrategy;

impl ParseStrategy for PipePairStrategy {
    fn id(&self) -> &'static str {
        "pipe_pair"
    }

    fn parse(&self, input: &str) -> Option<ParsedCredential> {
        // Anything after a second `|` is ignored.
        let mut parts = input.split('|');
        let (left, right) = (parts.next()?, parts.next()?);

        let merged = merge(parse_object(left.trim())?, parse_object(right.trim())?);
        ParsedCredential::from_json_object(&merged)
    }
}

/// Decodes `text` as a JSON object.
fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Shallow merge, `second` wins on conflicting keys.
fn merge(mut first: Map<String, Value>, second: Map<String, Value>) -> Map<String, Value> {
    first.extend(second);
    first
}

// ============================================================================
// Input Parser
// ============================================================================

/// A successful parse and the strategy that produced it.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The recognized credential.
    pub credential: ParsedCredential,
    /// Which strategy matched.
    pub strategy_id: &'static str,
}

/// Ordered list of parse strategies.
pub struct InputParser {
    strategies: Vec<Box<dyn ParseStrategy>>,
}

impl InputParser {
    /// Creates a parser with the four built-in strategies.
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(BareTokenStrategy),
            Box::new(JsonStrategy),
            Box::new(LabeledBlocksStrategy),
            Box::new(PipePairStrategy),
        ])
    }

    /// Creates a parser that tries `strategies` in the given order.
    pub fn with_strategies(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self { strategies }
    }

    /// Returns the strategy ids in the order they are tried.
    pub fn strategy_ids(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    /// Parses pasted text.
    ///
    /// The input is trimmed first. Empty input and input no strategy
    /// recognizes are both user errors.
    #[instrument(skip_all, fields(len = raw.len()))]
    pub fn parse(&self, raw: &str) -> Result<ParseOutcome, ImportError> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        for strategy in &self.strategies {
            if let Some(credential) = strategy.parse(input) {
                debug!(strategy = strategy.id(), "Input recognized");
                return Ok(ParseOutcome {
                    credential,
                    strategy_id: strategy.id(),
                });
            }
            debug!(strategy = strategy.id(), "Strategy did not match");
        }

        Err(ImportError::InputFormat)
    }
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses pasted text with the built-in strategies.
pub fn parse_input(raw: &str) -> Result<ParsedCredential, ImportError> {
    InputParser::new().parse(raw).map(|outcome| outcome.credential)
}

// ============================================================================
// Tests
// ============================================================================
