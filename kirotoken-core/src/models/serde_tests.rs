//! Serde tests for core types.
//!
//! These tests pin down the JSON shape the caller sees: camelCase names,
//! omitted optional fields, nulls where the wire format expects them.

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::{
    AuthFlow, CanonicalTokenRecord, ClientSecretArtifact, ClientSecretContent, ImportResult,
    UsageAmount, UsageSnapshot,
};

fn record() -> CanonicalTokenRecord {
    CanonicalTokenRecord {
        access_token: "AT1".to_string(),
        refresh_token: "aorRT".to_string(),
        auth_method: AuthFlow::BuilderId,
        provider: "BuilderId".to_string(),
        expires_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        client_id: Some("cid".to_string()),
        client_secret: Some("secret".to_string()),
        profile_arn: None,
    }
}

// ============================================================================
// CanonicalTokenRecord
// ============================================================================

#[test]
fn test_token_record_camel_case_keys() {
    let value = serde_json::to_value(record()).unwrap();

    assert_eq!(value["accessToken"], "AT1");
    assert_eq!(value["refreshToken"], "aorRT");
    assert_eq!(value["authMethod"], "builderid");
    assert_eq!(value["provider"], "BuilderId");
    assert_eq!(value["expiresAt"], "2025-06-01T12:00:00.000Z");
    assert_eq!(value["clientId"], "cid");
    assert_eq!(value["clientSecret"], "secret");
}

#[test]
fn test_token_record_omits_absent_optionals() {
    let mut record = record();
    record.auth_method = AuthFlow::Social;
    record.client_id = None;
    record.client_secret = None;

    let value = serde_json::to_value(&record).unwrap();
    let object = value.as_object().unwrap();

    assert!(!object.contains_key("clientId"));
    assert!(!object.contains_key("clientSecret"));
    assert!(!object.contains_key("profileArn"));
    assert_eq!(object.len(), 5);
}

#[test]
fn test_token_record_deserializes_own_output() {
    let json = serde_json::to_string(&record()).unwrap();
    let parsed: CanonicalTokenRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record());
}

// ============================================================================
// UsageSnapshot
// ============================================================================

#[test]
fn test_usage_snapshot_numbers() {
    let snapshot = UsageSnapshot::from_totals(15.0, 4.0, Some("dev@example.com".to_string()));
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(
        value,
        json!({"limit": 15, "used": 4, "remaining": 11, "email": "dev@example.com"})
    );
}

#[test]
fn test_usage_snapshot_fractional_amounts() {
    let snapshot = UsageSnapshot::from_totals(50.0, 12.25, None);
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["used"], 12.25);
    assert_eq!(value["remaining"], 37.75);
    assert_eq!(value["email"], Value::Null);
    assert!(value.get("note").is_none());
}

#[test]
fn test_usage_snapshot_placeholder_shape() {
    let snapshot = UsageSnapshot::placeholder(None);
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["limit"], "-");
    assert_eq!(value["used"], "-");
    assert_eq!(value["remaining"], "-");
    assert_eq!(value["email"], Value::Null);
    assert!(value["note"].is_string());
}

#[test]
fn test_usage_amount_deserialize() {
    let amount: UsageAmount = serde_json::from_str("3.5").unwrap();
    assert_eq!(amount, UsageAmount::Value(3.5));

    let amount: UsageAmount = serde_json::from_str(r#""-""#).unwrap();
    assert_eq!(amount, UsageAmount::Unavailable);

    assert!(serde_json::from_str::<UsageAmount>(r#""n/a""#).is_err());
}

// ============================================================================
// ImportResult
// ============================================================================

#[test]
fn test_import_result_shape() {
    let result = ImportResult {
        usage: UsageSnapshot::from_totals(10.0, 3.0, None),
        kiro_token: record(),
        is_builder_id_type: true,
        client_id_hash_file: Some(ClientSecretArtifact {
            filename: "abc.json".to_string(),
            content: ClientSecretContent {
                client_id: "cid".to_string(),
                client_secret: Some("secret".to_string()),
                region: "us-east-1".to_string(),
            },
        }),
    };

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["isBuilderIdType"], true);
    assert_eq!(value["kiroToken"]["accessToken"], "AT1");
    assert_eq!(value["clientIdHashFile"]["filename"], "abc.json");
    assert_eq!(
        value["clientIdHashFile"]["content"],
        json!({"clientId": "cid", "clientSecret": "secret", "region": "us-east-1"})
    );
}

#[test]
fn test_import_result_null_artifact() {
    let mut record = record();
    record.auth_method = AuthFlow::Social;
    let result = ImportResult {
        usage: UsageSnapshot::placeholder(None),
        kiro_token: record,
        is_builder_id_type: false,
        client_id_hash_file: None,
    };

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["clientIdHashFile"], Value::Null);
    assert_eq!(value["isBuilderIdType"], false);
}
