//! End-to-end imports against mock upstream servers.

use kirotoken_core::{AuthFlow, ImportError, UsageAmount};
use kirotoken_fetch::{Endpoints, FetchContext};
use kirotoken_import::{client_id_hash, ImportPipeline};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BARE_TOKEN: &str = "aorAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA:BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB==";

fn pipeline(server: &MockServer) -> ImportPipeline {
    let ctx = FetchContext::builder()
        .endpoints(Endpoints::with_base(&server.uri()))
        .build()
        .unwrap();
    ImportPipeline::from_context(ctx)
}

#[tokio::test]
async fn builder_id_import_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("client_id=cid"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "AT1", "expires_in": 3600})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/getUsageLimits"))
        .and(header("authorization", "Bearer AT1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usageBreakdownList": [{
                "usageLimit": 10,
                "currentUsage": 3,
                "freeTrialInfo": {"freeTrialStatus": "ACTIVE", "usageLimit": 5, "currentUsage": 1}
            }],
            "userInfo": {"email": "dev@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = pipeline(&server)
        .run(r#"{"refreshToken":"aorXXX","clientId":"cid","clientSecret":"secret"}"#)
        .await
        .unwrap();

    assert!(result.is_builder_id_type);
    assert_eq!(result.kiro_token.auth_method, AuthFlow::BuilderId);
    assert_eq!(result.kiro_token.access_token, "AT1");
    assert_eq!(result.kiro_token.client_id.as_deref(), Some("cid"));

    let artifact = result.client_id_hash_file.as_ref().unwrap();
    assert_eq!(artifact.filename, format!("{}.json", client_id_hash("cid")));
    assert_eq!(artifact.content.region, "us-east-1");

    assert_eq!(result.usage.limit, UsageAmount::Value(15.0));
    assert_eq!(result.usage.used, UsageAmount::Value(4.0));
    assert_eq!(result.usage.remaining, UsageAmount::Value(11.0));
    assert_eq!(result.usage.email.as_deref(), Some("dev@example.com"));

    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(wire["kiroToken"]["authMethod"], "builderid");
    assert_eq!(wire["isBuilderIdType"], true);
    assert_eq!(wire["usage"]["remaining"], 11);
    assert!(wire["kiroToken"].get("profileArn").is_none());
}

#[tokio::test]
async fn social_import_falls_back_when_refresh_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refreshToken"))
        .and(body_json(json!({"refreshToken": BARE_TOKEN})))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/getUsageLimits"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let result = pipeline(&server).run(&format!("  {BARE_TOKEN}\n")).await.unwrap();

    assert!(!result.is_builder_id_type);
    assert_eq!(result.kiro_token.access_token, BARE_TOKEN);
    assert_eq!(result.kiro_token.provider, "Google");
    assert!(result.client_id_hash_file.is_none());
    assert!(result.usage.is_placeholder());

    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(wire["usage"]["limit"], "-");
    assert_eq!(wire["usage"]["email"], serde_json::Value::Null);
    assert_eq!(wire["clientIdHashFile"], serde_json::Value::Null);
}

#[tokio::test]
async fn labeled_blocks_import_uses_social_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refreshToken"))
        .and(body_json(json!({"refreshToken": "aorRT", "profileArn": "arn:p"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "FRESH",
            "expiresAt": "2030-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/getUsageLimits"))
        .and(header("authorization", "Bearer FRESH"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"usageBreakdownList": [{"usageLimit": 50}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let pasted = "账号：{\"email\":\"me@example.com\",\"provider\":\"Github\"}\n\
                  登录token：{\"refreshToken\":\"aorRT\",\"profileArn\":\"arn:p\"}";
    let result = pipeline(&server).run(pasted).await.unwrap();

    assert_eq!(result.kiro_token.access_token, "FRESH");
    assert_eq!(result.kiro_token.provider, "Github");
    assert_eq!(result.kiro_token.profile_arn.as_deref(), Some("arn:p"));
    assert_eq!(
        serde_json::to_value(&result.kiro_token).unwrap()["expiresAt"],
        "2030-01-01T00:00:00.000Z"
    );
    assert_eq!(result.usage.remaining, UsageAmount::Value(50.0));
    assert_eq!(result.usage.email.as_deref(), Some("me@example.com"));
}

#[tokio::test]
async fn builder_id_rejection_surfaces_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid refresh token provided"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = pipeline(&server)
        .run(r#"{"refreshToken":"aorRT"}|{"clientId":"cid","clientSecret":"secret","region":"eu-west-1"}"#)
        .await
        .unwrap_err();

    assert!(!err.is_user_error());
    assert_eq!(
        err.to_string(),
        "BuilderId refresh failed: HTTP 400 Invalid refresh token provided"
    );
    assert!(matches!(err, ImportError::UpstreamExchange { status: 400, .. }));
}
