//! Publish step integration tests against a mock add-on API.
//!
//! Run with: `cargo test -p amo-release --test publish_test`

mod helpers;

use amo_core::ErrorMetadata;
use amo_release::{AmoPlugin, ReleasePlugin, RELEASE_NAME};
use helpers::{context, env, AddonFixture, RecordingLogger, INVALID_UPLOAD, VALID_UPLOAD};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

async fn prepared(fixture: &AddonFixture, base_url: &str) {
    let context = context(base_url, None, Arc::default());
    AmoPlugin
        .prepare(&fixture.config(json!({})), &context)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_full_release() {
    let mut server = Server::new_async().await;
    let fixture = AddonFixture::new();
    let config = fixture.config(json!({
        "channel": "unlisted",
        "approvalNotes": "npm ci && npm run build",
        "submitReleaseNotes": true
    }));

    AmoPlugin
        .verify_conditions(&config, &env(&server.url()))
        .await
        .unwrap();
    prepared(&fixture, &server.url()).await;

    let upload = server
        .mock("POST", "/api/v5/addons/upload/")
        .match_header("authorization", Matcher::Regex(r"^JWT ".to_string()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"filename="1.2.3.zip""#.to_string()),
            Matcher::Regex("unlisted".to_string()),
        ]))
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(r#"{"uuid":"u1","processed":false,"valid":false,"validation":null}"#)
        .expect(1)
        .create_async()
        .await;
    let poll = server
        .mock("GET", "/api/v5/addons/upload/u1/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(VALID_UPLOAD)
        .expect(1)
        .create_async()
        .await;
    let version = server
        .mock("POST", "/api/v5/addons/addon/my-addon/versions/")
        .match_body(Matcher::Json(json!({
            "upload": "u1",
            "approval_notes": "npm ci && npm run build",
            "compatibility": ["firefox"],
            "release_notes": { "en-US": "<b>Bug Fixes</b>\n<ul>\n<li>crash on start</li>\n</ul>" }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":42,"version":"1.2.3"}"#)
        .expect(1)
        .create_async()
        .await;
    let source = server
        .mock("PATCH", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let logger = Arc::new(RecordingLogger::default());
    let context = context(
        &server.url(),
        Some("## Bug Fixes\n\n* crash on start\n"),
        logger.clone(),
    );
    let release = AmoPlugin.publish(&config, &context).await.unwrap();

    assert_eq!(release.name, RELEASE_NAME);
    assert_eq!(
        release.url,
        format!("{}/en-US/firefox/addon/my-addon/", server.url())
    );
    assert_eq!(
        logger.messages(),
        vec![
            "Uploading the add-on...",
            "Waiting for validation...",
            "Creating a version...",
        ]
    );
    assert!(logger.warnings().is_empty());

    upload.assert_async().await;
    poll.assert_async().await;
    version.assert_async().await;
    source.assert_async().await;
}

#[tokio::test]
async fn test_source_attached_to_created_version() {
    let mut server = Server::new_async().await;
    let fixture = AddonFixture::new();
    prepared(&fixture, &server.url()).await;
    std::fs::write(fixture.root().join("out/1.2.3-src.zip"), "PK source").unwrap();

    server
        .mock("POST", "/api/v5/addons/upload/")
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(VALID_UPLOAD)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v5/addons/upload/u1/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(VALID_UPLOAD)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v5/addons/addon/my-addon/versions/")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":42}"#)
        .create_async()
        .await;
    let source = server
        .mock("PATCH", "/api/v5/addons/addon/my-addon/versions/42/")
        .match_body(Matcher::Regex(
            r#"name="source"; filename="1.2.3-src.zip""#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":42}"#)
        .expect(1)
        .create_async()
        .await;

    let logger = Arc::new(RecordingLogger::default());
    let context = context(&server.url(), None, logger.clone());
    AmoPlugin
        .publish(
            &fixture.config(json!({ "submitSource": true, "submitReleaseNotes": true })),
            &context,
        )
        .await
        .unwrap();

    source.assert_async().await;
    assert_eq!(
        logger.messages().last().map(String::as_str),
        Some("Uploading the source code...")
    );
    assert_eq!(
        logger.warnings(),
        vec!["Release notes are empty. Skipping submission of release notes."]
    );
}

#[tokio::test]
async fn test_validation_failure_creates_no_version() {
    let mut server = Server::new_async().await;
    let fixture = AddonFixture::new();
    prepared(&fixture, &server.url()).await;

    server
        .mock("POST", "/api/v5/addons/upload/")
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(INVALID_UPLOAD)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v5/addons/upload/u1/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(INVALID_UPLOAD)
        .create_async()
        .await;
    let version = server
        .mock("POST", "/api/v5/addons/addon/my-addon/versions/")
        .expect(0)
        .create_async()
        .await;

    let context = context(&server.url(), None, Arc::default());
    let err = AmoPlugin
        .publish(&fixture.config(json!({})), &context)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "EVALIDATIONFAILURE");
    assert!(err.details().unwrap().contains("bad icon"));
    version.assert_async().await;
}

#[tokio::test]
async fn test_server_error_while_polling() {
    let mut server = Server::new_async().await;
    let fixture = AddonFixture::new();
    prepared(&fixture, &server.url()).await;

    server
        .mock("POST", "/api/v5/addons/upload/")
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(helpers::PENDING_UPLOAD)
        .create_async()
        .await;
    let poll = server
        .mock("GET", "/api/v5/addons/upload/u1/")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"server"}"#)
        .expect(1)
        .create_async()
        .await;
    let version = server
        .mock("POST", "/api/v5/addons/addon/my-addon/versions/")
        .expect(0)
        .create_async()
        .await;

    let context = context(&server.url(), None, Arc::default());
    let err = AmoPlugin
        .publish(&fixture.config(json!({})), &context)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "EBADRESPONSE");
    assert!(err.to_string().contains("500"));
    assert!(err.details().unwrap().contains("server"));
    poll.assert_async().await;
    version.assert_async().await;
}

#[tokio::test]
async fn test_publish_rejects_invalid_env() {
    let fixture = AddonFixture::new();
    let mut context = context("https://addons.mozilla.org/", None, Arc::default());
    context.env.remove("AMO_API_SECRET");

    let err = AmoPlugin
        .publish(&fixture.config(json!({})), &context)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "EINVALIDENV");
}
