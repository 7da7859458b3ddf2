//! Integration tests for the chatbot gateway.
//!
//! These drive `POST /api/chatbot` and `GET /api/chatbot` through the full
//! router with stub backends, so no model API calls are made.

use std::sync::Arc;

use axum::http::StatusCode;
use clubhub_api::backend::{BackendError, BackendReply};
use clubhub_integration_tests::{PanickingBackend, StubBackend, get, post_chat, test_app};
use serde_json::json;

fn invalid_input() -> serde_json::Value {
    json!({"error": "Message is required and must be a string"})
}

// =============================================================================
// Input Validation
// =============================================================================

#[tokio::test]
async fn test_missing_null_or_non_text_message_is_rejected() {
    let backend = StubBackend::replying(BackendReply::text("unused"));

    for body in [
        r#"{}"#,
        r#"{"message": null}"#,
        r#"{"message": 42}"#,
        r#"{"message": true}"#,
        r#"{"message": ["hi"]}"#,
        r#"{"message": {"text": "hi"}}"#,
        r#"{"text": "hi"}"#,
        r#"["hi"]"#,
        r#""hi""#,
        "not json",
        "",
    ] {
        let response = post_chat(test_app(backend.clone()), body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.json(), invalid_input(), "body: {body}");
    }

    assert!(backend.received().is_empty());
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let backend = StubBackend::replying(BackendReply::text("unused"));

    for body in [
        r#"{"message": ""}"#,
        r#"{"message": "   "}"#,
        r#"{"message": "\n\t "}"#,
        r#"{"message": "\ufeff "}"#,
    ] {
        let response = post_chat(test_app(backend.clone()), body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.json(), invalid_input(), "body: {body}");
    }

    assert!(backend.received().is_empty());
}

// =============================================================================
// Success
// =============================================================================

#[tokio::test]
async fn test_reply_without_data() {
    let backend = StubBackend::replying(BackendReply::text("Hi!"));

    let response = post_chat(test_app(backend.clone()), r#"{"message": "hello"}"#).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"success": true, "message": "Hi!"}));
}

#[tokio::test]
async fn test_message_is_trimmed_before_backend() {
    let backend = StubBackend::replying(BackendReply::text("Hi!"));

    post_chat(
        test_app(backend.clone()),
        r#"{"message": "  find chess clubs \n"}"#,
    )
    .await;

    assert_eq!(backend.received(), ["find chess clubs"]);
}

#[tokio::test]
async fn test_reply_data_passes_through_unchanged() {
    let data = json!({
        "clubs": [{"id": "c2", "name": "Chess Club", "campus": "UTM"}],
        "note": "<b>not sanitized</b>",
    });
    let message = "Here you go: ".to_string() + &"x".repeat(10_000);
    let backend = StubBackend::replying(BackendReply::with_data(message.clone(), data.clone()));

    let response = post_chat(test_app(backend), r#"{"message": "chess"}"#).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({"success": true, "message": message, "data": data})
    );
}

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let backend = StubBackend::replying(BackendReply::text("Hi!"));

    let response = post_chat(
        test_app(backend.clone()),
        r#"{"message": "hello", "history": [], "userId": "u1"}"#,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(backend.received(), ["hello"]);
}

// =============================================================================
// Failure Classification
// =============================================================================

#[tokio::test]
async fn test_sign_in_failure_is_unauthenticated() {
    let unauthenticated = json!({
        "error": "Authentication required",
        "message": "Please sign in to use the chatbot feature.",
    });

    for error in [
        BackendError::SignInRequired("no session".to_string()),
        BackendError::Failed("User must be signed in to use the chatbot.".to_string()),
        BackendError::Failed("upstream said: must be signed in (code 7)".to_string()),
    ] {
        let response = post_chat(
            test_app(StubBackend::failing(error.clone())),
            r#"{"message": "hello"}"#,
        )
        .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "error: {error:?}");
        assert_eq!(response.json(), unauthenticated, "error: {error:?}");
    }
}

#[tokio::test]
async fn test_other_failure_is_internal_with_debug() {
    let response = post_chat(
        test_app(StubBackend::failing(BackendError::Failed("timeout".to_string()))),
        r#"{"message": "hello"}"#,
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({
            "error": "Internal server error",
            "message": "Sorry, I'm having trouble. Please try again!",
            "debug": "timeout",
        })
    );
}

#[tokio::test]
async fn test_failure_without_text_reports_unknown_error() {
    let response = post_chat(
        test_app(StubBackend::failing(BackendError::Failed(String::new()))),
        r#"{"message": "hello"}"#,
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["debug"], "Unknown error");
}

#[tokio::test]
async fn test_backend_panic_is_internal() {
    let backend = Arc::new(PanickingBackend {
        message: "backend runtime fault",
    });

    let response = post_chat(test_app(backend), r#"{"message": "hello"}"#).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({
            "error": "Internal server error",
            "message": "Sorry, I'm having trouble. Please try again!",
            "debug": "backend runtime fault",
        })
    );
    assert!(response.request_id().is_some());
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn test_liveness_report() {
    let backend = StubBackend::failing(BackendError::Failed("down".to_string()));

    let response = get(test_app(backend.clone()), "/api/chatbot").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "Chatbot API is running!");
    assert_eq!(body["serviceInitialized"], true);
    let timestamp = body["timestamp"].as_str().expect("timestamp is text");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(body.get("success").is_none());
    assert!(body.get("message").is_none());
    assert!(backend.received().is_empty());
}

// =============================================================================
// Ambient Routes
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = get(test_app(StubBackend::replying(BackendReply::text("Hi!"))), "/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_every_response_has_request_id() {
    let backend: Arc<StubBackend> = StubBackend::replying(BackendReply::text("Hi!"));

    let responses = [
        post_chat(test_app(backend.clone()), r#"{"message": "hello"}"#).await,
        post_chat(test_app(backend.clone()), r#"{"message": ""}"#).await,
        get(test_app(backend.clone()), "/api/chatbot").await,
        get(test_app(backend), "/nope").await,
    ];

    for response in &responses {
        assert!(
            response.request_id().is_some_and(|id| !id.is_empty()),
            "status {} has no request id",
            response.status
        );
    }
}
