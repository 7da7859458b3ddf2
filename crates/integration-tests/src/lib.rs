//! Integration test support for the ClubHub API.
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! with a [`StubBackend`] (or a real assistant over a [`ScriptedModel`])
//! standing in for the hosted model.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clubhub-integration-tests
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use clubhub_api::assistant::{LanguageModel, ModelError};
use clubhub_api::backend::{BackendError, BackendReply, ConversationalBackend};
use clubhub_api::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// Largest response body the helpers will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Backend that replays a fixed outcome and records what it was asked.
pub struct StubBackend {
    outcome: Result<BackendReply, BackendError>,
    received: Mutex<Vec<String>>,
}

impl StubBackend {
    /// Backend that always succeeds with `reply`.
    #[must_use]
    pub fn replying(reply: BackendReply) -> Arc<Self> {
        Self::with_outcome(Ok(reply))
    }

    /// Backend that always fails with `error`.
    #[must_use]
    pub fn failing(error: BackendError) -> Arc<Self> {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<BackendReply, BackendError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            received: Mutex::new(Vec::new()),
        })
    }

    /// Messages the backend has been asked to process, in order.
    #[must_use]
    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ConversationalBackend for StubBackend {
    async fn process_message(&self, text: &str) -> Result<BackendReply, BackendError> {
        if let Ok(mut messages) = self.received.lock() {
            messages.push(text.to_string());
        }
        self.outcome.clone()
    }
}

/// Backend that panics on every message.
pub struct PanickingBackend {
    pub message: &'static str,
}

#[async_trait]
impl ConversationalBackend for PanickingBackend {
    async fn process_message(&self, _text: &str) -> Result<BackendReply, BackendError> {
        panic!("{}", self.message)
    }
}

/// Language model that answers every prompt with the same text.
pub struct ScriptedModel {
    reply: Result<String, ModelError>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    #[must_use]
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn failing(error: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(ModelError::new(error)),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Prompts the model has been given, in order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.reply.clone()
    }
}

/// Build the application router around a backend.
#[must_use]
pub fn test_app(backend: Arc<dyn ConversationalBackend>) -> Router {
    clubhub_api::app(AppState::new(backend))
}

/// A response with its body decoded.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    /// Body as UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Value of the `x-request-id` header, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(clubhub_api::middleware::REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
    }
}

/// Send one request through the router.
///
/// # Panics
///
/// Panics if the router fails or the body cannot be read.
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router failed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
        .await
        .expect("failed to read body");

    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}

/// `POST /api/chatbot` with a raw JSON body.
///
/// # Panics
///
/// Panics if the request cannot be built.
pub async fn post_chat(app: Router, body: impl Into<Body>) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/chatbot")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("failed to build request");
    send(app, request).await
}

/// `GET` a path.
///
/// # Panics
///
/// Panics if the request cannot be built.
pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request");
    send(app, request).await
}
